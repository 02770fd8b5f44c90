//! Drives annotation lookups against an [`AnnotationService`].
//!
//! [`Annotator::fetch`] writes the loading state before it returns its
//! future, so any read of the cache after the call observes a pending
//! entry, whether or not the future has been polled yet. Duplicate requests
//! for a key that is already loading are not collapsed here; callers should
//! check [`Annotator::status`] first.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use varlens_core::models::Variant;
use varlens_core::notify::{Notification, NotificationSink};

use crate::cache::{AnnotationCache, AnnotationStatus, SkipReason};
use crate::service::AnnotationService;

/// What a call to [`Annotator::fetch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Skipped(SkipReason),
    Resolved(Vec<String>),
    Failed(String),
}

pub struct Annotator<S: ?Sized> {
    cache: Arc<Mutex<AnnotationCache>>,
    service: Arc<S>,
    sink: Arc<dyn NotificationSink>,
    job_id: Option<String>,
}

impl<S: ?Sized> Clone for Annotator<S> {
    fn clone(&self) -> Self {
        Annotator {
            cache: Arc::clone(&self.cache),
            service: Arc::clone(&self.service),
            sink: Arc::clone(&self.sink),
            job_id: self.job_id.clone(),
        }
    }
}

impl<S: AnnotationService + ?Sized> Annotator<S> {
    pub fn new(service: Arc<S>, sink: Arc<dyn NotificationSink>) -> Self {
        Annotator {
            cache: Arc::new(Mutex::new(AnnotationCache::new())),
            service,
            sink,
            job_id: None,
        }
    }

    /// Job whose store receives fetched alternatives.
    pub fn with_job(mut self, job_id: &str) -> Self {
        self.job_id = Some(job_id.to_string());
        self
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    ///
    /// Lock the shared cache. The guard must not be held across an await.
    ///
    pub fn cache(&self) -> MutexGuard<'_, AnnotationCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn seed(&self, persisted: HashMap<String, Vec<String>>) -> usize {
        self.cache().seed(persisted)
    }

    pub fn resolve(&self, variant: &Variant) -> Vec<String> {
        self.cache().resolve(variant)
    }

    pub fn status(&self, variant: &Variant) -> AnnotationStatus {
        self.cache().status(variant)
    }

    ///
    /// Look up alternative HGVS names for `variant` and cache them. The
    /// entry is marked loading before this returns; the lookup itself runs
    /// when the returned future is awaited. Lookup failures end up in the
    /// cache entry and the notification sink; they are never returned as
    /// errors.
    ///
    pub fn fetch<'a>(
        &'a self,
        variant: &Variant,
    ) -> impl Future<Output = FetchOutcome> + use<'a, S> {
        let begun = self.cache().begin_fetch(variant);
        if let Err(reason) = &begun {
            debug!("Not fetching alternatives for {}: {}", variant, reason);
        }

        async move {
            let pending = match begun {
                Ok(pending) => pending,
                Err(reason) => return FetchOutcome::Skipped(reason),
            };

            let result = self.service.lookup(&pending.request).await;
            self.cache().complete_fetch(&pending, &result);

            match result {
                Ok(alternatives) => {
                    info!(
                        "Received {} alternatives for {}",
                        alternatives.len(),
                        pending.primary_hgvs
                    );
                    self.sink.notify(Notification::success(format!(
                        "Alternatives received for {}",
                        pending.primary_hgvs
                    )));
                    self.persist(&pending.primary_hgvs, &alternatives).await;
                    FetchOutcome::Resolved(alternatives)
                }
                Err(err) => {
                    warn!("Alternative lookup failed for {}: {}", pending.primary_hgvs, err);
                    self.sink.notify(Notification::error(format!(
                        "Failed to fetch alternatives for {}: {}",
                        pending.primary_hgvs, err
                    )));
                    FetchOutcome::Failed(err.to_string())
                }
            }
        }
    }

    async fn persist(&self, primary_hgvs: &str, alternatives: &[String]) {
        let Some(job_id) = self.job_id.as_deref() else {
            debug!("No job set; alternatives for {} kept in memory only", primary_hgvs);
            return;
        };
        if let Err(err) = self
            .service
            .persist_alternatives(job_id, primary_hgvs, alternatives)
            .await
        {
            warn!("Saving alternatives for {} failed: {}", primary_hgvs, err);
            self.sink.notify(Notification::error(format!(
                "Alternatives for {} could not be saved: {}",
                primary_hgvs, err
            )));
        }
    }
}
