//! Per-variant annotation state.
//!
//! Entries are keyed by [`AnnotationKey`]: the primary HGVS name when the
//! record has one, otherwise the decimal position. Polymorphic occurrences
//! of one call therefore share an entry, while records without HGVS fall
//! back to positional identity.

use std::collections::HashMap;
use std::fmt::{self, Display};

use log::debug;
use varlens_core::models::Variant;
use varlens_core::resolver::HgvsResolver;

use crate::errors::AnnotationError;
use crate::service::LookupRequest;
use crate::utils::transcript_of;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationKey(String);

impl AnnotationKey {
    ///
    /// Derive the cache key of a record. Before any alternatives are cached
    /// the resolved sequence is the raw field, so its first entry is the
    /// primary HGVS name.
    ///
    pub fn for_variant(variant: &Variant) -> Self {
        match variant.primary_hgvs() {
            Some(primary) => AnnotationKey(primary.to_string()),
            None => AnnotationKey(variant.position.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AnnotationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// One cache entry. Pending, failed and resolved are mutually exclusive.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationState {
    Loading,
    Failed,
    Resolved(Vec<String>),
}

impl AnnotationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AnnotationState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AnnotationState::Failed)
    }

    pub fn alternatives(&self) -> &[String] {
        match self {
            AnnotationState::Resolved(alternatives) => alternatives,
            _ => &[],
        }
    }
}

/// Loading/error flags as a UI would render them for one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationStatus {
    pub loading: bool,
    pub error: bool,
}

/// Why a fetch request did not reach the lookup service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The resolved sequence already holds more than one name.
    AlreadyResolved,
    /// The record carries no primary HGVS name.
    NoHgvs,
    /// The primary HGVS name has no transcript prefix.
    MalformedHgvs,
    /// A lookup for the same key is still loading.
    InFlight,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::AlreadyResolved => "alternatives already known",
            SkipReason::NoHgvs => "no HGVS name",
            SkipReason::MalformedHgvs => "HGVS name has no transcript prefix",
            SkipReason::InFlight => "lookup already in flight",
        };
        write!(f, "{}", reason)
    }
}

///
/// A lookup that has been started: the entry for `key` is loading until
/// [AnnotationCache::complete_fetch] is called with the result.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub key: AnnotationKey,
    /// The primary HGVS name as it was before the fetch; results are saved under it.
    pub primary_hgvs: String,
    pub request: LookupRequest,
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationCache {
    entries: HashMap<AnnotationKey, AnnotationState>,
}

impl AnnotationCache {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Seed resolved entries from previously persisted alternatives, keyed
    /// by primary HGVS name. Existing entries and empty lists are left
    /// alone. Returns the number of entries added.
    ///
    pub fn seed(&mut self, persisted: HashMap<String, Vec<String>>) -> usize {
        let mut added = 0;
        for (primary, alternatives) in persisted {
            if primary.is_empty() || alternatives.is_empty() {
                continue;
            }
            let key = AnnotationKey(primary);
            if !self.entries.contains_key(&key) {
                self.entries.insert(key, AnnotationState::Resolved(alternatives));
                added += 1;
            }
        }
        debug!("Seeded {} annotation entries", added);
        added
    }

    pub fn entry(&self, variant: &Variant) -> Option<&AnnotationState> {
        self.entries.get(&AnnotationKey::for_variant(variant))
    }

    pub fn status(&self, variant: &Variant) -> AnnotationStatus {
        match self.entry(variant) {
            Some(state) => AnnotationStatus {
                loading: state.is_loading(),
                error: state.is_error(),
            },
            None => AnnotationStatus::default(),
        }
    }

    ///
    /// The HGVS names a record is known by: cached alternatives when there
    /// are any, otherwise the raw field.
    ///
    pub fn resolve(&self, variant: &Variant) -> Vec<String> {
        match self.entry(variant) {
            Some(AnnotationState::Resolved(alternatives)) if !alternatives.is_empty() => {
                alternatives.clone()
            }
            _ => variant.raw_hgvs(),
        }
    }

    ///
    /// Start a lookup for `variant`. On success the entry is already marked
    /// loading when this returns; nothing is touched when the fetch is
    /// skipped.
    ///
    pub fn begin_fetch(&mut self, variant: &Variant) -> Result<PendingFetch, SkipReason> {
        if self.resolve(variant).len() > 1 {
            return Err(SkipReason::AlreadyResolved);
        }
        let primary = variant.primary_hgvs().ok_or(SkipReason::NoHgvs)?;
        let transcript = transcript_of(primary).ok_or(SkipReason::MalformedHgvs)?;

        let pending = PendingFetch {
            key: AnnotationKey::for_variant(variant),
            primary_hgvs: primary.to_string(),
            request: LookupRequest {
                transcript: transcript.to_string(),
                position: variant.position,
                reference: variant.reference.clone(),
                alt: variant.alt.clone(),
            },
        };
        self.entries
            .insert(pending.key.clone(), AnnotationState::Loading);
        Ok(pending)
    }

    ///
    /// Record the outcome of a lookup started with [AnnotationCache::begin_fetch].
    ///
    pub fn complete_fetch(
        &mut self,
        pending: &PendingFetch,
        result: &Result<Vec<String>, AnnotationError>,
    ) {
        let state = match result {
            Ok(alternatives) => AnnotationState::Resolved(alternatives.clone()),
            Err(_) => AnnotationState::Failed,
        };
        self.entries.insert(pending.key.clone(), state);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HgvsResolver for AnnotationCache {
    fn resolve_hgvs(&self, variant: &Variant) -> Vec<String> {
        self.resolve(variant)
    }
}
