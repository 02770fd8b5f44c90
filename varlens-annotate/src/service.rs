use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AnnotationError;

/// What the annotation backend needs to name one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub transcript: String,
    pub position: u64,
    #[serde(rename = "ref")]
    pub reference: String,
    pub alt: String,
}

///
/// The annotation backend (a VEP-like service) as seen by the cache.
///
#[async_trait]
pub trait AnnotationService: Send + Sync {
    ///
    /// Fetch the alternative HGVS names for one variant.
    ///
    async fn lookup(&self, request: &LookupRequest) -> Result<Vec<String>, AnnotationError>;

    ///
    /// Save fetched alternatives to the job store under the variant's
    /// primary HGVS name. Best effort: callers do not roll back on failure.
    ///
    async fn persist_alternatives(
        &self,
        job_id: &str,
        primary_hgvs: &str,
        alternatives: &[String],
    ) -> Result<(), AnnotationError>;
}
