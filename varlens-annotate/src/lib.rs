//! Asynchronous HGVS alternative lookup for varlens.
//!
//! - [`AnnotationCache`](cache::AnnotationCache): keyed loading/error/resolved state per variant
//! - [`Annotator`](annotator::Annotator): runs lookups against an [`AnnotationService`](service::AnnotationService)
//!   and saves results back to the job store
//! - [`HttpAnnotationService`](client::HttpAnnotationService): the service over HTTP

pub mod annotator;
pub mod cache;
pub mod client;
pub mod consts;
pub mod errors;
pub mod service;
pub mod utils;

// re-exports
pub use annotator::{Annotator, FetchOutcome};
pub use cache::{AnnotationCache, AnnotationKey, AnnotationState, AnnotationStatus, SkipReason};
pub use errors::AnnotationError;
pub use service::{AnnotationService, LookupRequest};
