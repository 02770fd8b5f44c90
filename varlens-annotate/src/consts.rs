//! Constants for annotation lookup configuration.
//!
//! This module defines the environment variable names and defaults used to
//! reach the annotation backend.

// Environment variable names

/// Environment variable name for the annotation backend base URL.
///
/// When set, this overrides [`DEFAULT_ANNOTATION_API`].
///
/// # Example
///
/// ```bash
/// export VARLENS_ANNOTATION_API=https://annotations.example.org/api
/// ```
pub const ANNOTATION_API_ENV: &str = "VARLENS_ANNOTATION_API";

/// Environment variable name for the HTTP request timeout, in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "VARLENS_HTTP_TIMEOUT_SECS";

// Defaults

/// Annotation backend used when no URL is configured.
pub const DEFAULT_ANNOTATION_API: &str = "http://localhost:8000/api";

/// Request timeout used when none is configured.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// Endpoint paths

/// Path (relative to the API root) of the alternatives lookup endpoint.
pub const ALTERNATIVES_ENDPOINT: &str = "alternatives";

/// Path segment under `jobs/{job_id}/` where alternatives are saved back.
pub const JOB_ALTERNATIVES_SEGMENT: &str = "alternatives";
