//! HTTP implementation of the annotation service.
//!
//! This module provides [`HttpAnnotationService`] and its builder for talking
//! to the annotation backend over `reqwest`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::Serialize;

use super::consts::{ALTERNATIVES_ENDPOINT, JOB_ALTERNATIVES_SEGMENT};
use super::errors::AnnotationError;
use super::service::{AnnotationService, LookupRequest};
use super::utils::{get_default_annotation_api, get_default_http_timeout};

/// Builder for constructing an [`HttpAnnotationService`] with custom configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
/// use varlens_annotate::client::HttpAnnotationService;
///
/// # fn main() -> anyhow::Result<()> {
/// let service = HttpAnnotationService::builder()
///     .with_api("https://annotations.example.org/api".to_string())
///     .with_timeout(Duration::from_secs(10))
///     .finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct HttpAnnotationServiceBuilder {
    api: Option<String>,
    timeout: Option<Duration>,
}

impl HttpAnnotationServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the annotation backend base URL.
    pub fn with_api(mut self, api: String) -> Self {
        self.api = Some(api);
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Consumes the builder and creates the service.
    pub fn finish(self) -> Result<HttpAnnotationService> {
        let api = self
            .api
            .map(|api| api.trim_end_matches('/').to_string())
            .unwrap_or_else(get_default_annotation_api);
        let timeout = self.timeout.unwrap_or_else(get_default_http_timeout);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the annotation HTTP client")?;

        Ok(HttpAnnotationService { api, client })
    }
}

#[derive(Serialize)]
struct PersistBody<'a> {
    hgvs: &'a str,
    alternatives: &'a [String],
}

/// Annotation backend reached over HTTP.
///
/// - lookup: `GET {api}/alternatives?transcript=..&position=..&ref=..&alt=..`,
///   answered with a JSON array of HGVS names
/// - persist: `POST {api}/jobs/{job_id}/alternatives` with
///   `{"hgvs": primary, "alternatives": [...]}`
pub struct HttpAnnotationService {
    /// Annotation backend base URL
    pub api: String,
    client: Client,
}

impl HttpAnnotationService {
    pub fn builder() -> HttpAnnotationServiceBuilder {
        HttpAnnotationServiceBuilder::default()
    }

    pub fn lookup_url(&self) -> String {
        format!("{}/{}", self.api, ALTERNATIVES_ENDPOINT)
    }

    pub fn persist_url(&self, job_id: &str) -> String {
        format!("{}/jobs/{}/{}", self.api, job_id, JOB_ALTERNATIVES_SEGMENT)
    }
}

/// Turn a non-2xx response into a service error carrying the body text.
async fn check_status(response: Response) -> Result<Response, AnnotationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(AnnotationError::Service {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AnnotationService for HttpAnnotationService {
    async fn lookup(&self, request: &LookupRequest) -> Result<Vec<String>, AnnotationError> {
        let url = self.lookup_url();
        debug!("GET {} for {}:{}", url, request.transcript, request.position);

        let position = request.position.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("transcript", request.transcript.as_str()),
                ("position", position.as_str()),
                ("ref", request.reference.as_str()),
                ("alt", request.alt.as_str()),
            ])
            .send()
            .await?;
        let response = check_status(response).await?;

        let body = response.text().await?;
        serde_json::from_str::<Vec<String>>(&body)
            .map_err(|e| AnnotationError::Malformed(format!("{}: {}", e, body)))
    }

    async fn persist_alternatives(
        &self,
        job_id: &str,
        primary_hgvs: &str,
        alternatives: &[String],
    ) -> Result<(), AnnotationError> {
        let url = self.persist_url(job_id);
        debug!("POST {} ({} alternatives)", url, alternatives.len());

        let response = self
            .client
            .post(&url)
            .json(&PersistBody {
                hgvs: primary_hgvs,
                alternatives,
            })
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}
