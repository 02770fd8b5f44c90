use super::consts::{
    ANNOTATION_API_ENV, DEFAULT_ANNOTATION_API, DEFAULT_HTTP_TIMEOUT_SECS, HTTP_TIMEOUT_ENV,
};
use log::warn;
use std::env;
use std::time::Duration;

/// Get default annotation api from environment variable
///
/// # Returns
/// - annotation backend base url, without a trailing slash
pub fn get_default_annotation_api() -> String {
    env::var(ANNOTATION_API_ENV)
        .unwrap_or_else(|_| DEFAULT_ANNOTATION_API.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Get default http timeout from environment variable
///
/// An unparsable value falls back to the default with a warning.
pub fn get_default_http_timeout() -> Duration {
    let secs = match env::var(HTTP_TIMEOUT_ENV) {
        Ok(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
            warn!(
                "Ignoring {}={:?}; using {}s",
                HTTP_TIMEOUT_ENV, raw, DEFAULT_HTTP_TIMEOUT_SECS
            );
            DEFAULT_HTTP_TIMEOUT_SECS
        }),
        Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
    };
    Duration::from_secs(secs)
}

///
/// The transcript prefix of an HGVS name: everything before the first
/// colon. `None` when there is no colon or the prefix is empty.
///
pub fn transcript_of(hgvs: &str) -> Option<&str> {
    hgvs.split_once(':')
        .map(|(transcript, _)| transcript.trim())
        .filter(|transcript| !transcript.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("NM_000088.3:c.10A>G", Some("NM_000088.3"))]
    #[case("ENST00000357654.9:c.68_69del", Some("ENST00000357654.9"))]
    #[case("NM_1:c.1:weird", Some("NM_1"))]
    #[case("c.10A>G", None)]
    #[case(":c.10A>G", None)]
    #[case("", None)]
    fn test_transcript_of(#[case] hgvs: &str, #[case] expected: Option<&str>) {
        assert_eq!(transcript_of(hgvs), expected);
    }
}
