use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Annotation service unreachable: {0}")]
    Network(String),

    #[error("Annotation service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Malformed annotation response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for AnnotationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AnnotationError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            AnnotationError::Service {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            AnnotationError::Network(err.to_string())
        }
    }
}
