use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("No job is open: cannot {0}")]
    MissingJob(&'static str),
    #[error("No variant at position {0}")]
    UnknownVariant(u64),
}
