use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariantIndexError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing variants: {0}")]
    VariantParseError(#[from] serde_json::Error),

    #[error("Corrupted file. 0 variants found in the file: {0}")]
    EmptyVariantSet(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
