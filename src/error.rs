use thiserror::Error;

pub type Result<T> = std::result::Result<T, GhstatsError>;

#[derive(Error, Debug)]
pub enum GhstatsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GitHub returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Image error: {0}")]
    Image(#[from] Box<image::ImageError>),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Other: {0}")]
    Other(String),
}

// Manual From implementation for unboxed to boxed conversion
impl From<image::ImageError> for GhstatsError {
    fn from(err: image::ImageError) -> Self {
        GhstatsError::Image(Box::new(err))
    }
}

impl From<tempfile::PersistError> for GhstatsError {
    fn from(err: tempfile::PersistError) -> Self {
        GhstatsError::Io(err.error)
    }
}
