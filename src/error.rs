use thiserror::Error;

/// Application errors.
///
/// Parsing the model's reply never fails; everything here comes from
/// reading the upload, talking to the model, or local configuration.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Unknown plant id: {0}")]
    UnknownPlant(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<AppError> for String {
    fn from(e: AppError) -> Self {
        e.to_string()
    }
}
