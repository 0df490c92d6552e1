use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarrierError {
    /// Message meant to be shown to the user as is
    #[error("{0}")]
    User(String),

    #[error("ASM gateway request failed (status {status}): {body}")]
    Gateway { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("label is not valid base64: {0}")]
    LabelDecode(#[from] base64::DecodeError),

    #[error("store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CarrierError>;
