//! Errors raised while reading and presenting captured records.

use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("store query failed: {0}")]
    Store(#[from] sqlx::Error),

    #[error("no record with id {0}")]
    NotFound(String),

    #[error("stored {field} is corrupt: {reason}")]
    CorruptData { field: &'static str, reason: String },

    #[error("stored url cannot be parsed: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request and response bodies cannot be written together")]
    InvalidOptionCombination,
}

impl RecordError {
    pub fn corrupt(field: &'static str, reason: impl ToString) -> Self {
        Self::CorruptData {
            field,
            reason: reason.to_string(),
        }
    }

    /// Status code reported to the client. Detail stays in the logs.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_)
            | Self::CorruptData { .. }
            | Self::InvalidUrl(_)
            | Self::InvalidOptionCombination => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
