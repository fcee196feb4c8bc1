use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown field kind: {0}")]
    UnknownFieldKind(String),

    #[error("invalid gender: {0}")]
    InvalidGender(String),

    #[error("invalid identification type: {0}")]
    InvalidIdentificationType(String),
}

/// Failure reported by the external persistence collaborator.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Request(String),

    #[error("backend rejected the record: {0}")]
    Rejected(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
