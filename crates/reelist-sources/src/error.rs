use thiserror::Error;

/// Failure taxonomy for the remote metadata collaborator.
///
/// `NotFound` is a well-formed domain response and is surfaced with its own
/// message, distinct from transport failures. `Cancelled` marks a superseded
/// request; callers discard it silently and never show it to the user.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Movie not found")]
    NotFound,

    #[error("request cancelled")]
    Cancelled,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response from {source_name}: {message}")]
    Decode {
        source_name: &'static str,
        message: String,
    },
}

impl SourceError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SourceError::Cancelled)
    }
}
