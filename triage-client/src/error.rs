use thiserror::Error;
use triage_core::InputError;

/// Every way an analyze/suggest action can fail. All of them are terminal for that action.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from server: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid response from server: `{field}` should be an array")]
    UnexpectedShape { field: &'static str },

    #[error("Invalid response from server: body is null")]
    NullBody,
}

pub type Result<T> = std::result::Result<T, ApiError>;
