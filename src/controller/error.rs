// src/controller/error.rs
use thiserror::Error;

use crate::types::DecodeError;

pub const MISSING_CREDENTIAL: &str = "Please enter your OpenAI API key";
pub const MISSING_FIELDS: &str = "Please fill in all fields";
pub const GENERIC_FAILURE: &str = "Failed to generate content";
pub const TRANSPORT_FAILURE: &str = "An error occurred. Please try again later.";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Please enter your OpenAI API key")]
    MissingCredential,

    #[error("Please fill in all fields")]
    MissingFields,

    #[error("A generation request is already in flight")]
    AlreadyInFlight,

    #[error("Transport failure: {0:#}")]
    Transport(#[source] anyhow::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] DecodeError),

    #[error("Server error {status}: {}", .message.as_deref().unwrap_or(GENERIC_FAILURE))]
    Server {
        status: u16,
        message: Option<String>,
    },
}

impl GenerateError {
    /// Text of the alert shown for this failure, if it gets one. A missing
    /// credential is reported inline instead, and an in-flight rejection is
    /// silent.
    pub fn alert_text(&self) -> Option<String> {
        match self {
            GenerateError::MissingCredential | GenerateError::AlreadyInFlight => None,
            GenerateError::MissingFields => Some(MISSING_FIELDS.to_string()),
            GenerateError::Transport(e) => Some(format!("{} ({:#})", TRANSPORT_FAILURE, e)),
            GenerateError::MalformedResponse(_) => Some(format!("Error: {}", GENERIC_FAILURE)),
            GenerateError::Server { message, .. } => Some(format!(
                "Error: {}",
                message.as_deref().unwrap_or(GENERIC_FAILURE)
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Please enter a valid API key")]
    Empty,

    #[error("Failed to store API key: {0:#}")]
    Storage(#[source] anyhow::Error),
}

#[derive(Debug, Error)]
#[error("Unknown tab: {0}")]
pub struct UnknownTab(pub String);

/// Failures of the copy and download affordances.
#[derive(Debug, Error)]
pub enum ResultActionError {
    #[error("Failed to copy text: {0:#}")]
    Clipboard(#[source] anyhow::Error),

    #[error("Failed to save {file_name}: {source:#}")]
    Save {
        file_name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
