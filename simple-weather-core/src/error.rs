//! Failures of a weather lookup. None of these ever reach the classifier or the store.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// Rejected locally before any request was sent.
    #[error("Invalid location query: {0}")]
    InvalidQuery(String),

    #[error("Failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Weather service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse weather service response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider answered with its own `error` object.
    #[error("Weather service error {code}: {message}")]
    Provider { code: i64, message: String },

    #[error("Weather service response had neither an error nor current weather")]
    Incomplete,
}

impl FetchError {
    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::InvalidQuery(reason) => format!("Can't look that up: {reason}."),
            FetchError::Transport(_) | FetchError::Status { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            FetchError::Provider { message, .. } => message.clone(),
            FetchError::Decode(_) | FetchError::Incomplete => {
                "The weather service sent a response we couldn't read.".to_string()
            }
        }
    }
}
