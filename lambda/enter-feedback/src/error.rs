use thiserror::Error;

/// Failures surfaced to the caller of the feedback endpoint.
#[derive(Debug, Error)]
pub(crate) enum FeedbackError {
    /// Body missing, not JSON, or lacking a required field.
    #[error("Invalid request: {0}")]
    MalformedInput(String),

    /// The write to the feedback table did not succeed.
    #[error("Failed to store feedback: {0}")]
    StorageWriteFailure(String),
}

impl FeedbackError {
    pub(crate) fn status_code(&self) -> u16 {
        match self {
            FeedbackError::MalformedInput(_) => 400,
            FeedbackError::StorageWriteFailure(_) => 500,
        }
    }

    /// Message returned to the caller. Storage detail stays in the logs.
    pub(crate) fn client_message(&self) -> String {
        match self {
            FeedbackError::MalformedInput(_) => self.to_string(),
            FeedbackError::StorageWriteFailure(_) => "Failed to store feedback".to_string(),
        }
    }
}
