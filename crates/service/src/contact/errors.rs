use thiserror::Error;

/// Failures talking to the email relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay access key is not configured")]
    MissingAccessKey,
    #[error("relay unreachable: {0}")]
    Network(String),
    #[error("relay returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("relay returned a non-JSON body: {0}")]
    MalformedResponse(String),
    #[error("relay rejected the submission: {0}")]
    Rejected(String),
}

impl RelayError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            RelayError::MissingAccessKey => 2001,
            RelayError::Network(_) => 2101,
            RelayError::Status { .. } => 2102,
            RelayError::MalformedResponse(_) => 2103,
            RelayError::Rejected(_) => 2104,
        }
    }
}
