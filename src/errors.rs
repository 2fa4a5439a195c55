use crate::domain::entities::verification_error::VerificationError;

#[derive(Debug, thiserror::Error)]
pub enum IapReceiptError {
    /// Connection, TLS, timeout or body-read failure while calling out to the
    /// validation endpoint.
    #[error("Error calling out to the receipt validation endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    /// The validation endpoint returned a body that is not valid JSON.
    #[error("Failed to parse validation endpoint response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body was valid JSON, but did not have the expected shape.
    #[error("Unexpected validation endpoint response: {0}")]
    InvalidResponse(String),

    /// The validation endpoint reported a non-success status code.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IapReceiptError>;
