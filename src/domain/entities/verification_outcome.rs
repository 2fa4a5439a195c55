use super::{receipt::Receipt, verification_error::VerificationError};

/// Result of a verification round-trip that reached the validation endpoint
/// and got a well-formed answer. Exactly one of the two holds.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    /// Status 0, or 21006 (expired subscription, receipt still returned).
    Valid(Receipt),
    /// Any other status.
    Invalid(VerificationError),
}

impl VerificationOutcome {
    pub fn status_is_success(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn into_result(self) -> Result<Receipt, VerificationError> {
        match self {
            Self::Valid(receipt) => Ok(receipt),
            Self::Invalid(error) => Err(error),
        }
    }
}
