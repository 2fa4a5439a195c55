use async_trait::async_trait;

use crate::{
    domain::entities::{verification_outcome::VerificationOutcome, verify_options::VerifyOptions},
    errors::IapReceiptError,
};

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Submits the receipt to the given validation endpoint and interprets
    /// the answer.
    ///
    /// Transport and parse failures are returned as errors; a well-formed
    /// answer with a failure status is returned as
    /// `VerificationOutcome::Invalid`.
    async fn verify_receipt(
        &self,
        verification_url: &str,
        receipt_data: &str,
        options: &VerifyOptions,
    ) -> Result<VerificationOutcome, IapReceiptError>;
}
