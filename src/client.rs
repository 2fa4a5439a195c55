use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    config::ClientConfig,
    constants::SANDBOX_VERIFICATION_URL,
    domain::{
        entities::{
            receipt::Receipt, verification_error::VerificationStatus,
            verification_outcome::VerificationOutcome, verify_options::VerifyOptions,
        },
        repositories::receipt_repository::ReceiptRepository,
    },
    errors::IapReceiptError,
};

pub use crate::data::{
    datasources::verify_receipt_datasource::VerifyReceiptDatasourceImpl,
    repositories::receipt_repository_impl::ReceiptRepositoryImpl,
};

/// Verifies App Store receipts against the legacy verifyReceipt endpoint.
///
/// The endpoint and shared secret are remembered between calls. Both are
/// only changed through `&mut self`, so a single client can't be used from
/// several tasks at once; create one client per task instead.
pub struct ReceiptClient<R: ReceiptRepository> {
    receipt_repository: R,
    verification_url: Option<String>,
    shared_secret: Option<String>,
}

/// The client returned by the named constructors, talking to Apple's
/// verifyReceipt endpoint over HTTPS.
pub type AppStoreReceiptClient =
    ReceiptClient<ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl>>;

impl<R: ReceiptRepository> ReceiptClient<R> {
    pub fn with_repository(receipt_repository: R, config: ClientConfig) -> Self {
        Self {
            receipt_repository,
            verification_url: config.verification_url,
            shared_secret: config.shared_secret,
        }
    }

    /// `None` until an endpoint is configured or the first verification
    /// falls back to the sandbox endpoint.
    pub fn verification_url(&self) -> Option<&str> {
        self.verification_url.as_deref()
    }

    pub fn set_verification_url(&mut self, verification_url: impl Into<String>) {
        self.verification_url = Some(verification_url.into());
    }

    pub fn set_shared_secret(&mut self, shared_secret: impl Into<String>) {
        self.shared_secret = Some(shared_secret.into());
    }

    /// Verifies the Base64-encoded receipt data.
    ///
    /// Returns `IapReceiptError::Verification` if Apple reports any status
    /// other than 0 or 21006. A shared secret passed in `options` is kept for
    /// subsequent calls.
    pub async fn verify(
        &mut self,
        receipt_data: &str,
        options: VerifyOptions,
    ) -> Result<Receipt, IapReceiptError> {
        Ok(self.verify_outcome(receipt_data, options).await?.into_result()?)
    }

    /// Same as `verify`, but returns a failure status as
    /// `VerificationOutcome::Invalid` instead of an error.
    pub async fn verify_outcome(
        &mut self,
        receipt_data: &str,
        options: VerifyOptions,
    ) -> Result<VerificationOutcome, IapReceiptError> {
        let verification_url = self
            .verification_url
            .get_or_insert_with(|| SANDBOX_VERIFICATION_URL.to_owned())
            .clone();
        let options = self.merge_options(options);
        self.receipt_repository
            .verify_receipt(&verification_url, receipt_data, &options)
            .await
    }

    /// Base64-encodes the raw receipt (as read from the app's
    /// `appStoreReceiptURL`) and verifies it.
    pub async fn verify_bytes(
        &mut self,
        receipt: &[u8],
        options: VerifyOptions,
    ) -> Result<Receipt, IapReceiptError> {
        self.verify(&STANDARD.encode(receipt), options).await
    }

    /// Verifies against the configured endpoint and, if Apple answers 21007
    /// (sandbox receipt sent to production), once more against the sandbox
    /// endpoint. The configured endpoint is left unchanged.
    ///
    /// This is the flow Apple recommends, so the same production build can
    /// accept receipts from App Review and TestFlight.
    pub async fn verify_with_sandbox_fallback(
        &mut self,
        receipt_data: &str,
        options: VerifyOptions,
    ) -> Result<Receipt, IapReceiptError> {
        match self.verify_outcome(receipt_data, options.clone()).await? {
            VerificationOutcome::Invalid(e)
                if e.kind() == VerificationStatus::SandboxReceiptOnProduction =>
            {
                tracing::debug!("sandbox receipt sent to production; verifying against sandbox");
                let options = self.merge_options(options);
                Ok(self
                    .receipt_repository
                    .verify_receipt(SANDBOX_VERIFICATION_URL, receipt_data, &options)
                    .await?
                    .into_result()?)
            }
            outcome => Ok(outcome.into_result()?),
        }
    }

    fn merge_options(&mut self, options: VerifyOptions) -> VerifyOptions {
        if let Some(shared_secret) = options.shared_secret {
            self.shared_secret = Some(shared_secret);
        }
        VerifyOptions {
            shared_secret: self.shared_secret.clone(),
            ..options
        }
    }
}

impl AppStoreReceiptClient {
    pub fn new(config: ClientConfig) -> Result<Self, IapReceiptError> {
        Ok(Self::with_repository(
            ReceiptRepositoryImpl::new(config.timeout)?,
            config,
        ))
    }

    pub fn production() -> Result<Self, IapReceiptError> {
        Self::new(ClientConfig::production())
    }

    pub fn development() -> Result<Self, IapReceiptError> {
        Self::new(ClientConfig::sandbox())
    }

    pub fn sandbox() -> Result<Self, IapReceiptError> {
        Self::development()
    }

    /// Endpoint taken from `IAP_VERIFICATION_ENDPOINT` if set, otherwise left
    /// unset until the first verification.
    pub fn from_env() -> Result<Self, IapReceiptError> {
        Self::new(ClientConfig::from_env()?)
    }
}
