/// Per-call options for receipt verification.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// The app's shared secret. Required for receipts containing
    /// auto-renewable subscriptions.
    pub shared_secret: Option<String>,
    /// Only include the latest renewal transaction for each subscription.
    pub exclude_old_transactions: Option<bool>,
}

impl VerifyOptions {
    pub fn with_shared_secret(mut self, shared_secret: impl Into<String>) -> Self {
        self.shared_secret = Some(shared_secret.into());
        self
    }

    pub fn with_exclude_old_transactions(mut self, exclude: bool) -> Self {
        self.exclude_old_transactions = Some(exclude);
        self
    }
}
