use std::fmt;

use super::receipt::Receipt;

/// The validation endpoint answered, but reported that the receipt is not
/// valid.
///
/// Never constructed for status 0 or 21006, since both of those carry a
/// valid receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationError {
    status: i64,
    is_retryable: bool,
    receipt: Option<Box<Receipt>>,
}

impl VerificationError {
    pub(crate) fn new(status: i64, is_retryable: bool, receipt: Option<Receipt>) -> Self {
        Self {
            status,
            is_retryable,
            receipt: receipt.map(Box::new),
        }
    }

    /// The status code exactly as reported by the validation endpoint.
    pub fn status(&self) -> i64 {
        self.status
    }

    pub fn kind(&self) -> VerificationStatus {
        VerificationStatus::from_code(self.status)
    }

    /// Set when Apple flagged the failure as temporary (`is-retryable`).
    pub fn is_retryable(&self) -> bool {
        self.is_retryable
    }

    /// Whatever receipt could be built from the failed response, if it
    /// included one.
    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_deref()
    }
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Receipt verification failed with status {} ({}).",
            self.status,
            self.kind().description()
        )
    }
}

impl std::error::Error for VerificationError {}

/// Well-known verifyReceipt status codes.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
///
/// Reference only: success is decided by `is_success`, which accepts exactly 0
/// and 21006.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Valid,
    /// The request to the App Store was not made using the HTTP POST request
    /// method.
    NotPost,
    /// No longer sent by the App Store.
    Deprecated21001,
    /// The data in the receipt-data property was malformed or the service
    /// experienced a temporary issue.
    MalformedReceiptData,
    /// The receipt could not be authenticated.
    NotAuthenticated,
    /// The shared secret does not match the shared secret on file for the
    /// account.
    SharedSecretMismatch,
    /// The receipt server was temporarily unable to provide the receipt.
    ServerUnavailable,
    /// Valid receipt, but the subscription has expired. The receipt data is
    /// still returned.
    SubscriptionExpired,
    /// Sandbox receipt sent to the production environment.
    SandboxReceiptOnProduction,
    /// Production receipt sent to the sandbox environment.
    ProductionReceiptOnSandbox,
    /// Internal data access error.
    InternalDataAccessError,
    /// The user account cannot be found or has been deleted.
    AccountNotFound,
    /// 21100-21199: internal data access errors.
    Internal(i64),

    Unknown(i64),
}

impl VerificationStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Valid,
            21000 => Self::NotPost,
            21001 => Self::Deprecated21001,
            21002 => Self::MalformedReceiptData,
            21003 => Self::NotAuthenticated,
            21004 => Self::SharedSecretMismatch,
            21005 => Self::ServerUnavailable,
            21006 => Self::SubscriptionExpired,
            21007 => Self::SandboxReceiptOnProduction,
            21008 => Self::ProductionReceiptOnSandbox,
            21009 => Self::InternalDataAccessError,
            21010 => Self::AccountNotFound,
            21100..=21199 => Self::Internal(code),
            other => Self::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Valid => 0,
            Self::NotPost => 21000,
            Self::Deprecated21001 => 21001,
            Self::MalformedReceiptData => 21002,
            Self::NotAuthenticated => 21003,
            Self::SharedSecretMismatch => 21004,
            Self::ServerUnavailable => 21005,
            Self::SubscriptionExpired => 21006,
            Self::SandboxReceiptOnProduction => 21007,
            Self::ProductionReceiptOnSandbox => 21008,
            Self::InternalDataAccessError => 21009,
            Self::AccountNotFound => 21010,
            Self::Internal(code) | Self::Unknown(code) => *code,
        }
    }

    /// Whether the response carries a valid receipt. Status 21006 counts as
    /// success, since Apple still returns the full receipt for expired
    /// subscriptions.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Valid | Self::SubscriptionExpired)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Valid => "receipt is valid",
            Self::NotPost => "request was not made using the HTTP POST method",
            Self::Deprecated21001 => "status no longer sent by the App Store",
            Self::MalformedReceiptData => "receipt data malformed or temporary service issue",
            Self::NotAuthenticated => "receipt could not be authenticated",
            Self::SharedSecretMismatch => "shared secret does not match the one on file",
            Self::ServerUnavailable => "receipt server temporarily unavailable",
            Self::SubscriptionExpired => "receipt is valid but the subscription has expired",
            Self::SandboxReceiptOnProduction => {
                "sandbox receipt sent to the production environment"
            }
            Self::ProductionReceiptOnSandbox => {
                "production receipt sent to the sandbox environment"
            }
            Self::InternalDataAccessError | Self::Internal(_) => "internal data access error",
            Self::AccountNotFound => "user account cannot be found or has been deleted",
            Self::Unknown(_) => "unknown status",
        }
    }
}
