use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Pending renewal information for one auto-renewable subscription. A pending
/// renewal may refer to a renewal scheduled in the future, or one that failed
/// in the past.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRenewalInfo {
    pub product_id: Option<String>,
    /// The product the subscription will renew to, which differs from
    /// `product_id` after an upgrade, downgrade or crossgrade.
    pub auto_renew_product_id: Option<String>,
    pub original_transaction_id: Option<String>,
    pub auto_renew_status: Option<bool>,
    /// Only set for expired subscriptions.
    pub expiration_intent: Option<ExpirationIntent>,
    pub is_in_billing_retry_period: Option<bool>,
    pub grace_period_expires_date: Option<DateTime<Utc>>,
    pub price_consent_status: Option<i64>,

    pub(crate) attributes: Map<String, Value>,
}

impl PendingRenewalInfo {
    /// All fields exactly as returned by the validation endpoint.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationIntent {
    /// The customer canceled their subscription.
    VoluntaryCancellation,
    /// Billing error; for example, the customer's payment information is no
    /// longer valid.
    BillingError,
    /// The customer didn't consent to a recent price increase.
    PriceIncreaseDecline,
    /// The product wasn't available for purchase at the time of renewal.
    ProductUnavailable,
    /// Unknown error.
    Other,

    Unknown(i64),
}

impl ExpirationIntent {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::VoluntaryCancellation,
            2 => Self::BillingError,
            3 => Self::PriceIncreaseDecline,
            4 => Self::ProductUnavailable,
            5 => Self::Other,
            other => Self::Unknown(other),
        }
    }
}
