use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// A single purchase or subscription renewal transaction.
///
/// Used both for the entries of `Receipt::in_app` and of
/// `Receipt::latest_receipt_info`, since Apple returns the same structure for
/// both. The well-known fields are typed for convenience; the full object as
/// returned by Apple is available through `attributes()`.
#[derive(Debug, Clone, PartialEq)]
pub struct InAppReceipt {
    pub product_id: Option<String>,
    pub transaction_id: Option<String>,
    /// For subscriptions, identical across all renewals.
    pub original_transaction_id: Option<String>,
    pub web_order_line_item_id: Option<String>,
    pub promotional_offer_id: Option<String>,
    pub quantity: Option<u32>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub original_purchase_date: Option<DateTime<Utc>>,
    /// Only set for auto-renewable subscriptions.
    pub expires_date: Option<DateTime<Utc>>,
    /// Set if the App Store refunded the transaction or revoked it from family
    /// sharing.
    pub cancellation_date: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<i64>,
    pub is_trial_period: Option<bool>,
    pub is_in_intro_offer_period: Option<bool>,

    pub(crate) attributes: Map<String, Value>,
}

impl InAppReceipt {
    /// All fields exactly as returned by the validation endpoint.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_date.is_some()
    }
}
