use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::{
    environment::Environment, in_app_receipt::InAppReceipt,
    pending_renewal_info::PendingRenewalInfo,
};

/// An app receipt, as decoded and validated by the App Store.
///
/// Apple keeps adding fields to the receipt, so only the commonly used ones
/// are typed. Everything returned under the `receipt` key is kept in
/// `attributes()`, together with two audit entries:
///   - `original_json_response`: the complete parsed response.
///   - `original_response_body`: the raw response body.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub bundle_id: Option<String>,
    pub application_version: Option<String>,
    pub original_application_version: Option<String>,
    pub receipt_type: Option<String>,
    pub app_item_id: Option<i64>,
    pub creation_date: Option<DateTime<Utc>>,
    pub request_date: Option<DateTime<Utc>>,
    pub original_purchase_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    /// Transactions contained in the receipt itself. Empty if Apple did not
    /// include any.
    pub in_app: Vec<InAppReceipt>,

    pub environment: Option<Environment>,
    /// The latest Base64 encoded app receipt. Only returned for receipts that
    /// contain auto-renewable subscriptions.
    pub latest_receipt: Option<String>,
    /// `None` if the response did not contain the field at all, which is
    /// different from an empty list.
    pub latest_receipt_info: Option<Vec<InAppReceipt>>,
    /// `None` if the response did not contain the field at all, which is
    /// different from an empty list.
    pub pending_renewal_info: Option<Vec<PendingRenewalInfo>>,

    pub original_json_response: Value,
    pub original_response_body: String,

    pub(crate) attributes: Map<String, Value>,
}

impl Receipt {
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Most recent transaction for the given product, across `in_app` and
    /// `latest_receipt_info`, ordered by purchase date.
    pub fn latest_transaction_for(&self, product_id: &str) -> Option<&InAppReceipt> {
        self.in_app
            .iter()
            .chain(self.latest_receipt_info.iter().flatten())
            .filter(|t| t.product_id.as_deref() == Some(product_id))
            .max_by_key(|t| t.purchase_date)
    }
}
