use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError};

use super::common::{present_object_array, status_code, Environment, JsonObject};

/// The part of the verifyReceipt response that is read regardless of the
/// outcome. On a failure status nothing else is guaranteed to be present.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyReceiptStatusModel {
    /// Either 0 if the receipt is valid, or a status code if there is an
    /// error. Sent as a number, though strings and integral floats are
    /// tolerated.
    #[serde(deserialize_with = "status_code")]
    pub(crate) status: i64,
    /// An indicator that an error occurred during the request. A value of true
    /// indicates a temporary issue; retry validation for this receipt at a
    /// later time.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, rename = "is-retryable")]
    pub(crate) is_retryable: bool,
}

/// The remaining top-level fields of a successful verifyReceipt response. The
/// `receipt` object itself is handled separately, since it is passed through
/// mostly untouched.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyReceiptResponseBodyModel {
    /// The environment for which the receipt was generated.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) environment: Option<Environment>,
    /// The latest Base64 encoded app receipt. Only returned for receipts that
    /// contain auto-renewable subscriptions.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) latest_receipt: Option<String>,
    /// An array that contains all in-app purchase transactions. Only returned
    /// for receipts that contain auto-renewable subscriptions.
    #[serde(default, deserialize_with = "present_object_array")]
    pub(crate) latest_receipt_info: Option<Vec<JsonObject>>,
    /// An array where each element contains the pending renewal information
    /// for each auto-renewable subscription identified by product_id.
    #[serde(default, deserialize_with = "present_object_array")]
    pub(crate) pending_renewal_info: Option<Vec<JsonObject>>,
}
