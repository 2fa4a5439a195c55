use serde::Serialize;

/// JSON body POSTed to the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct VerifyReceiptRequestBodyModel {
    /// The Base64-encoded receipt data.
    pub(crate) receipt_data: String,
    /// The app's shared secret, which is a hexadecimal string. Required for
    /// receipts that contain auto-renewable subscriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) password: Option<String>,
    /// Set this value to true for the response to include only the latest
    /// renewal transaction for any subscriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) exclude_old_transactions: Option<bool>,
}
