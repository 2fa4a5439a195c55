use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{
    formats::Flexible, serde_as, DefaultOnError, DisplayFromStr, PickFirst, TimestampMilliSeconds,
};

use super::common::{object_elements, JsonObject};

/// Typed view over the `receipt` object of a verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt
///
/// Apple adds fields over time and is inconsistent about sending numbers as
/// strings, so every field is optional and a malformed value is read as
/// missing. The raw object is kept next to this model.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct ReceiptModel {
    /// The bundle identifier for the app to which the receipt belongs.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) bundle_id: Option<String>,
    /// The app's version number (CFBundleVersion).
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) application_version: Option<String>,
    /// The version of the app that the user originally purchased.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) original_application_version: Option<String>,
    /// The type of receipt generated, e.g. "Production" or
    /// "ProductionSandbox".
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) receipt_type: Option<String>,
    /// Generated by App Store Connect and used by the App Store to uniquely
    /// identify the app purchased.
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub(crate) app_item_id: Option<i64>,
    #[serde_as(as = "DefaultOnError<Option<TimestampMilliSeconds<String, Flexible>>>")]
    #[serde(default)]
    pub(crate) receipt_creation_date_ms: Option<DateTime<Utc>>,
    #[serde_as(as = "DefaultOnError<Option<TimestampMilliSeconds<String, Flexible>>>")]
    #[serde(default)]
    pub(crate) request_date_ms: Option<DateTime<Utc>>,
    #[serde_as(as = "DefaultOnError<Option<TimestampMilliSeconds<String, Flexible>>>")]
    #[serde(default)]
    pub(crate) original_purchase_date_ms: Option<DateTime<Utc>>,
    /// Only set for apps purchased through the Volume Purchase Program.
    #[serde_as(as = "DefaultOnError<Option<TimestampMilliSeconds<String, Flexible>>>")]
    #[serde(default)]
    pub(crate) expiration_date_ms: Option<DateTime<Utc>>,
    /// The in-app purchase receipt fields for all in-app purchase
    /// transactions. Elements that aren't objects are skipped.
    #[serde(default, deserialize_with = "object_elements")]
    pub(crate) in_app: Vec<JsonObject>,
}
