use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{
    formats::Flexible, serde_as, DefaultOnError, DisplayFromStr, PickFirst, TimestampMilliSeconds,
};

/// Typed view over one entry of `receipt.in_app` or `latest_receipt_info`.
/// Both arrays use the same structure.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt/in_app
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct InAppModel {
    /// The unique identifier of the product purchased.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) product_id: Option<String>,
    /// A unique identifier for a transaction such as a purchase, restore, or
    /// renewal.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) transaction_id: Option<String>,
    /// The transaction identifier of the original purchase.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) original_transaction_id: Option<String>,
    /// A unique identifier for purchase events across devices, including
    /// subscription-renewal events.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) web_order_line_item_id: Option<String>,
    /// The identifier of the subscription offer redeemed by the user.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) promotional_offer_id: Option<String>,
    /// The number of consumable products purchased.
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub(crate) quantity: Option<u32>,
    #[serde_as(as = "DefaultOnError<Option<TimestampMilliSeconds<String, Flexible>>>")]
    #[serde(default)]
    pub(crate) purchase_date_ms: Option<DateTime<Utc>>,
    #[serde_as(as = "DefaultOnError<Option<TimestampMilliSeconds<String, Flexible>>>")]
    #[serde(default)]
    pub(crate) original_purchase_date_ms: Option<DateTime<Utc>>,
    /// Only present for auto-renewable subscription receipts.
    #[serde_as(as = "DefaultOnError<Option<TimestampMilliSeconds<String, Flexible>>>")]
    #[serde(default)]
    pub(crate) expires_date_ms: Option<DateTime<Utc>>,
    /// The time the App Store refunded a transaction or revoked it from family
    /// sharing.
    #[serde_as(as = "DefaultOnError<Option<TimestampMilliSeconds<String, Flexible>>>")]
    #[serde(default)]
    pub(crate) cancellation_date_ms: Option<DateTime<Utc>>,
    /// "1" if the customer canceled due to an issue within the app, "0" for
    /// any other reason.
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub(crate) cancellation_reason: Option<i64>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub(crate) is_trial_period: Option<bool>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub(crate) is_in_intro_offer_period: Option<bool>,
}
