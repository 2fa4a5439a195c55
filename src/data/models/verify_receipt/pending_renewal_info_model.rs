use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{
    formats::Flexible, serde_as, DefaultOnError, DisplayFromStr, PickFirst, TimestampMilliSeconds,
};

/// Typed view over one entry of `pending_renewal_info`.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/pending_renewal_info
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct PendingRenewalInfoModel {
    /// The current renewal preference for the auto-renewable subscription.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) auto_renew_product_id: Option<String>,
    /// The unique identifier of the product purchased.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) product_id: Option<String>,
    /// The transaction identifier of the original purchase.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) original_transaction_id: Option<String>,
    /// "1" if the subscription will renew at the end of the current period,
    /// "0" if the customer turned off automatic renewal.
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub(crate) auto_renew_status: Option<i64>,
    /// The reason a subscription expired.
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub(crate) expiration_intent: Option<i64>,
    /// "1" if the App Store is attempting to renew an expired subscription.
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub(crate) is_in_billing_retry_period: Option<i64>,
    /// Whether the customer consented to a price increase.
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub(crate) price_consent_status: Option<i64>,
    /// When the billing grace period for subscription renewals expires.
    #[serde_as(as = "DefaultOnError<Option<TimestampMilliSeconds<String, Flexible>>>")]
    #[serde(default)]
    pub(crate) grace_period_expires_date_ms: Option<DateTime<Utc>>,
}
