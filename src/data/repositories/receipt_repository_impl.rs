use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    constants::{ORIGINAL_JSON_RESPONSE_KEY, ORIGINAL_RESPONSE_BODY_KEY},
    data::{
        datasources::verify_receipt_datasource::{
            VerifyReceiptDatasource, VerifyReceiptDatasourceImpl,
        },
        models::verify_receipt::{
            common as vc, in_app_model::InAppModel,
            pending_renewal_info_model::PendingRenewalInfoModel, receipt_model::ReceiptModel,
            request_body_model::VerifyReceiptRequestBodyModel,
            response_body_model::{VerifyReceiptResponseBodyModel, VerifyReceiptStatusModel},
        },
    },
    domain::{
        entities::{
            environment::Environment,
            in_app_receipt::InAppReceipt,
            pending_renewal_info::{ExpirationIntent, PendingRenewalInfo},
            receipt::Receipt,
            verification_error::{VerificationError, VerificationStatus},
            verification_outcome::VerificationOutcome,
            verify_options::VerifyOptions,
        },
        repositories::receipt_repository::ReceiptRepository,
    },
    errors::IapReceiptError,
};

pub struct ReceiptRepositoryImpl<D> {
    verify_receipt_datasource: D,
}

#[async_trait]
impl<D: VerifyReceiptDatasource> ReceiptRepository for ReceiptRepositoryImpl<D> {
    async fn verify_receipt(
        &self,
        verification_url: &str,
        receipt_data: &str,
        options: &VerifyOptions,
    ) -> Result<VerificationOutcome, IapReceiptError> {
        let request = VerifyReceiptRequestBodyModel {
            receipt_data: receipt_data.to_owned(),
            password: options.shared_secret.clone(),
            exclude_old_transactions: options.exclude_old_transactions,
        };
        tracing::debug!(
            verification_url,
            with_shared_secret = request.password.is_some(),
            "verifying receipt"
        );
        let body = self
            .verify_receipt_datasource
            .post_verify_receipt(verification_url, &request)
            .await?;
        interpret_response(body)
    }
}

impl ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl> {
    pub(crate) fn new(timeout: Option<Duration>) -> Result<Self, IapReceiptError> {
        Ok(Self::with_datasource(VerifyReceiptDatasourceImpl::new(timeout)?))
    }
}

impl<D: VerifyReceiptDatasource> ReceiptRepositoryImpl<D> {
    pub(crate) fn with_datasource(verify_receipt_datasource: D) -> Self {
        Self {
            verify_receipt_datasource,
        }
    }
}

/// Classifies a raw verifyReceipt response body.
///
/// The body must be a JSON object, and only `status` is required to be
/// readable from it. On status 0 or 21006 the
/// `receipt` object must be present, and `latest_receipt_info` /
/// `pending_renewal_info` must be arrays of objects if present at all.
pub(crate) fn interpret_response(body: String) -> Result<VerificationOutcome, IapReceiptError> {
    let json: Value = serde_json::from_str(&body)?;
    if !json.is_object() {
        return Err(IapReceiptError::InvalidResponse(
            "response body is not a JSON object".to_owned(),
        ));
    }
    let status_model = VerifyReceiptStatusModel::deserialize(&json).map_err(|e| {
        IapReceiptError::InvalidResponse(format!("missing or non-numeric status; {e}"))
    })?;
    tracing::debug!(status = status_model.status, "validation endpoint responded");

    let receipt_attributes = match json.get("receipt") {
        Some(Value::Object(attributes)) => {
            let mut attributes = attributes.clone();
            attributes.insert(ORIGINAL_JSON_RESPONSE_KEY.to_owned(), json.clone());
            attributes.insert(
                ORIGINAL_RESPONSE_BODY_KEY.to_owned(),
                Value::String(body.clone()),
            );
            Some(attributes)
        }
        _ => None,
    };

    if !VerificationStatus::from_code(status_model.status).is_success() {
        // Best-effort: a failed response rarely carries a receipt, and if it
        // does, nothing about its shape is guaranteed.
        let partial_receipt = receipt_attributes
            .and_then(|attributes| Receipt::from_attributes(attributes, json, body).ok());
        return Ok(VerificationOutcome::Invalid(VerificationError::new(
            status_model.status,
            status_model.is_retryable,
            partial_receipt,
        )));
    }

    let attributes = receipt_attributes.ok_or_else(|| {
        IapReceiptError::InvalidResponse(format!(
            "status {} without a receipt object",
            status_model.status
        ))
    })?;
    let response_model = VerifyReceiptResponseBodyModel::deserialize(&json).map_err(|e| {
        IapReceiptError::InvalidResponse(format!("malformed receipt info arrays; {e}"))
    })?;

    let mut receipt = Receipt::from_attributes(attributes, json, body)
        .map_err(|e| IapReceiptError::InvalidResponse(format!("malformed receipt; {e}")))?;
    receipt.environment = response_model.environment.map(Environment::from);
    receipt.latest_receipt = response_model.latest_receipt;
    receipt.latest_receipt_info = response_model
        .latest_receipt_info
        .map(|entries| {
            entries
                .into_iter()
                .map(InAppReceipt::from_attributes)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
        .map_err(|e| {
            IapReceiptError::InvalidResponse(format!("malformed latest_receipt_info; {e}"))
        })?;
    receipt.pending_renewal_info = response_model
        .pending_renewal_info
        .map(|entries| {
            entries
                .into_iter()
                .map(PendingRenewalInfo::from_attributes)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
        .map_err(|e| {
            IapReceiptError::InvalidResponse(format!("malformed pending_renewal_info; {e}"))
        })?;

    Ok(VerificationOutcome::Valid(receipt))
}

// Model -> entity conversions.
// ----------------------------

impl Receipt {
    fn from_attributes(
        attributes: Map<String, Value>,
        original_json_response: Value,
        original_response_body: String,
    ) -> Result<Self, serde_json::Error> {
        let m = ReceiptModel::deserialize(&Value::Object(attributes.clone()))?;
        Ok(Self {
            bundle_id: m.bundle_id,
            application_version: m.application_version,
            original_application_version: m.original_application_version,
            receipt_type: m.receipt_type,
            app_item_id: m.app_item_id,
            creation_date: m.receipt_creation_date_ms,
            request_date: m.request_date_ms,
            original_purchase_date: m.original_purchase_date_ms,
            expiration_date: m.expiration_date_ms,
            in_app: m
                .in_app
                .into_iter()
                .map(InAppReceipt::from_attributes)
                .collect::<Result<_, _>>()?,
            environment: None,
            latest_receipt: None,
            latest_receipt_info: None,
            pending_renewal_info: None,
            original_json_response,
            original_response_body,
            attributes,
        })
    }
}

impl InAppReceipt {
    fn from_attributes(attributes: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let m = InAppModel::deserialize(&Value::Object(attributes.clone()))?;
        Ok(Self {
            product_id: m.product_id,
            transaction_id: m.transaction_id,
            original_transaction_id: m.original_transaction_id,
            web_order_line_item_id: m.web_order_line_item_id,
            promotional_offer_id: m.promotional_offer_id,
            quantity: m.quantity,
            purchase_date: m.purchase_date_ms,
            original_purchase_date: m.original_purchase_date_ms,
            expires_date: m.expires_date_ms,
            cancellation_date: m.cancellation_date_ms,
            cancellation_reason: m.cancellation_reason,
            is_trial_period: m.is_trial_period,
            is_in_intro_offer_period: m.is_in_intro_offer_period,
            attributes,
        })
    }
}

impl PendingRenewalInfo {
    fn from_attributes(attributes: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let m = PendingRenewalInfoModel::deserialize(&Value::Object(attributes.clone()))?;
        Ok(Self {
            product_id: m.product_id,
            auto_renew_product_id: m.auto_renew_product_id,
            original_transaction_id: m.original_transaction_id,
            auto_renew_status: m.auto_renew_status.map(|s| s == 1),
            expiration_intent: m.expiration_intent.map(ExpirationIntent::from_code),
            is_in_billing_retry_period: m.is_in_billing_retry_period.map(|s| s == 1),
            grace_period_expires_date: m.grace_period_expires_date_ms,
            price_consent_status: m.price_consent_status,
            attributes,
        })
    }
}

impl From<vc::Environment> for Environment {
    fn from(value: vc::Environment) -> Self {
        match value {
            vc::Environment::Sandbox => Environment::Sandbox,
            vc::Environment::Production => Environment::Production,
            vc::Environment::Unknown(other) => Environment::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    /// Returns a fixed body and records every request it receives.
    struct MockDatasource {
        response_body: String,
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl MockDatasource {
        fn returning(response_body: impl Into<String>) -> Self {
            Self {
                response_body: response_body.into(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl VerifyReceiptDatasource for MockDatasource {
        async fn post_verify_receipt(
            &self,
            url: &str,
            body: &VerifyReceiptRequestBodyModel,
        ) -> Result<String, IapReceiptError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_owned(), serde_json::to_value(body).unwrap()));
            Ok(self.response_body.clone())
        }
    }

    fn valid(body: Value) -> Receipt {
        match interpret_response(body.to_string()).unwrap() {
            VerificationOutcome::Valid(receipt) => receipt,
            other => panic!("expected a valid receipt, got {other:?}"),
        }
    }

    fn invalid(body: Value) -> VerificationError {
        match interpret_response(body.to_string()).unwrap() {
            VerificationOutcome::Invalid(error) => error,
            other => panic!("expected a verification error, got {other:?}"),
        }
    }

    #[test]
    fn test_minimal_success() {
        let body = json!({ "status": 0, "receipt": { "bundle_id": "com.example.app" } });
        let receipt = valid(body.clone());
        assert_eq!(receipt.bundle_id.as_deref(), Some("com.example.app"));
        assert!(receipt.latest_receipt_info.is_none());
        assert!(receipt.pending_renewal_info.is_none());
        assert!(receipt.in_app.is_empty());
        assert_eq!(receipt.original_json_response, body);
        assert_eq!(receipt.original_response_body, body.to_string());
    }

    #[test]
    fn test_attributes_are_input_plus_audit_fields() {
        for status in [json!(0), json!(21006), json!("0"), json!("21006")] {
            let input = json!({
                "bundle_id": "com.example.app",
                "application_version": "42",
                "custom_future_field": { "nested": [1, 2, 3] },
            });
            let body = json!({ "status": status, "receipt": input });
            let receipt = valid(body.clone());

            let mut expected = input.as_object().unwrap().clone();
            expected.insert("original_json_response".to_owned(), body.clone());
            expected.insert(
                "original_response_body".to_owned(),
                Value::String(body.to_string()),
            );
            assert_eq!(receipt.attributes(), &expected);
            assert_eq!(receipt.get("custom_future_field"), input.get("custom_future_field"));
        }
    }

    #[test]
    fn test_failure_status_round_trips_exactly() {
        for status in [json!(21003), json!("21003")] {
            assert_eq!(invalid(json!({ "status": status })).status(), 21003);
        }
        for code in [1, 21000, 21002, 21004, 21005, 21007, 21008, 21010, 21100, -5] {
            let error = invalid(json!({ "status": code }));
            assert_eq!(error.status(), code);
            assert!(error.receipt().is_none());
        }
    }

    #[test]
    fn test_failure_tolerates_any_other_shape() {
        let error = invalid(json!({
            "status": 21002,
            "latest_receipt_info": "not an array",
            "pending_renewal_info": null,
            "is-retryable": true,
        }));
        assert_eq!(error.status(), 21002);
        assert!(error.is_retryable());
    }

    #[test]
    fn test_failure_keeps_partial_receipt_context() {
        let error = invalid(json!({
            "status": 21004,
            "receipt": { "bundle_id": "com.example.app" },
        }));
        let partial = error.receipt().unwrap();
        assert_eq!(partial.bundle_id.as_deref(), Some("com.example.app"));
        assert!(partial.latest_receipt_info.is_none());
        assert!(partial.get("original_response_body").is_some());
    }

    #[test]
    fn test_latest_receipt_info_preserves_order_and_content() {
        let entries = json!([
            { "product_id": "monthly", "transaction_id": "3", "purchase_date_ms": "1700000000000" },
            { "product_id": "monthly", "transaction_id": "1", "extra": true },
            { "product_id": "yearly", "transaction_id": "2", "expires_date_ms": "1800000000000" },
        ]);
        let receipt = valid(json!({
            "status": 0,
            "receipt": {},
            "latest_receipt_info": entries,
        }));

        let info = receipt.latest_receipt_info.unwrap();
        assert_eq!(info.len(), 3);
        for (entry, source) in info.iter().zip(entries.as_array().unwrap()) {
            assert_eq!(entry.attributes(), source.as_object().unwrap());
        }
        let ids: Vec<_> = info.iter().map(|e| e.transaction_id.as_deref()).collect();
        assert_eq!(ids, [Some("3"), Some("1"), Some("2")]);
        assert_eq!(
            info[2].expires_date.map(|d| d.timestamp_millis()),
            Some(1_800_000_000_000)
        );
    }

    #[test]
    fn test_empty_arrays_are_distinct_from_absent() {
        let receipt = valid(json!({
            "status": 0,
            "receipt": {},
            "latest_receipt_info": [],
            "pending_renewal_info": [],
        }));
        assert_eq!(receipt.latest_receipt_info, Some(vec![]));
        assert_eq!(receipt.pending_renewal_info, Some(vec![]));
    }

    #[test]
    fn test_pending_renewal_info() {
        let receipt = valid(json!({
            "status": 21006,
            "environment": "Production",
            "latest_receipt": "MIIU",
            "receipt": { "bundle_id": "com.example.app" },
            "pending_renewal_info": [
                {
                    "auto_renew_product_id": "yearly",
                    "product_id": "monthly",
                    "original_transaction_id": "1",
                    "auto_renew_status": "0",
                    "expiration_intent": "1",
                    "is_in_billing_retry_period": "0",
                },
                { "product_id": "other", "expiration_intent": "9" },
            ],
        }));
        assert_eq!(receipt.environment, Some(Environment::Production));
        assert_eq!(receipt.latest_receipt.as_deref(), Some("MIIU"));

        let pending = receipt.pending_renewal_info.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].auto_renew_product_id.as_deref(), Some("yearly"));
        assert_eq!(pending[0].auto_renew_status, Some(false));
        assert_eq!(
            pending[0].expiration_intent,
            Some(ExpirationIntent::VoluntaryCancellation)
        );
        assert_eq!(pending[0].is_in_billing_retry_period, Some(false));
        assert_eq!(pending[1].expiration_intent, Some(ExpirationIntent::Unknown(9)));
        assert_eq!(pending[1].get("product_id"), Some(&json!("other")));
    }

    #[test]
    fn test_receipt_in_app_is_typed() {
        let receipt = valid(json!({
            "status": 0,
            "receipt": {
                "bundle_id": "com.example.app",
                "app_item_id": 123456789,
                "receipt_creation_date_ms": "1700000000000",
                "in_app": [
                    { "product_id": "coins", "quantity": "5", "cancellation_date_ms": "1700000100000" },
                ],
            },
        }));
        assert_eq!(receipt.app_item_id, Some(123_456_789));
        assert_eq!(
            receipt.creation_date.map(|d| d.timestamp_millis()),
            Some(1_700_000_000_000)
        );
        assert_eq!(receipt.in_app.len(), 1);
        assert_eq!(receipt.in_app[0].quantity, Some(5));
        assert!(receipt.in_app[0].is_cancelled());
    }

    #[test]
    fn test_receipt_in_app_skips_non_object_entries() {
        let receipt = valid(json!({
            "status": 0,
            "receipt": {
                "in_app": [1, { "product_id": "x" }, null, { "product_id": "y" }],
            },
        }));
        let ids: Vec<_> = receipt
            .in_app
            .iter()
            .map(|t| t.product_id.as_deref())
            .collect();
        assert_eq!(ids, vec![Some("x"), Some("y")]);
        // The passthrough mapping still holds the array as sent.
        assert_eq!(
            receipt.get("in_app").and_then(|v| v.as_array()).map(Vec::len),
            Some(4)
        );
    }

    #[test]
    fn test_integral_float_status_is_success() {
        let receipt = valid(json!({
            "status": 21006.0,
            "receipt": { "bundle_id": "com.example.app" },
        }));
        assert_eq!(receipt.bundle_id.as_deref(), Some("com.example.app"));
        assert_eq!(invalid(json!({ "status": 21007.0 })).status(), 21007);
        assert!(matches!(
            interpret_response(json!({ "status": 21006.5 }).to_string()),
            Err(IapReceiptError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let result = interpret_response("<html>502 Bad Gateway</html>".to_owned());
        assert!(matches!(result, Err(IapReceiptError::Parse(_))));
    }

    #[test]
    fn test_missing_status_is_invalid_response() {
        for body in [json!({}), json!({ "status": "ok" }), json!({ "status": null })] {
            let result = interpret_response(body.to_string());
            assert!(matches!(result, Err(IapReceiptError::InvalidResponse(_))));
        }
    }

    #[test]
    fn test_non_object_body_is_invalid_response() {
        for body in [
            json!([0]),
            json!([21007]),
            json!(["21003", true]),
            json!(21007),
            json!("0"),
            json!(null),
        ] {
            let result = interpret_response(body.to_string());
            assert!(
                matches!(result, Err(IapReceiptError::InvalidResponse(_))),
                "{body} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_success_without_receipt_is_invalid_response() {
        for body in [json!({ "status": 0 }), json!({ "status": 0, "receipt": null })] {
            let result = interpret_response(body.to_string());
            assert!(matches!(result, Err(IapReceiptError::InvalidResponse(_))));
        }
    }

    #[test]
    fn test_non_array_info_on_success_is_invalid_response() {
        for bad in [json!(null), json!({}), json!("x")] {
            for key in ["latest_receipt_info", "pending_renewal_info"] {
                let mut body = json!({ "status": 0, "receipt": {} });
                body[key] = bad.clone();
                let result = interpret_response(body.to_string());
                assert!(
                    matches!(result, Err(IapReceiptError::InvalidResponse(_))),
                    "{key}: {bad}"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_verify_receipt_builds_request() {
        let repository = ReceiptRepositoryImpl::with_datasource(MockDatasource::returning(
            r#"{"status":0,"receipt":{"bundle_id":"com.example.app"}}"#,
        ));

        let outcome = repository
            .verify_receipt(
                "https://example.com/verifyReceipt",
                "MIIT",
                &VerifyOptions::default()
                    .with_shared_secret("s3cret")
                    .with_exclude_old_transactions(true),
            )
            .await
            .unwrap();
        assert!(outcome.status_is_success());

        let outcome = repository
            .verify_receipt("https://example.com/verifyReceipt", "MIIT", &VerifyOptions::default())
            .await
            .unwrap();
        assert!(outcome.into_result().is_ok());

        let requests = repository.verify_receipt_datasource.requests.lock().unwrap();
        assert_eq!(requests[0].0, "https://example.com/verifyReceipt");
        assert_eq!(
            requests[0].1,
            json!({ "receipt-data": "MIIT", "password": "s3cret", "exclude-old-transactions": true })
        );
        assert_eq!(requests[1].1, json!({ "receipt-data": "MIIT" }));
    }
}
