use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::{
    data::models::verify_receipt::request_body_model::VerifyReceiptRequestBodyModel,
    errors::IapReceiptError,
};

#[async_trait]
pub(crate) trait VerifyReceiptDatasource: Send + Sync {
    /// Verify Receipt (legacy):
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// Performs a single POST and returns the raw response body. The HTTP
    /// status is not interpreted, since Apple reports errors through the
    /// `status` field of the body.
    async fn post_verify_receipt(
        &self,
        url: &str,
        body: &VerifyReceiptRequestBodyModel,
    ) -> Result<String, IapReceiptError>;
}

pub struct VerifyReceiptDatasourceImpl {
    client: reqwest::Client,
}

#[async_trait]
impl VerifyReceiptDatasource for VerifyReceiptDatasourceImpl {
    async fn post_verify_receipt(
        &self,
        url: &str,
        body: &VerifyReceiptRequestBodyModel,
    ) -> Result<String, IapReceiptError> {
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                url,
                "verifyReceipt callout returned with non-200 status code"
            );
        }

        Ok(response.text().await?)
    }
}

impl VerifyReceiptDatasourceImpl {
    /// Certificate verification is always on (rustls with the bundled roots).
    pub(crate) fn new(timeout: Option<Duration>) -> Result<Self, IapReceiptError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}
