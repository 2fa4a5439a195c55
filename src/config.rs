use std::{env::VarError, time::Duration};

use crate::{
    constants::{
        PRODUCTION_VERIFICATION_URL, SANDBOX_VERIFICATION_URL, VERIFICATION_ENDPOINT_ENV_VAR,
    },
    errors::IapReceiptError,
};

/// Configuration of a `ReceiptClient`.
///
/// verification_url:
///   Endpoint to POST receipts to. If unset, the client falls back to the
///   sandbox endpoint the first time it verifies a receipt.
///
/// shared_secret:
///   The app's shared secret, sent with every request. Can also be supplied
///   per call through `VerifyOptions`.
///
/// timeout:
///   Total request timeout. No timeout if unset.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub verification_url: Option<String>,
    pub shared_secret: Option<String>,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn production() -> Self {
        Self {
            verification_url: Some(PRODUCTION_VERIFICATION_URL.to_owned()),
            ..Default::default()
        }
    }

    pub fn sandbox() -> Self {
        Self {
            verification_url: Some(SANDBOX_VERIFICATION_URL.to_owned()),
            ..Default::default()
        }
    }

    /// Reads the endpoint override from `IAP_VERIFICATION_ENDPOINT` (also
    /// looked up in a `.env` file, if present). The environment is only read
    /// here, never at verification time.
    pub fn from_env() -> Result<Self, IapReceiptError> {
        let verification_url = match dotenvy::var(VERIFICATION_ENDPOINT_ENV_VAR) {
            Ok(url) if url.trim().is_empty() => None,
            Ok(url) => Some(url),
            Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => None,
            Err(e) => {
                return Err(IapReceiptError::Config(format!(
                    "failed to read {VERIFICATION_ENDPOINT_ENV_VAR}; {e}"
                )))
            }
        };
        Ok(Self {
            verification_url,
            ..Default::default()
        })
    }

    pub fn with_shared_secret(mut self, shared_secret: impl Into<String>) -> Self {
        self.shared_secret = Some(shared_secret.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
