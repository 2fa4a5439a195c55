/// Apple's production endpoint for the legacy verifyReceipt API.
pub const PRODUCTION_VERIFICATION_URL: &str = "https://buy.itunes.apple.com/verifyReceipt";

/// Apple's sandbox endpoint for the legacy verifyReceipt API.
pub const SANDBOX_VERIFICATION_URL: &str = "https://sandbox.itunes.apple.com/verifyReceipt";

/// Environment variable consulted by `ClientConfig::from_env` to override the
/// verification endpoint.
pub const VERIFICATION_ENDPOINT_ENV_VAR: &str = "IAP_VERIFICATION_ENDPOINT";

// Synthetic receipt attributes, added for auditability.
pub const ORIGINAL_JSON_RESPONSE_KEY: &str = "original_json_response";
pub const ORIGINAL_RESPONSE_BODY_KEY: &str = "original_response_body";
