/// Default URL scheme of the DERO Merchant API.
pub const DEFAULT_SCHEME: &str = "https";

/// Default host of the DERO Merchant API.
pub const DEFAULT_HOST: &str = "merchant.dero.io";

/// Default REST API version.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("DeroMerchant_Client_Rust/", env!("CARGO_PKG_VERSION"));

/// Header carrying the merchant API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Header carrying the HMAC-SHA256 signature of a signed request body.
pub const SIGNATURE_HEADER: &str = "X-Signature";

// Environment variables read by `ClientConfig::from_env`.
pub const ENV_API_KEY: &str = "DERO_MERCHANT_API_KEY";
pub const ENV_SECRET_KEY: &str = "DERO_MERCHANT_SECRET_KEY";
pub const ENV_SCHEME: &str = "DERO_MERCHANT_SCHEME";
pub const ENV_HOST: &str = "DERO_MERCHANT_HOST";
pub const ENV_API_VERSION: &str = "DERO_MERCHANT_API_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "DERO_MERCHANT_TIMEOUT_SECS";
