//! Client configuration, built in code or from environment variables.

use std::fmt;
use std::time::Duration;

use crate::constants::*;
use crate::error::DeroMerchantError;

/// Connection settings for a [`crate::Client`].
///
/// Immutable once built. The request timeout lives on the client itself,
/// since that is the one setting the owner may change later.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    scheme: String,
    host: String,
    api_version: String,
    api_key: String,
    /// Hex-encoded. Validated when a request body is signed, not here.
    secret_key: String,
}

impl ClientConfig {
    /// Configuration for the public DERO Merchant endpoint.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Load configuration from environment variables (a `.env` file is
    /// read first if present).
    ///
    /// Returns the config together with the request timeout
    /// (`DERO_MERCHANT_TIMEOUT_SECS`, default 10).
    pub fn from_env() -> Result<(Self, Duration), DeroMerchantError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, Duration), DeroMerchantError> {
        let var = |name: &str| lookup(name).filter(|s| !s.is_empty());
        let required = |name: &str| {
            var(name).ok_or_else(|| DeroMerchantError::Config(format!("{name} is not set")))
        };

        let mut config = Self::new(required(ENV_API_KEY)?, required(ENV_SECRET_KEY)?);
        if let Some(scheme) = var(ENV_SCHEME) {
            config.scheme = scheme;
        }
        if let Some(host) = var(ENV_HOST) {
            config.host = host;
        }
        if let Some(api_version) = var(ENV_API_VERSION) {
            config.api_version = api_version;
        }

        let timeout_secs = match var(ENV_TIMEOUT_SECS) {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                DeroMerchantError::Config(format!("{ENV_TIMEOUT_SECS}={raw:?} is not a number: {e}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok((config, Duration::from_secs(timeout_secs)))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// `scheme://host/api/api_version`
    pub fn base_url(&self) -> String {
        format!("{}://{}/api/{}", self.scheme, self.host, self.api_version)
    }

    /// `scheme://host/pay/{payment_id}`, the customer-facing payment page.
    pub fn pay_helper_url(&self, payment_id: &str) -> String {
        format!(
            "{}://{}/pay/{}",
            self.scheme,
            self.host,
            urlencoding::encode(payment_id)
        )
    }
}

// Keys must never end up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("api_version", &self.api_version)
            .field("api_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("api", "00ff");
        assert_eq!(config.base_url(), "https://merchant.dero.io/api/v1");
        assert_eq!(
            config.pay_helper_url("abc123"),
            "https://merchant.dero.io/pay/abc123"
        );
    }

    #[test]
    fn test_custom_endpoint() {
        let config = ClientConfig::new("api", "00ff")
            .with_scheme("http")
            .with_host("localhost:8080")
            .with_api_version("v2");
        assert_eq!(config.base_url(), "http://localhost:8080/api/v2");
        assert_eq!(config.pay_helper_url("x"), "http://localhost:8080/pay/x");
    }

    #[test]
    fn test_pay_helper_url_encodes_id() {
        let config = ClientConfig::new("api", "00ff");
        assert_eq!(
            config.pay_helper_url("a/b c"),
            "https://merchant.dero.io/pay/a%2Fb%20c"
        );
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = ClientConfig::new("my-api-key", "deadbeef");
        let debug = format!("{config:?}");
        assert!(!debug.contains("my-api-key"));
        assert!(!debug.contains("deadbeef"));
        assert!(debug.contains("merchant.dero.io"));
    }

    #[test]
    fn test_from_lookup_minimal() {
        let (config, timeout) = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "key"),
            (ENV_SECRET_KEY, "abcd"),
        ]))
        .unwrap();
        assert_eq!(config.api_key(), "key");
        assert_eq!(config.secret_key(), "abcd");
        assert_eq!(config.base_url(), "https://merchant.dero.io/api/v1");
        assert_eq!(timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let (config, timeout) = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "key"),
            (ENV_SECRET_KEY, "abcd"),
            (ENV_SCHEME, "http"),
            (ENV_HOST, "127.0.0.1:3000"),
            (ENV_API_VERSION, "v9"),
            (ENV_TIMEOUT_SECS, "3"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:3000/api/v9");
        assert_eq!(timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_from_lookup_empty_counts_as_missing() {
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, ""),
            (ENV_SECRET_KEY, "abcd"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "key"),
            (ENV_SECRET_KEY, "abcd"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, DeroMerchantError::Config(_)));
    }
}
