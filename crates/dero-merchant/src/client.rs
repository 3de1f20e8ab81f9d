//! HTTP client for the DERO Merchant REST API.
//!
//! Every call goes through [`Client::send`]: it builds the URL, attaches the
//! API key, serializes and optionally signs the body, and maps the response
//! to either the decoded JSON or a [`DeroMerchantError`].

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::constants::{self, API_KEY_HEADER, DEFAULT_TIMEOUT_SECS, SIGNATURE_HEADER};
use crate::error::{error_chain, DeroMerchantError};
use crate::hmac;
use crate::payment::{CreatePaymentRequest, Payment, PaymentFilter, PaymentPage};

/// Whether a request body gets an `X-Signature` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signing {
    Signed,
    Unsigned,
}

/// A serialized JSON body. The bytes are signed and sent as-is.
struct RequestBody {
    json: Vec<u8>,
    signing: Signing,
}

impl RequestBody {
    fn new<T: Serialize + ?Sized>(value: &T, signing: Signing) -> Result<Self, DeroMerchantError> {
        Ok(Self {
            json: serde_json::to_vec(value)?,
            signing,
        })
    }
}

/// `{"error": {"code": ..., "message": ...}}`
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    code: i64,
    message: String,
}

/// Client for the DERO Merchant API.
///
/// Holds the connection settings and a `reqwest::Client`. Calls are
/// independent of each other; nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    timeout: Duration,
}

impl Client {
    /// Build a client with the default 10 second timeout.
    ///
    /// Redirects are not followed, so the API key is only ever sent to the
    /// configured host.
    pub fn new(config: ClientConfig) -> Result<Self, DeroMerchantError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| DeroMerchantError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(config, http))
    }

    /// Build a client around a caller-provided `reqwest::Client`.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            config,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build a client from `DERO_MERCHANT_*` environment variables.
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, DeroMerchantError> {
        let (config, timeout) = ClientConfig::from_env()?;
        let mut client = Self::new(config)?;
        client.set_timeout(timeout);
        Ok(client)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Change the per-request timeout used by subsequent calls.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// `GET /ping`. Returns the service health object (`Null` if the
    /// response carried no JSON).
    pub async fn ping(&self) -> Result<Value, DeroMerchantError> {
        let body = self.send(Method::GET, "/ping", &[], None).await?;
        Ok(body.unwrap_or(Value::Null))
    }

    /// `POST /payment` with a signed `{"currency", "amount"}` body.
    pub async fn create_payment(
        &self,
        currency: &str,
        amount: f64,
    ) -> Result<Payment, DeroMerchantError> {
        // serde_json writes NaN and infinities as `null`.
        if !amount.is_finite() {
            return Err(DeroMerchantError::InvalidAmount(amount));
        }
        let body = RequestBody::new(&CreatePaymentRequest { currency, amount }, Signing::Signed)?;
        decode(self.send(Method::POST, "/payment", &[], Some(body)).await?)
    }

    /// `GET /payment/{payment_id}`
    pub async fn get_payment(&self, payment_id: &str) -> Result<Payment, DeroMerchantError> {
        let endpoint = format!("/payment/{}", urlencoding::encode(payment_id));
        decode(self.send(Method::GET, &endpoint, &[], None).await?)
    }

    /// `POST /payments` with the list of IDs. Payments come back in the
    /// order the service returns them.
    pub async fn get_payments<S: AsRef<str>>(
        &self,
        payment_ids: &[S],
    ) -> Result<Vec<Payment>, DeroMerchantError> {
        let ids: Vec<&str> = payment_ids.iter().map(AsRef::as_ref).collect();
        let body = RequestBody::new(&ids, Signing::Unsigned)?;
        decode(self.send(Method::POST, "/payments", &[], Some(body)).await?)
    }

    /// `GET /payments` with filter and pagination query parameters.
    pub async fn get_filtered_payments(
        &self,
        filter: &PaymentFilter,
    ) -> Result<PaymentPage, DeroMerchantError> {
        let query = filter.to_query();
        decode(self.send(Method::GET, "/payments", &query, None).await?)
    }

    /// URL of the customer-facing pay helper page. No network access.
    pub fn get_pay_helper_url(&self, payment_id: &str) -> String {
        self.config.pay_helper_url(payment_id)
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<RequestBody>,
    ) -> Result<Option<Value>, DeroMerchantError> {
        let url = format!("{}{}", self.config.base_url(), endpoint);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .timeout(self.timeout)
            .header(USER_AGENT, constants::USER_AGENT)
            .header(API_KEY_HEADER, self.config.api_key());

        if !query.is_empty() {
            request = request.query(query);
        }

        let mut signed = false;
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json");
            if body.signing == Signing::Signed {
                let signature = hmac::sign(&body.json, self.config.secret_key())?;
                request = request.header(SIGNATURE_HEADER, signature);
                signed = true;
            }
            request = request.body(body.json);
        }

        tracing::debug!(%method, url = %url, signed, "sending request");

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DeroMerchantError::Network(format!(
                    "request to {url} timed out after {:?}: {}",
                    self.timeout,
                    error_chain(&e)
                ))
            } else {
                DeroMerchantError::Network(format!("request to {url} failed: {}", error_chain(&e)))
            }
        })?;

        let status = resp.status();
        let resp_url = resp.url().to_string();
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        let bytes = resp.bytes().await.map_err(|e| {
            DeroMerchantError::Network(format!(
                "failed to read response from {resp_url}: {}",
                error_chain(&e)
            ))
        })?;

        tracing::debug!(status = status.as_u16(), url = %resp_url, "response received");

        let parsed = if is_json && !bytes.is_empty() {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(v) => Some(v),
                Err(e) if status.is_success() => return Err(e.into()),
                // An unreadable error body is reported by status below.
                Err(_) => None,
            }
        } else {
            None
        };

        if status.is_success() {
            return Ok(parsed);
        }

        if let Some(envelope) = parsed.and_then(|v| serde_json::from_value::<ErrorEnvelope>(v).ok())
        {
            return Err(DeroMerchantError::Api {
                code: envelope.error.code,
                message: envelope.error.message,
            });
        }

        Err(DeroMerchantError::Transport {
            status: status.as_u16(),
            url: resp_url,
        })
    }
}

fn decode<T: DeserializeOwned>(body: Option<Value>) -> Result<T, DeroMerchantError> {
    Ok(serde_json::from_value(body.unwrap_or(Value::Null))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new(ClientConfig::new("api-key", "2b7e151628aed2a6abf7158809cf4f3c")).unwrap()
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(client().timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_set_timeout() {
        let mut client = client();
        client.set_timeout(Duration::from_secs(3));
        assert_eq!(client.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_pay_helper_url_defaults() {
        assert_eq!(
            client().get_pay_helper_url("abc123"),
            "https://merchant.dero.io/pay/abc123"
        );
    }

    #[test]
    fn test_request_body_keeps_id_order() {
        let body = RequestBody::new(&["b", "a", "c"], Signing::Unsigned).unwrap();
        assert_eq!(body.json, br#"["b","a","c"]"#);
    }

    #[test]
    fn test_decode_missing_body_fails() {
        let result: Result<Payment, _> = decode(None);
        assert!(matches!(result, Err(DeroMerchantError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_sign_failure_surfaces_before_network() {
        let client = Client::new(
            ClientConfig::new("api-key", "xyz")
                .with_scheme("http")
                .with_host("127.0.0.1:1"),
        )
        .unwrap();
        let err = client.create_payment("DERO", 1.0).await.unwrap_err();
        assert!(matches!(err, DeroMerchantError::InvalidKeyEncoding(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = Client::new(
            ClientConfig::new("api-key", "00")
                .with_scheme("http")
                .with_host("127.0.0.1:1"),
        )
        .unwrap();
        let err = client.ping().await.unwrap_err();
        assert!(matches!(err, DeroMerchantError::Network(_)));
        let msg = err.to_string();
        assert!(msg.starts_with("DeroMerchant Client: "));
        // The OS-level cause must survive, not just reqwest's summary.
        assert!(msg.to_lowercase().contains("refused"), "cause lost: {msg}");
    }

    #[tokio::test]
    async fn test_non_finite_amount_is_rejected_before_signing() {
        let client = Client::new(
            ClientConfig::new("api-key", "00")
                .with_scheme("http")
                .with_host("127.0.0.1:1"),
        )
        .unwrap();
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = client.create_payment("DERO", amount).await.unwrap_err();
            assert!(
                matches!(err, DeroMerchantError::InvalidAmount(_)),
                "{amount} gave {err:?}"
            );
        }
    }
}
