use thiserror::Error;

/// Errors returned by DERO Merchant client operations.
///
/// Every variant renders with a `DeroMerchant Client:` prefix so the SDK is
/// identifiable as the reporting layer when errors are bubbled up and logged
/// by the caller.
#[derive(Debug, Error)]
pub enum DeroMerchantError {
    /// The secret key used for signing is not valid hexadecimal.
    #[error("DeroMerchant Client: invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// The API answered with its `{"error": {"code", "message"}}` object.
    #[error("DeroMerchant Client: API Error {code}: {message}")]
    Api { code: i64, message: String },

    /// Non-2xx response without a structured error body.
    #[error("DeroMerchant Client: {}", describe_status(.status, .url))]
    Transport { status: u16, url: String },

    /// The request did not complete (connect, DNS, timeout, body read).
    #[error("DeroMerchant Client: {0}")]
    Network(String),

    /// The payment amount is NaN or infinite and has no JSON encoding.
    #[error("DeroMerchant Client: invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("DeroMerchant Client: serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("DeroMerchant Client: config error: {0}")]
    Config(String),
}

fn describe_status(status: &u16, url: &str) -> String {
    if *status == 404 {
        format!("error 404: page {url} not found")
    } else {
        format!("error {status} returned by {url}")
    }
}

/// `err` followed by every `source()` below it, joined with `: `.
///
/// reqwest's own message only names the URL; the actual cause (connection
/// refused, DNS failure, TLS) sits further down the chain.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}

impl DeroMerchantError {
    /// The API error code, if the service reported one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// `true` for a bare 404 without an API error body.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Transport { status: 404, .. })
    }
}
