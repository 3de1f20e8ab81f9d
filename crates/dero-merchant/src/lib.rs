//! Rust SDK for the DERO Merchant REST API.
//!
//! Create and look up payments, build the customer pay helper URL, and
//! verify the signature of webhook notifications.
//!
//! # Quick example
//!
//! ```no_run
//! use dero_merchant::{Client, ClientConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), dero_merchant::DeroMerchantError> {
//! let client = Client::new(ClientConfig::new("API_KEY", "HEX_SECRET_KEY"))?;
//!
//! let payment = client.create_payment("USD", 1.5).await?;
//! println!("status: {:?}", payment.status());
//! # Ok(())
//! # }
//! ```
//!
//! # Webhooks
//!
//! ```
//! use dero_merchant::verify_webhook_signature;
//!
//! let raw_body = br#"{"paymentID":"abc123","status":"paid"}"#;
//! let header = "85121bd50e7142a4cc0d01670185d043220fb73e37d00f86bfd194686ef31719";
//! assert!(verify_webhook_signature(raw_body, header, "2b7e151628aed2a6abf7158809cf4f3c"));
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod hmac;
pub mod payment;
pub mod webhook;

pub use client::Client;
pub use config::ClientConfig;
pub use error::DeroMerchantError;
pub use payment::{Payment, PaymentFilter, PaymentPage};
pub use webhook::{verify_webhook_signature, WEBHOOK_SIGNATURE_HEADER};
