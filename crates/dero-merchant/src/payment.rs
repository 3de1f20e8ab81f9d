use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A payment resource as returned by the API.
///
/// The SDK does not model payment state; the object is kept as the service
/// sent it and can be read field by field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payment(Map<String, Value>);

impl Payment {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(Value::as_str)
    }

    pub fn currency(&self) -> Option<&str> {
        self.get("currency").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Payment {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// One page of the filtered payment listing.
///
/// `payments` is decoded; pagination metadata (limit, page, totals) is kept
/// untyped in `meta`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub payments: Vec<Payment>,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

// An empty listing may come back as `"payments": null`.
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Payment>, D::Error> {
    Ok(Option::<Vec<Payment>>::deserialize(d)?.unwrap_or_default())
}

/// Body of `POST /payment`. Field order is the serialization order.
#[derive(Debug, Serialize)]
pub(crate) struct CreatePaymentRequest<'a> {
    pub currency: &'a str,
    pub amount: f64,
}

/// Query parameters of `GET /payments`. Unset or empty values are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
    pub filter_status: Option<String>,
    pub filter_currency: Option<String>,
}

impl PaymentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    pub fn order_by(mut self, order: impl Into<String>) -> Self {
        self.order_by = Some(order.into());
        self
    }

    pub fn filter_status(mut self, status: impl Into<String>) -> Self {
        self.filter_status = Some(status.into());
        self
    }

    pub fn filter_currency(mut self, currency: impl Into<String>) -> Self {
        self.filter_currency = Some(currency.into());
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let numbers = [("limit", self.limit), ("page", self.page)];
        let strings = [
            ("sort_by", &self.sort_by),
            ("order_by", &self.order_by),
            ("filter_status", &self.filter_status),
            ("filter_currency", &self.filter_currency),
        ];

        numbers
            .into_iter()
            .filter_map(|(name, v)| v.map(|n| (name, n.to_string())))
            .chain(strings.into_iter().filter_map(|(name, v)| {
                v.as_ref()
                    .filter(|s| !s.is_empty())
                    .map(|s| (name, s.clone()))
            }))
            .collect()
    }
}
