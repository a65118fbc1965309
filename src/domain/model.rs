use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A shipping method as returned by the platform.
///
/// Only `id` is typed. Every other field stays in `fields` exactly as received
/// (nulls and timestamp formatting included); the accessors read from there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ShippingMethod {
    pub fn key(&self) -> Option<&str> {
        self.fields.get("key").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<u64> {
        self.fields.get("version").and_then(Value::as_u64)
    }

    pub fn active(&self) -> Option<bool> {
        self.fields.get("active").and_then(Value::as_bool)
    }

    pub fn is_default(&self) -> Option<bool> {
        self.fields.get("isDefault").and_then(Value::as_bool)
    }

    pub fn zone_rates(&self) -> Option<&Vec<Value>> {
        self.fields.get("zoneRates").and_then(Value::as_array)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("createdAt")
    }

    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("lastModifiedAt")
    }

    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
    }
}

/// Paged envelope returned by list and matching queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethodPagedQueryResponse {
    pub limit: u64,
    pub offset: u64,
    pub count: u64,
    pub results: Vec<ShippingMethod>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ShippingMethodPagedQueryResponse {
    /// Only present when the query asked the platform to compute it.
    pub fn total(&self) -> Option<u64> {
        self.fields.get("total").and_then(Value::as_u64)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter_map(ShippingMethod::key)
            .collect()
    }
}
