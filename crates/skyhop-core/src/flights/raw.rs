//! Loosely typed AviationStack payloads.
//!
//! Every field is optional and every field is lenient: a value of the wrong JSON type is
//! treated as absent instead of failing the whole response. Nothing in here escapes the
//! crate's public lookup API; `normalize` is the only consumer.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawFlight {
    #[serde(deserialize_with = "lenient_string")]
    pub flight_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub flight_status: Option<String>,
    #[serde(deserialize_with = "lenient_nested")]
    pub departure: Option<RawEndpoint>,
    #[serde(deserialize_with = "lenient_nested")]
    pub arrival: Option<RawEndpoint>,
    #[serde(deserialize_with = "lenient_nested")]
    pub airline: Option<RawAirline>,
    #[serde(deserialize_with = "lenient_nested")]
    pub flight: Option<RawDesignator>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawEndpoint {
    #[serde(deserialize_with = "lenient_string")]
    pub airport: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub iata: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub scheduled: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub estimated: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub actual: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub terminal: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub gate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawAirline {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub iata: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawDesignator {
    #[serde(deserialize_with = "lenient_string")]
    pub number: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub iata: Option<String>,
}

impl RawFlight {
    /// Never fails: anything that is not a JSON object reads as an empty record.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        RawFlight::deserialize(value).unwrap_or_default()
    }
}

/// Error envelope, e.g. `{"error": {"code": "usage_limit_reached", "message": "..."}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderError {
    pub code: String,
    pub message: String,
}

impl ProviderError {
    pub const HTTPS_RESTRICTED: &'static str = "https_access_restricted";

    /// The plan does not allow HTTPS; the same request over HTTP may work.
    pub fn requires_insecure_transport(&self) -> bool {
        self.code == Self::HTTPS_RESTRICTED
    }

    /// The key itself is missing or wrong, as opposed to a transient or plan problem.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self.code.as_str(), "missing_access_key" | "invalid_access_key")
    }
}

/// Top level shape of a `/v1/flights` response.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderPayload {
    Data(Vec<RawFlight>),
    Error(ProviderError),
}

impl ProviderPayload {
    /// Parses a response body. An `error` object wins over `data`; a missing or
    /// non-array `data` reads as no flights. Non-JSON or non-object bodies are errors.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;
        let Some(obj) = value.as_object() else {
            return Err(serde::de::Error::custom("response body is not a JSON object"));
        };

        if let Some(err) = obj.get("error").filter(|e| e.is_object()) {
            return Ok(ProviderPayload::Error(ProviderError {
                code: value_to_string(err.get("code")).unwrap_or_default(),
                message: value_to_string(err.get("message")).unwrap_or_default(),
            }));
        }

        let flights = obj
            .get("data")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(RawFlight::from_value).collect())
            .unwrap_or_default();
        Ok(ProviderPayload::Data(flights))
    }
}

fn value_to_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value_to_string(value.as_ref()))
}

fn lenient_nested<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}
