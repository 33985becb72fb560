//! Alert record and its JSON decoding

use serde::{Deserialize, Deserializer, Serialize};

use super::AlertError;

/// A single monitoring event.
///
/// Every field is optional on the wire and decodes to its zero value when
/// absent or `null`. Only a non-empty `id` is checked, and only on the create path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    /// Caller-supplied identifier, not required to be unique
    #[serde(rename = "alert_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub service_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub service_name: String,
    /// Originating model or check
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub alert_type: String,
    /// Unix epoch seconds
    #[serde(deserialize_with = "null_as_default")]
    pub alert_ts: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub severity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub team_slack: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Alert {
    /// Create an alert for a service at the given epoch second
    pub fn new(id: impl Into<String>, service_id: impl Into<String>, alert_ts: i64) -> Self {
        Self {
            id: id.into(),
            service_id: service_id.into(),
            alert_ts,
            ..Default::default()
        }
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_alert_type(mut self, alert_type: impl Into<String>) -> Self {
        self.alert_type = alert_type.into();
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = severity.into();
        self
    }

    pub fn with_team_slack(mut self, team: impl Into<String>) -> Self {
        self.team_slack = team.into();
        self
    }

    /// Decode a create request body.
    ///
    /// On a shape mismatch the error still carries the `alert_id` when the
    /// body is well-formed JSON with a string id, so the caller can echo it.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, AlertError> {
        serde_json::from_slice::<Alert>(body).map_err(|e| AlertError::MalformedInput {
            alert_id: recover_alert_id(body),
            message: e.to_string(),
        })
    }

    /// Decode a create request body and reject an empty id
    pub fn decode_for_create(body: &[u8]) -> Result<Self, AlertError> {
        let alert = Self::from_json_slice(body)?;
        if alert.id.is_empty() {
            return Err(AlertError::MissingRequiredField("alert_id"));
        }
        Ok(alert)
    }
}

fn recover_alert_id(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("alert_id").and_then(|id| id.as_str()).map(str::to_string))
        .unwrap_or_default()
}
