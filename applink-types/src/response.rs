//! Native link-creation payload handling.
//!
//! The native service answers `create_app_link` with an opaque JSON value
//! that historically arrived in two forms: a structured object or that same
//! object serialized as a string. [`NativeLinkOutcome`] probes either form
//! for the fields the bridge must discriminate on; the full payload is passed
//! through untouched otherwise.

use serde::Deserialize;
use serde_json::Value;

use crate::error::LinkDataError;

/// Status value the native service reports on success.
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// The discriminating fields of a native link-creation payload.
///
/// `message` is a `{ "shortUrl": .. }` object on success and a plain string
/// on failure; consumers must discriminate on presence, not shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeLinkOutcome {
    /// Outcome status; exactly `"SUCCESS"` on success.
    pub status: String,
    /// Failure message (string) or success body (object).
    #[serde(default)]
    pub message: Option<Value>,
    /// Numeric failure code, when the service supplied one.
    #[serde(default)]
    pub status_code: Option<i64>,
}

impl NativeLinkOutcome {
    /// Decode the discriminating fields from a raw payload.
    ///
    /// Accepts both the structured form and the serialized-string form.
    pub fn from_payload(raw: &Value) -> Result<Self, LinkDataError> {
        match raw {
            Value::String(text) => serde_json::from_str(text)
                .map_err(|e| LinkDataError::MalformedPayload(e.to_string())),
            other => serde_json::from_value(other.clone())
                .map_err(|e| LinkDataError::MalformedPayload(e.to_string())),
        }
    }

    /// Whether the payload reports success.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Failure message as text, defaulting like the original module did.
    pub fn failure_message(&self) -> String {
        match &self.message {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => "Unknown error".to_string(),
        }
    }

    /// Numeric failure code, defaulting to 500.
    pub fn failure_code(&self) -> i64 {
        self.status_code.unwrap_or(500)
    }
}
