//! Deep-link delivery events.

use serde::Serialize;
use serde_json::{Map, Value};

/// A single processed-or-failed deep link, relayed from the native service.
///
/// Exactly one of the two payloads exists per event; the enum enforces the
/// mutual exclusion the wire format only implied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeepLinkEvent {
    /// The native service resolved the link.
    Processed {
        /// The opened URL.
        url: String,
        /// Opaque link info from the native service.
        result: Map<String, Value>,
    },
    /// The native service failed to process the link.
    Error {
        /// The opened URL, empty when the service could not report one.
        url: String,
        /// Failure description.
        error: String,
    },
}

impl DeepLinkEvent {
    /// Name of the event on the script-facing boundary.
    pub fn name(&self) -> &'static str {
        match self {
            DeepLinkEvent::Processed { .. } => "onDeepLinkProcessed",
            DeepLinkEvent::Error { .. } => "onDeepLinkError",
        }
    }

    /// The URL this event refers to.
    pub fn url(&self) -> &str {
        match self {
            DeepLinkEvent::Processed { url, .. } => url,
            DeepLinkEvent::Error { url, .. } => url,
        }
    }
}
