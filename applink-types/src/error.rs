//! Error types for the AppLink data model.

use thiserror::Error;

/// Errors that can occur while validating or decoding link data.
#[derive(Debug, Error)]
pub enum LinkDataError {
    /// A required link-creation field is missing or empty.
    #[error("missing required parameter: {0}")]
    MissingField(&'static str),

    /// The native payload could not be decoded.
    #[error("malformed link payload: {0}")]
    MalformedPayload(String),
}
