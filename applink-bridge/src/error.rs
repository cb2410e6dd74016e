//! Error types for the facade.
//!
//! Bridge errors pass through; the facade adds the one error only it can
//! detect: the native module being absent altogether.

use thiserror::Error;

use applink_client::BridgeError;

/// Fixed message for the not-linked failure.
pub const LINKING_ERROR: &str =
    "the native AppLink module is not linked into this binary; register a service before use";

/// Errors from facade operations.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// No native service was registered. Detected eagerly at link time,
    /// never per call.
    #[error("{LINKING_ERROR}")]
    NotLinked,

    /// A bridge-level failure, passed through unchanged.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// The success payload did not match the canonical shape.
    #[error("malformed link response: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_linked_carries_the_fixed_message() {
        let err = FacadeError::NotLinked;
        assert_eq!(err.to_string(), LINKING_ERROR);
    }

    #[test]
    fn bridge_errors_pass_through_transparently() {
        let err: FacadeError = BridgeError::NoReferralData.into();
        assert_eq!(err.to_string(), "no referral data");

        let err: FacadeError = BridgeError::CreationFailed {
            message: "bad url".to_string(),
            status_code: 400,
        }
        .into();
        assert!(err.to_string().contains("bad url"));
        assert!(err.to_string().contains("400"));
    }
}
