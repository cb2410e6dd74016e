//! The OS-level "app opened via link" signal.

/// A canonical link-open signal, regardless of which host OS mechanism
/// (resume-with-URL, new-intent) delivered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkIntent {
    /// The URL the app was opened with.
    pub url: String,
}

impl LinkIntent {
    /// Create an intent for the given URL.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}
