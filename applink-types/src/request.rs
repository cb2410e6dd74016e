//! Link creation request types.
//!
//! A [`LinkCreationRequest`] is constructed fresh per `create_app_link` call
//! and is immutable once handed to the native service.

use serde::{Deserialize, Serialize};

use crate::error::LinkDataError;

/// Social preview metadata attached to a created link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMetadata {
    /// Preview title.
    #[serde(default)]
    pub title: String,
    /// Preview description.
    #[serde(default)]
    pub description: String,
    /// Preview image URL.
    #[serde(default)]
    pub image_url: String,
}

/// Per-platform open behavior for a created link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformBehavior {
    /// Open the link target in the browser instead of the app.
    #[serde(default)]
    pub open_in_browser: bool,
    /// Open the link target inside the app when installed.
    #[serde(default = "default_open_in_app")]
    pub open_in_app: bool,
    /// Destination when the app is not installed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

fn default_open_in_app() -> bool {
    true
}

impl Default for PlatformBehavior {
    fn default() -> Self {
        Self {
            open_in_browser: false,
            open_in_app: true,
            fallback_url: None,
        }
    }
}

/// A request to create an app link.
///
/// `url`, `name` and `url_prefix` are required; everything else is optional
/// and defaults to the native SDK's behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCreationRequest {
    /// Destination URL the link routes to.
    pub url: String,
    /// Human-readable link name.
    pub name: String,
    /// Domain prefix the short link is minted under.
    pub url_prefix: String,
    /// Requested short identifier (service assigns one when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    /// Social preview metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_meta: Option<SocialMetadata>,
    /// Android open behavior.
    #[serde(default)]
    pub android: PlatformBehavior,
    /// iOS open behavior.
    #[serde(default)]
    pub ios: PlatformBehavior,
}

impl LinkCreationRequest {
    /// Create a request with the three required fields.
    pub fn new(url: &str, name: &str, url_prefix: &str) -> Self {
        Self {
            url: url.to_string(),
            name: name.to_string(),
            url_prefix: url_prefix.to_string(),
            ..Self::default()
        }
    }

    /// Validate that the required fields are present and non-empty.
    pub fn validate(&self) -> Result<(), LinkDataError> {
        if self.url.is_empty() {
            return Err(LinkDataError::MissingField("url"));
        }
        if self.name.is_empty() {
            return Err(LinkDataError::MissingField("name"));
        }
        if self.url_prefix.is_empty() {
            return Err(LinkDataError::MissingField("urlPrefix"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_validates() {
        let request = LinkCreationRequest::new("https://example.com/page", "promo", "x.co");
        request.validate().unwrap();
        assert_eq!(request.url, "https://example.com/page");
        assert!(request.short_id.is_none());
    }

    #[test]
    fn validate_rejects_empty_url() {
        let request = LinkCreationRequest::new("", "promo", "x.co");
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let request = LinkCreationRequest::new("https://example.com", "", "x.co");
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn validate_rejects_empty_url_prefix() {
        let request = LinkCreationRequest::new("https://example.com", "promo", "");
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("urlPrefix"));
    }

    #[test]
    fn platform_behavior_defaults_to_open_in_app() {
        let behavior = PlatformBehavior::default();
        assert!(behavior.open_in_app);
        assert!(!behavior.open_in_browser);
        assert!(behavior.fallback_url.is_none());
    }

    #[test]
    fn request_serializes_camel_case() {
        let mut request = LinkCreationRequest::new("https://example.com", "promo", "x.co");
        request.ios.fallback_url = Some("https://example.com/get".to_string());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["urlPrefix"], "x.co");
        assert_eq!(json["ios"]["fallbackUrl"], "https://example.com/get");
        assert_eq!(json["android"]["openInApp"], true);
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let request: LinkCreationRequest = serde_json::from_str(
            r#"{"url":"https://example.com","name":"promo","urlPrefix":"x.co"}"#,
        )
        .unwrap();
        request.validate().unwrap();
        assert!(request.android.open_in_app);
        assert!(request.social_meta.is_none());
    }
}
