//! FFI-friendly types for the facade.
//!
//! All types here are flat — no generics, no lifetimes. [`LinkRequest`]
//! mirrors the script-side parameter object field for field;
//! [`CreateLinkResponse`] is the single canonical success shape every
//! caller sees, whichever form the native layer produced.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use applink_types::{LinkCreationRequest, PlatformBehavior, SocialMetadata};

use crate::error::FacadeError;

/// Flat link-creation request, one field per script-side parameter.
#[derive(Debug, Clone, Default)]
pub struct LinkRequest {
    /// Destination URL the link routes to.
    pub url: String,
    /// Human-readable link name.
    pub name: String,
    /// Domain prefix the short link is minted under.
    pub url_prefix: String,
    /// Requested short identifier.
    pub short_id: Option<String>,
    /// Social preview title.
    pub meta_title: Option<String>,
    /// Social preview description.
    pub meta_description: Option<String>,
    /// Social preview image URL.
    pub meta_image_url: Option<String>,
    /// Open in the browser on Android (default false).
    pub is_open_in_browser_android: Option<bool>,
    /// Open inside the Android app when installed (default true).
    pub is_open_in_android_app: Option<bool>,
    /// Android fallback URL when the app is not installed.
    pub android_fallback_url: Option<String>,
    /// Open in the browser on iOS (default false).
    pub is_open_in_browser_apple: Option<bool>,
    /// Open inside the iOS app when installed (default true).
    pub is_open_in_ios_app: Option<bool>,
    /// iOS fallback URL when the app is not installed.
    pub ios_fallback_url: Option<String>,
}

impl LinkRequest {
    /// Convert into the structured bridge request, applying the native
    /// module's defaults for absent flags.
    pub fn into_creation_request(self) -> LinkCreationRequest {
        let social_meta = if self.meta_title.is_some()
            || self.meta_description.is_some()
            || self.meta_image_url.is_some()
        {
            Some(SocialMetadata {
                title: self.meta_title.unwrap_or_default(),
                description: self.meta_description.unwrap_or_default(),
                image_url: self.meta_image_url.unwrap_or_default(),
            })
        } else {
            None
        };

        LinkCreationRequest {
            url: self.url,
            name: self.name,
            url_prefix: self.url_prefix,
            short_id: self.short_id,
            social_meta,
            android: PlatformBehavior {
                open_in_browser: self.is_open_in_browser_android.unwrap_or(false),
                open_in_app: self.is_open_in_android_app.unwrap_or(true),
                fallback_url: self.android_fallback_url.filter(|u| !u.is_empty()),
            },
            ios: PlatformBehavior {
                open_in_browser: self.is_open_in_browser_apple.unwrap_or(false),
                open_in_app: self.is_open_in_ios_app.unwrap_or(true),
                fallback_url: self.ios_fallback_url.filter(|u| !u.is_empty()),
            },
        }
    }
}

/// Success body of a created link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMessage {
    /// The minted short link.
    #[serde(default)]
    pub short_url: String,
}

/// The canonical link-creation success shape.
///
/// The native layer returns this either structured or serialized as a
/// string; [`CreateLinkResponse::from_payload`] accepts both so callers
/// always see this one shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    /// Outcome status, `"SUCCESS"` here by construction.
    pub status: String,
    /// Auxiliary payload, when the service supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Success body carrying the short link.
    #[serde(default)]
    pub message: LinkMessage,
}

impl CreateLinkResponse {
    /// Normalize a raw native payload into the canonical shape.
    pub fn from_payload(raw: &Value) -> Result<Self, FacadeError> {
        match raw {
            Value::String(text) => serde_json::from_str(text)
                .map_err(|e| FacadeError::MalformedResponse(e.to_string())),
            other => serde_json::from_value(other.clone())
                .map_err(|e| FacadeError::MalformedResponse(e.to_string())),
        }
    }
}
