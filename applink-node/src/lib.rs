//! # applink-node
//!
//! Node.js native addon for the AppLink bridge via napi-rs.
//!
//! Wraps [`applink_bridge::AppLinkHandle`] into a JavaScript class whose
//! async methods return Promises and whose deep-link events fire registered
//! callbacks. The embedding host installs the real native service with
//! [`register_app_link_service`] before the script side calls
//! `AppLink.link()`.

#![warn(clippy::all)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use napi::bindgen_prelude::*;
use napi::threadsafe_function::{ErrorStrategy, ThreadsafeFunction, ThreadsafeFunctionCallMode};
use napi_derive::napi;

use applink_bridge::{
    AppLinkHandle, CreateLinkResponse, FacadeError, LinkRequest, SharedAppLinkService,
};
use applink_client::HostContext;
use applink_types::DeepLinkEvent;

// ============================================================
// Service registry — the embedding host installs the native
// AppLink service here before the script side links.
// ============================================================

static SERVICE: OnceLock<Mutex<Option<SharedAppLinkService>>> = OnceLock::new();

fn registry() -> &'static Mutex<Option<SharedAppLinkService>> {
    SERVICE.get_or_init(|| Mutex::new(None))
}

/// Install the native AppLink service handle.
///
/// Called from the embedding host (not from JavaScript) before any script
/// code constructs the [`AppLink`] class.
pub fn register_app_link_service(service: SharedAppLinkService) {
    *registry().lock().unwrap() = Some(service);
}

fn registered_service() -> Option<SharedAppLinkService> {
    registry().lock().unwrap().clone()
}

// ============================================================
// FFI types — #[napi(object)] maps to plain JS objects
// ============================================================

/// Parameters for creating an app link.
#[napi(object)]
#[derive(Default)]
pub struct JsLinkRequest {
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
    #[napi(js_name = "iOSFallbackUrl")]
    pub ios_fallback_url: Option<String>,
}

/// Success body of a created link.
#[napi(object)]
pub struct JsLinkMessage {
    /// The minted short link.
    pub short_url: String,
}

/// Normalized result of a createAppLink call.
#[napi(object)]
pub struct JsCreateLinkResponse {
    /// Outcome status, `"SUCCESS"` by construction.
    pub status: String,
    /// Auxiliary payload, when the service supplied one.
    pub data: Option<String>,
    /// Success body carrying the short link.
    pub message: JsLinkMessage,
}

/// A processed deep link, as delivered to onDeepLinkProcessed.
#[napi(object)]
#[derive(Clone)]
pub struct JsDeepLinkProcessed {
    /// The opened URL.
    pub url: String,
    /// Link info from the native service, serialized as JSON text.
    pub result: String,
}

/// A failed deep link, as delivered to onDeepLinkError.
#[napi(object)]
#[derive(Clone)]
pub struct JsDeepLinkError {
    /// The opened URL, empty when the service could not report one.
    pub url: String,
    /// Failure description.
    pub error: String,
}

// ============================================================
// Internal conversion helpers (testable without napi env)
// ============================================================

fn js_request_to_bridge(request: JsLinkRequest) -> LinkRequest {
    LinkRequest {
        url: request.url,
        name: request.name,
        url_prefix: request.url_prefix,
        short_id: request.short_id,
        meta_title: request.meta_title,
        meta_description: request.meta_description,
        meta_image_url: request.meta_image_url,
        is_open_in_browser_android: request.is_open_in_browser_android,
        is_open_in_android_app: request.is_open_in_android_app,
        android_fallback_url: request.android_fallback_url,
        is_open_in_browser_apple: request.is_open_in_browser_apple,
        is_open_in_ios_app: request.is_open_in_ios_app,
        ios_fallback_url: request.ios_fallback_url,
    }
}

fn bridge_response_to_js(response: CreateLinkResponse) -> JsCreateLinkResponse {
    JsCreateLinkResponse {
        status: response.status,
        data: response.data,
        message: JsLinkMessage {
            short_url: response.message.short_url,
        },
    }
}

fn event_to_processed(event: &DeepLinkEvent) -> Option<JsDeepLinkProcessed> {
    match event {
        DeepLinkEvent::Processed { url, result } => Some(JsDeepLinkProcessed {
            url: url.clone(),
            result: serde_json::Value::Object(result.clone()).to_string(),
        }),
        DeepLinkEvent::Error { .. } => None,
    }
}

fn event_to_error(event: &DeepLinkEvent) -> Option<JsDeepLinkError> {
    match event {
        DeepLinkEvent::Error { url, error } => Some(JsDeepLinkError {
            url: url.clone(),
            error: error.clone(),
        }),
        DeepLinkEvent::Processed { .. } => None,
    }
}

fn to_napi_error(err: FacadeError) -> Error {
    Error::from_reason(err.to_string())
}

// ============================================================
// AppLink — the main napi class
// ============================================================

/// The AppLink bridge for JavaScript/TypeScript.
///
/// All async methods return Promises. Create via `AppLink.link()`, which
/// throws synchronously when no native service has been registered.
#[napi]
pub struct AppLink {
    handle: AppLinkHandle,
}

#[napi]
impl AppLink {
    /// Resolve the registered native service and build the bridge.
    ///
    /// Throws the fixed not-linked error synchronously when the embedding
    /// host never registered a service.
    #[napi(factory)]
    pub fn link() -> Result<Self> {
        let handle = AppLinkHandle::link(registered_service()).map_err(to_napi_error)?;
        Ok(Self { handle })
    }

    /// Initialize against the host's foreground context.
    ///
    /// Resolves `true`; rejects only when no package name identifies an
    /// active foreground surface.
    #[napi]
    pub async fn initialize(&self, package_name: Option<String>) -> Result<bool> {
        let context = package_name.map(|name| HostContext::new(&name));
        self.handle.initialize(context).await.map_err(to_napi_error)
    }

    /// Create an app link and resolve with the normalized response.
    #[napi]
    pub async fn create_app_link(&self, request: JsLinkRequest) -> Result<JsCreateLinkResponse> {
        let response = self
            .handle
            .create_app_link(js_request_to_bridge(request))
            .await
            .map_err(to_napi_error)?;
        Ok(bridge_response_to_js(response))
    }

    /// Fetch attributed referral data as a plain object.
    #[napi]
    pub async fn get_referral_details(&self) -> Result<HashMap<String, serde_json::Value>> {
        let details = self
            .handle
            .get_referral_details()
            .await
            .map_err(to_napi_error)?;
        Ok(details.into_iter().collect())
    }

    /// Hand an opened URL to the bridge (new-intent / resume-with-URL).
    #[napi]
    pub async fn handle_intent(&self, url: String) -> Result<()> {
        self.handle.handle_intent(&url).await;
        Ok(())
    }

    /// Subscribe to processed-link events.
    ///
    /// The first subscription (processed or error) receives any buffered
    /// backlog in original emission order.
    #[napi]
    pub fn on_deep_link_processed(
        &self,
        callback: ThreadsafeFunction<JsDeepLinkProcessed, ErrorStrategy::Fatal>,
    ) {
        self.handle.add_listener(Arc::new(move |event| {
            if let Some(payload) = event_to_processed(&event) {
                callback.call(payload, ThreadsafeFunctionCallMode::NonBlocking);
            }
        }));
    }

    /// Subscribe to deep-link failures.
    #[napi]
    pub fn on_deep_link_error(
        &self,
        callback: ThreadsafeFunction<JsDeepLinkError, ErrorStrategy::Fatal>,
    ) {
        self.handle.add_listener(Arc::new(move |event| {
            if let Some(payload) = event_to_error(&event) {
                callback.call(payload, ThreadsafeFunctionCallMode::NonBlocking);
            }
        }));
    }
}

// Conversion helpers are testable without a napi env.

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn js_request_maps_field_for_field() {
        let request = JsLinkRequest {
            url: "https://example.com".to_string(),
            name: "promo".to_string(),
            url_prefix: "x.co".to_string(),
            short_id: Some("abc".to_string()),
            is_open_in_android_app: Some(false),
            ios_fallback_url: Some("https://example.com/get".to_string()),
            ..JsLinkRequest::default()
        };

        let bridge = js_request_to_bridge(request);
        assert_eq!(bridge.url, "https://example.com");
        assert_eq!(bridge.short_id.as_deref(), Some("abc"));
        assert_eq!(bridge.is_open_in_android_app, Some(false));
        assert_eq!(
            bridge.ios_fallback_url.as_deref(),
            Some("https://example.com/get")
        );

        let structured = bridge.into_creation_request();
        assert!(!structured.android.open_in_app);
        assert!(structured.ios.open_in_app);
    }

    #[test]
    fn bridge_response_maps_to_js_shape() {
        let response = CreateLinkResponse::from_payload(&json!(
            r#"{"status":"SUCCESS","message":{"shortUrl":"https://x.co/abc"}}"#
        ))
        .unwrap();

        let js = bridge_response_to_js(response);
        assert_eq!(js.status, "SUCCESS");
        assert_eq!(js.message.short_url, "https://x.co/abc");
        assert!(js.data.is_none());
    }

    #[test]
    fn processed_event_serializes_link_info_as_json_text() {
        let mut info = Map::new();
        info.insert("campaign".to_string(), json!("spring"));
        let event = DeepLinkEvent::Processed {
            url: "https://x.co/abc".to_string(),
            result: info,
        };

        let payload = event_to_processed(&event).unwrap();
        assert_eq!(payload.url, "https://x.co/abc");
        assert_eq!(payload.result, r#"{"campaign":"spring"}"#);
        assert!(event_to_error(&event).is_none());
    }

    #[test]
    fn error_event_maps_to_error_payload_only() {
        let event = DeepLinkEvent::Error {
            url: String::new(),
            error: "Failed to process deep link".to_string(),
        };

        let payload = event_to_error(&event).unwrap();
        assert_eq!(payload.url, "");
        assert_eq!(payload.error, "Failed to process deep link");
        assert!(event_to_processed(&event).is_none());
    }

    #[test]
    fn not_linked_error_is_the_fixed_message() {
        let err = to_napi_error(FacadeError::NotLinked);
        assert_eq!(err.reason, applink_bridge::LINKING_ERROR);
    }
}
