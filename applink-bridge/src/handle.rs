//! AppLinkHandle — concrete wrapper around `AppLinkBridge<S>`.
//!
//! Monomorphizes the generic bridge over a shared `dyn` service handle so
//! binding crates never see a type parameter.

use std::sync::Arc;

use serde_json::{Map, Value};

use applink_client::{AppLinkBridge, AppLinkService, EventListener, HostContext};
use applink_types::DeepLinkEvent;

use crate::error::FacadeError;
use crate::types::{CreateLinkResponse, LinkRequest};

/// Shared handle to whatever native service the host registered.
pub type SharedAppLinkService = Arc<dyn AppLinkService>;

/// Concrete AppLink handle for FFI consumers.
///
/// All methods use owned types (`String`, maps) across the boundary.
pub struct AppLinkHandle {
    bridge: AppLinkBridge<SharedAppLinkService>,
}

impl AppLinkHandle {
    /// Resolve the native service and build the handle.
    ///
    /// This is the fail-fast not-linked gate: an absent service yields
    /// [`FacadeError::NotLinked`] here, synchronously, never later as a
    /// rejected call.
    pub fn link(service: Option<SharedAppLinkService>) -> Result<Self, FacadeError> {
        let service = service.ok_or(FacadeError::NotLinked)?;
        Ok(Self {
            bridge: AppLinkBridge::new(service),
        })
    }

    /// Initialize against the host's foreground context. Resolves `true`.
    pub async fn initialize(&self, context: Option<HostContext>) -> Result<bool, FacadeError> {
        Ok(self.bridge.initialize(context).await?)
    }

    /// Create an app link and normalize the payload to the canonical shape.
    pub async fn create_app_link(
        &self,
        request: LinkRequest,
    ) -> Result<CreateLinkResponse, FacadeError> {
        let raw = self
            .bridge
            .create_app_link(&request.into_creation_request())
            .await?;
        CreateLinkResponse::from_payload(&raw)
    }

    /// Fetch attributed referral data as a flat key-value map.
    pub async fn get_referral_details(&self) -> Result<Map<String, Value>, FacadeError> {
        Ok(self.bridge.get_referral_details().await?)
    }

    /// Accept a link-open signal from the host.
    pub async fn handle_intent(&self, url: &str) {
        self.bridge.handle_intent(url).await;
    }

    /// Subscribe to processed-link events as `(url, link info)` pairs.
    ///
    /// Attaching counts as the first listener for backlog-flush purposes.
    pub fn on_deep_link_processed<F>(&self, callback: F)
    where
        F: Fn(String, Map<String, Value>) + Send + Sync + 'static,
    {
        self.add_listener(Arc::new(move |event| {
            if let DeepLinkEvent::Processed { url, result } = event {
                callback(url, result);
            }
        }));
    }

    /// Subscribe to deep-link failures as `(url, error)` pairs.
    pub fn on_deep_link_error<F>(&self, callback: F)
    where
        F: Fn(String, String) + Send + Sync + 'static,
    {
        self.add_listener(Arc::new(move |event| {
            if let DeepLinkEvent::Error { url, error } = event {
                callback(url, error);
            }
        }));
    }

    /// Attach a raw event listener.
    pub fn add_listener(&self, listener: EventListener) {
        self.bridge.add_listener(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applink_client::{BridgeError, MockAppLinkService};
    use serde_json::json;
    use std::sync::Mutex;

    fn linked() -> (AppLinkHandle, MockAppLinkService) {
        let service = MockAppLinkService::new();
        let shared: SharedAppLinkService = Arc::new(service.clone());
        (AppLinkHandle::link(Some(shared)).unwrap(), service)
    }

    fn request() -> LinkRequest {
        LinkRequest {
            url: "https://example.com".to_string(),
            name: "promo".to_string(),
            url_prefix: "x.co".to_string(),
            ..LinkRequest::default()
        }
    }

    // --- not-linked gate ---

    #[test]
    fn linking_without_a_service_fails_synchronously() {
        let err = AppLinkHandle::link(None).err().unwrap();
        assert!(matches!(err, FacadeError::NotLinked));
    }

    // --- create_app_link normalization ---

    #[tokio::test]
    async fn string_payload_is_normalized_for_callers() {
        let (handle, service) = linked();
        service.queue_link_payload(json!(
            r#"{"status":"SUCCESS","message":{"shortUrl":"https://x.co/abc"}}"#
        ));

        let response = handle.create_app_link(request()).await.unwrap();
        assert_eq!(response.status, "SUCCESS");
        assert_eq!(response.message.short_url, "https://x.co/abc");
    }

    #[tokio::test]
    async fn structured_payload_is_passed_through_normalized() {
        let (handle, service) = linked();
        service
            .queue_link_payload(json!({"status": "SUCCESS", "message": {"shortUrl": "https://x.co/s"}}));

        let response = handle.create_app_link(request()).await.unwrap();
        assert_eq!(response.message.short_url, "https://x.co/s");
    }

    #[tokio::test]
    async fn creation_failure_surfaces_the_bridge_error() {
        let (handle, service) = linked();
        service.queue_link_payload(json!({
            "status": "ERROR", "message": "bad url", "statusCode": 400
        }));

        let err = handle.create_app_link(request()).await.unwrap_err();
        match err {
            FacadeError::Bridge(BridgeError::CreationFailed {
                message,
                status_code,
            }) => {
                assert_eq!(message, "bad url");
                assert_eq!(status_code, 400);
            }
            other => panic!("expected CreationFailed, got {other:?}"),
        }
    }

    // --- referral ---

    #[tokio::test]
    async fn missing_referral_record_rejects() {
        let (handle, _service) = linked();
        let err = handle.get_referral_details().await.unwrap_err();
        assert!(matches!(
            err,
            FacadeError::Bridge(BridgeError::NoReferralData)
        ));
    }

    // --- typed event helpers ---

    #[tokio::test]
    async fn processed_helper_sees_backlog_and_skips_errors() {
        let (handle, service) = linked();
        handle
            .initialize(Some(HostContext::new("com.example.app")))
            .await
            .unwrap();

        let mut info = Map::new();
        info.insert("campaign".to_string(), json!("spring"));
        service.fire_processed("https://x.co/a", info);
        service.fire_error(Some("https://x.co/b"), "no match");

        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        handle.on_deep_link_processed(move |url, result| {
            sink.lock()
                .unwrap()
                .push(format!("{url}:{}", result["campaign"]));
        });

        assert_eq!(*seen.lock().unwrap(), vec![r#"https://x.co/a:"spring""#]);
    }

    #[tokio::test]
    async fn error_helper_receives_failures() {
        let (handle, service) = linked();
        handle
            .initialize(Some(HostContext::new("com.example.app")))
            .await
            .unwrap();

        let seen: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        handle.on_deep_link_error(move |url, error| {
            sink.lock().unwrap().push((url, error));
        });

        service.fire_error(None, "Failed to process deep link");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(String::new(), "Failed to process deep link".to_string())]
        );
    }

    // --- intent pass-through ---

    #[tokio::test]
    async fn handle_intent_parks_until_initialize() {
        let (handle, service) = linked();
        handle.handle_intent("https://x.co/pending").await;
        assert!(service.handled_links().is_empty());

        handle
            .initialize(Some(HostContext::new("com.example.app")))
            .await
            .unwrap();
        assert_eq!(service.handled_links().len(), 1);
    }
}
