//! Mock AppLink service for testing.
//!
//! Allows queueing link-creation payloads, capturing handled URLs and
//! firing deep-link outcomes by hand.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value};

use applink_types::LinkCreationRequest;

use super::{AppLinkService, LinkOutcome, OutcomeListener, ServiceError};

/// Mock AppLink service for testing.
///
/// Allows queueing link-creation payloads, capturing handled URLs and
/// firing deep-link outcomes by hand.
#[derive(Default)]
pub struct MockAppLinkService {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Default)]
struct MockInner {
    listener: Option<OutcomeListener>,
    initialize_calls: usize,
    link_payloads: VecDeque<Value>,
    created_requests: Vec<LinkCreationRequest>,
    handled_links: Vec<(String, String)>,
    referral_record: Option<Map<String, Value>>,
    fail_next_create: Option<String>,
    fail_next_referral: Option<String>,
    fail_next_handle: Option<String>,
}

impl MockAppLinkService {
    /// Create a new mock service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a payload to be returned by the next `create_app_link()` call.
    pub fn queue_link_payload(&self, payload: Value) {
        let mut inner = self.inner.lock().unwrap();
        inner.link_payloads.push_back(payload);
    }

    /// Set the referral record returned by `get_referral_details()`.
    pub fn set_referral_record(&self, record: Map<String, Value>) {
        let mut inner = self.inner.lock().unwrap();
        inner.referral_record = Some(record);
    }

    /// Cause the next `create_app_link()` to fault with the given error.
    pub fn fail_next_create(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_create = Some(error.to_string());
    }

    /// Cause the next `get_referral_details()` to fault with the given error.
    pub fn fail_next_referral(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_referral = Some(error.to_string());
    }

    /// Cause the next `handle_deep_link()` to fault with the given error.
    pub fn fail_next_handle(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_handle = Some(error.to_string());
    }

    /// Fire a processed-link outcome through the registered callback.
    pub fn fire_processed(&self, url: &str, info: Map<String, Value>) {
        if let Some(listener) = self.listener() {
            listener(LinkOutcome::Processed {
                url: url.to_string(),
                info,
            });
        }
    }

    /// Fire a failed-link outcome through the registered callback.
    pub fn fire_error(&self, url: Option<&str>, error: &str) {
        if let Some(listener) = self.listener() {
            listener(LinkOutcome::Failed {
                url: url.map(str::to_string),
                error: error.to_string(),
            });
        }
    }

    /// Whether an outcome callback has been registered.
    pub fn has_listener(&self) -> bool {
        self.inner.lock().unwrap().listener.is_some()
    }

    /// Number of `initialize()` calls seen.
    pub fn initialize_calls(&self) -> usize {
        self.inner.lock().unwrap().initialize_calls
    }

    /// All requests passed to `create_app_link()`.
    pub fn created_requests(&self) -> Vec<LinkCreationRequest> {
        self.inner.lock().unwrap().created_requests.clone()
    }

    /// All `(url, package_name)` pairs passed to `handle_deep_link()`.
    pub fn handled_links(&self) -> Vec<(String, String)> {
        self.inner.lock().unwrap().handled_links.clone()
    }

    fn listener(&self) -> Option<OutcomeListener> {
        self.inner.lock().unwrap().listener.clone()
    }
}

impl Clone for MockAppLinkService {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl AppLinkService for MockAppLinkService {
    async fn initialize(&self, listener: OutcomeListener) {
        let mut inner = self.inner.lock().unwrap();
        inner.listener = Some(listener);
        inner.initialize_calls += 1;
    }

    async fn create_app_link(&self, request: &LinkCreationRequest) -> Result<Value, ServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.created_requests.push(request.clone());

        if let Some(error) = inner.fail_next_create.take() {
            return Err(ServiceError::Faulted(error));
        }

        inner
            .link_payloads
            .pop_front()
            .ok_or(ServiceError::Unavailable)
    }

    async fn get_referral_details(&self) -> Result<Option<Map<String, Value>>, ServiceError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_referral.take() {
            return Err(ServiceError::Faulted(error));
        }

        Ok(inner.referral_record.clone())
    }

    async fn handle_deep_link(&self, url: &str, package_name: &str) -> Result<(), ServiceError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_handle.take() {
            return Err(ServiceError::Faulted(error));
        }

        inner
            .handled_links
            .push((url.to_string(), package_name.to_string()));
        Ok(())
    }
}
