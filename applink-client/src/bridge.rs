//! AppLinkBridge - the bridge module.
//!
//! This module provides [`AppLinkBridge`], the primary API for marshalling
//! calls into the injected [`AppLinkService`] and relaying its deep-link
//! callbacks as [`DeepLinkEvent`]s.
//!
//! All work is single-flow call/response: every entry point either returns
//! synchronously or suspends until exactly one service callback completes.
//! There is no retry, no timeout and no cancellation here; every failure
//! surfaces as a single terminal [`BridgeError`] and retry policy belongs to
//! the caller.

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use thiserror::Error;

use applink_core::{DeliveryAction, DeliveryEvent, DeliveryState, Dispatch, PendingEventBuffer};
use applink_types::{
    coerce_referral_fields, DeepLinkEvent, LinkCreationRequest, LinkIntent, NativeLinkOutcome,
};

use crate::service::{AppLinkService, LinkOutcome, OutcomeListener};

/// Bridge errors. All terminal for the call that produced them.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No foreground context to attach the service to during initialize.
    #[error("no active foreground context")]
    NoActiveContext,

    /// Required link-creation fields are missing.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The service reported a non-success status or faulted.
    #[error("link creation failed ({status_code}): {message}")]
    CreationFailed {
        /// Failure message from the service.
        message: String,
        /// Numeric failure code from the service, 500 when it supplied none.
        status_code: i64,
    },

    /// The referral lookup found no attributed data.
    #[error("no referral data")]
    NoReferralData,

    /// The referral lookup raised an unexpected fault.
    #[error("referral lookup failed: {0}")]
    LookupFailed(String),

    /// The service payload could not be decoded.
    #[error("invalid native response: {0}")]
    InvalidResponse(String),
}

/// The host's foreground surface the service attaches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    /// Application package / bundle identifier.
    pub package_name: String,
}

impl HostContext {
    /// Create a context for the given package identifier.
    pub fn new(package_name: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
        }
    }
}

/// A deep-link event listener.
pub type EventListener = Arc<dyn Fn(DeepLinkEvent) + Send + Sync>;

/// The bridge module.
///
/// Owns the pending-intent slot and the pending-event buffer; holds the
/// injected service handle for its entire lifetime without owning the
/// service itself.
pub struct AppLinkBridge<S: AppLinkService> {
    service: S,
    delivery: Mutex<DeliveryState>,
    context: Mutex<Option<HostContext>>,
    relay: Arc<Mutex<EventRelay>>,
}

impl<S: AppLinkService> AppLinkBridge<S> {
    /// Create a bridge around an injected service handle.
    pub fn new(service: S) -> Self {
        Self {
            service,
            delivery: Mutex::new(DeliveryState::new()),
            context: Mutex::new(None),
            relay: Arc::new(Mutex::new(EventRelay::new())),
        }
    }

    /// Initialize the bridge against the host's foreground context.
    ///
    /// Registers the deep-link outcome callback with the service and flushes
    /// a pending intent if one arrived pre-init. Resolves `true`
    /// unconditionally: deep-link outcomes are events, never this call's
    /// result. Fails only when `context` is `None`.
    pub async fn initialize(&self, context: Option<HostContext>) -> Result<bool, BridgeError> {
        let context = context.ok_or(BridgeError::NoActiveContext)?;
        *self.context.lock().unwrap() = Some(context);

        let relay = Arc::clone(&self.relay);
        let listener: OutcomeListener = Arc::new(move |outcome| {
            let event = match outcome {
                LinkOutcome::Processed { url, info } => {
                    tracing::debug!(url = %url, "deep link processed");
                    DeepLinkEvent::Processed { url, result: info }
                }
                LinkOutcome::Failed { url, error } => {
                    tracing::error!(error = %error, "deep link error");
                    DeepLinkEvent::Error {
                        url: url.unwrap_or_default(),
                        error,
                    }
                }
            };
            dispatch(&relay, event);
        });
        self.service.initialize(listener).await;

        let actions = self.apply(DeliveryEvent::ServiceInitialized);
        self.forward(actions).await;
        Ok(true)
    }

    /// Create an app link, resolving with the raw service payload.
    ///
    /// Rejects with [`BridgeError::CreationFailed`] on any non-success
    /// status; the facade normalizes the success payload's shape.
    pub async fn create_app_link(
        &self,
        request: &LinkCreationRequest,
    ) -> Result<Value, BridgeError> {
        request
            .validate()
            .map_err(|e| BridgeError::InvalidParameters(e.to_string()))?;

        let raw = self
            .service
            .create_app_link(request)
            .await
            .map_err(|e| BridgeError::CreationFailed {
                message: e.to_string(),
                status_code: 500,
            })?;

        let outcome = NativeLinkOutcome::from_payload(&raw)
            .map_err(|e| BridgeError::InvalidResponse(e.to_string()))?;
        if outcome.is_success() {
            Ok(raw)
        } else {
            Err(BridgeError::CreationFailed {
                message: outcome.failure_message(),
                status_code: outcome.failure_code(),
            })
        }
    }

    /// Fetch attributed referral data as a coerced key-value map.
    ///
    /// Rejects with [`BridgeError::NoReferralData`] when the service has no
    /// record; never resolves with an absent value.
    pub async fn get_referral_details(&self) -> Result<Map<String, Value>, BridgeError> {
        let record = self
            .service
            .get_referral_details()
            .await
            .map_err(|e| BridgeError::LookupFailed(e.to_string()))?;

        match record {
            Some(fields) => Ok(coerce_referral_fields(fields)),
            None => Err(BridgeError::NoReferralData),
        }
    }

    /// Accept a link-open signal from the host.
    ///
    /// Forwards immediately once initialized; otherwise parks the URL in the
    /// single pending slot, overwriting any previous one.
    pub async fn handle_intent(&self, url: &str) {
        let actions = self.apply(DeliveryEvent::LinkOpened(LinkIntent::new(url)));
        self.forward(actions).await;
    }

    /// Attach a deep-link event listener.
    ///
    /// The first listener ever attached receives the buffered backlog in
    /// original emission order before any live event.
    pub fn add_listener(&self, listener: EventListener) {
        let backlog = self.relay.lock().unwrap().attach(Arc::clone(&listener));
        for event in backlog {
            listener(event);
        }
    }

    fn apply(&self, event: DeliveryEvent) -> Vec<DeliveryAction> {
        let mut guard = self.delivery.lock().unwrap();
        let (next, actions) = std::mem::take(&mut *guard).on_event(event);
        *guard = next;
        actions
    }

    async fn forward(&self, actions: Vec<DeliveryAction>) {
        for DeliveryAction::Forward(intent) in actions {
            let package_name = self
                .context
                .lock()
                .unwrap()
                .as_ref()
                .map(|c| c.package_name.clone())
                .unwrap_or_default();
            if let Err(e) = self.service.handle_deep_link(&intent.url, &package_name).await {
                // Delivery faults surface as onDeepLinkError events from the
                // service, not as call failures.
                tracing::warn!(url = %intent.url, "failed to forward deep link: {}", e);
            }
        }
    }
}

/// Event fan-out: buffer plus attached listeners.
struct EventRelay {
    buffer: PendingEventBuffer,
    listeners: Vec<EventListener>,
}

impl EventRelay {
    fn new() -> Self {
        Self {
            buffer: PendingEventBuffer::new(),
            listeners: Vec::new(),
        }
    }

    /// Route an event; returns the deliveries to perform outside the lock.
    fn emit(&mut self, event: DeepLinkEvent) -> Vec<(EventListener, DeepLinkEvent)> {
        match self.buffer.offer(event) {
            Dispatch::Queued => Vec::new(),
            Dispatch::Deliver(event) => self
                .listeners
                .iter()
                .map(|l| (Arc::clone(l), event.clone()))
                .collect(),
        }
    }

    /// Register a listener; returns the backlog it must receive first.
    fn attach(&mut self, listener: EventListener) -> Vec<DeepLinkEvent> {
        let backlog = self.buffer.listener_attached();
        self.listeners.push(listener);
        backlog
    }
}

/// Deliver an event without holding the relay lock across listener calls.
fn dispatch(relay: &Mutex<EventRelay>, event: DeepLinkEvent) {
    let deliveries = relay.lock().unwrap().emit(event);
    for (listener, event) in deliveries {
        listener(event);
    }
}
