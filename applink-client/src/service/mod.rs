//! Native service abstraction for the AppLink bridge.
//!
//! The native AppLink SDK is an external collaborator the bridge depends on
//! for its entire lifetime but never reimplements. This module models its
//! surface as an injected trait so the bridge can be exercised against
//! [`MockAppLinkService`] in tests and against a real SDK binding in a host
//! binary.
//!
//! # Design
//!
//! The trait is async and single-shot per call:
//! - `initialize()` registers the one deep-link outcome callback
//! - `create_app_link()` resolves with the raw service payload
//! - `get_referral_details()` resolves with the attributed record, if any
//! - `handle_deep_link()` hands an opened URL to the service

mod mock;

pub use mock::MockAppLinkService;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use applink_types::LinkCreationRequest;

/// Service-level faults.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service cannot take the call right now.
    #[error("service unavailable")]
    Unavailable,

    /// The service raised an unexpected fault.
    #[error("service fault: {0}")]
    Faulted(String),
}

/// One processed-or-failed deep link reported by the native service.
#[derive(Debug, Clone)]
pub enum LinkOutcome {
    /// The service resolved the link and produced link info.
    Processed {
        /// The opened URL.
        url: String,
        /// Opaque link info.
        info: Map<String, Value>,
    },
    /// The service failed to process the link.
    Failed {
        /// The opened URL, when the service could report one.
        url: Option<String>,
        /// Failure description.
        error: String,
    },
}

/// Callback the service invokes once per processed deep link.
pub type OutcomeListener = Arc<dyn Fn(LinkOutcome) + Send + Sync>;

/// The native AppLink SDK surface, injected into the bridge.
///
/// Implementations are externally serialized: the bridge never issues more
/// than one concurrent operation on the same logical resource.
#[async_trait]
pub trait AppLinkService: Send + Sync {
    /// Register the deep-link outcome callback.
    ///
    /// Replaces any previously registered callback. The service fires it
    /// once per processed link, success or failure.
    async fn initialize(&self, listener: OutcomeListener);

    /// Create an app link, resolving with the raw service payload.
    ///
    /// The payload may be a structured object or that object serialized as
    /// a string; the bridge discriminates, the service does not.
    async fn create_app_link(&self, request: &LinkCreationRequest) -> Result<Value, ServiceError>;

    /// Fetch previously attributed referral data, `None` when there is none.
    async fn get_referral_details(&self) -> Result<Option<Map<String, Value>>, ServiceError>;

    /// Hand an opened URL to the service for resolution.
    async fn handle_deep_link(&self, url: &str, package_name: &str) -> Result<(), ServiceError>;
}

#[async_trait]
impl<T: AppLinkService + ?Sized> AppLinkService for Arc<T> {
    async fn initialize(&self, listener: OutcomeListener) {
        (**self).initialize(listener).await
    }

    async fn create_app_link(&self, request: &LinkCreationRequest) -> Result<Value, ServiceError> {
        (**self).create_app_link(request).await
    }

    async fn get_referral_details(&self) -> Result<Option<Map<String, Value>>, ServiceError> {
        (**self).get_referral_details().await
    }

    async fn handle_deep_link(&self, url: &str, package_name: &str) -> Result<(), ServiceError> {
        (**self).handle_deep_link(url, package_name).await
    }
}
