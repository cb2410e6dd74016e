//! # applink-client
//!
//! The AppLink bridge module.
//!
//! [`AppLinkBridge`] marshals calls into an injected [`AppLinkService`]
//! (the native deep-link SDK, modeled as a trait) and relays the service's
//! asynchronous callbacks back out as [`DeepLinkEvent`]s. It owns no link
//! logic of its own: link creation, URL matching and referral attribution
//! all happen inside the service implementation.
//!
//! ## Architecture
//!
//! ```text
//! Facade → AppLinkBridge → AppLinkService → native SDK
//!               ↓
//!          applink-core (pure delivery state machine + event buffer)
//! ```
//!
//! [`DeepLinkEvent`]: applink_types::DeepLinkEvent

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bridge;
pub mod host;
pub mod service;

pub use bridge::{AppLinkBridge, BridgeError, EventListener, HostContext};
pub use host::HostRelay;
pub use service::{AppLinkService, LinkOutcome, MockAppLinkService, OutcomeListener, ServiceError};
