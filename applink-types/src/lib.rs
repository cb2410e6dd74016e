//! # applink-types
//!
//! Data model for the AppLink bridge.
//!
//! This crate provides the foundational types used across all bridge crates:
//! - [`LinkCreationRequest`], [`SocialMetadata`], [`PlatformBehavior`] - Link creation inputs
//! - [`NativeLinkOutcome`] - Probe over the native service's link-creation payload
//! - [`DeepLinkEvent`], [`LinkIntent`] - Deep-link delivery types
//! - [`LinkDataError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod event;
mod intent;
mod referral;
mod request;
mod response;

pub use error::LinkDataError;
pub use event::DeepLinkEvent;
pub use intent::LinkIntent;
pub use referral::coerce_referral_fields;
pub use request::{LinkCreationRequest, PlatformBehavior, SocialMetadata};
pub use response::{NativeLinkOutcome, STATUS_SUCCESS};
