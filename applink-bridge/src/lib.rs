//! # applink-bridge
//!
//! FFI-friendly facade over the AppLink bridge module.
//!
//! This crate monomorphizes `AppLinkBridge<S>` into [`AppLinkHandle`],
//! providing flat, lifetime-free types that binding crates (napi-rs and
//! friends) can wrap directly.
//!
//! ## Design
//!
//! - All types are FFI-friendly: no generics, no lifetimes at the surface
//! - `String` instead of `&str`, owned maps instead of borrowed views
//! - The two historical link-creation payload shapes (structured vs
//!   serialized string) normalize to one [`CreateLinkResponse`]
//! - The not-linked check happens once, eagerly, in [`AppLinkHandle::link`]
//! - Thin wrappers — all real behavior lives in applink-client and
//!   applink-core

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod handle;
pub mod types;

pub use error::{FacadeError, LINKING_ERROR};
pub use handle::{AppLinkHandle, SharedAppLinkService};
pub use types::{CreateLinkResponse, LinkMessage, LinkRequest};
