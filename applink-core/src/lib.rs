//! # applink-core
//!
//! Pure delivery logic for the AppLink bridge (no I/O, instant tests).
//!
//! This crate holds the two pieces of bridge behavior that are actual logic
//! rather than marshalling, as side-effect-free state types:
//! - [`DeliveryState`] - when an incoming link-open signal is forwarded to
//!   the native service vs. parked in the single pending slot
//! - [`PendingEventBuffer`] - events emitted before any listener attached,
//!   flushed in order on first attachment
//!
//! The actual I/O (calling the native service, invoking listeners) is
//! performed by `applink-client`, which interprets the outputs of these
//! types. Same input, same output, no mocks needed to test them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod delivery;
pub mod events;

pub use delivery::{DeliveryAction, DeliveryEvent, DeliveryState};
pub use events::{Dispatch, PendingEventBuffer};
