//! Pending-event buffer.
//!
//! The native service can report processed deep links before the script side
//! has attached any listener. Instead of dropping those events, the buffer
//! queues them in arrival order and hands the whole backlog to the first
//! listener that attaches. After that the buffer is retired for good:
//! subsequent events are dispatched live even if every listener detaches
//! again (listener-count lifecycle is not otherwise tracked).

use std::collections::VecDeque;

use applink_types::DeepLinkEvent;

/// Where an offered event went.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// No listener has ever attached; the event was queued.
    Queued,
    /// The buffer is retired; deliver the event to current listeners.
    Deliver(DeepLinkEvent),
}

/// Buffer for events emitted before the first listener attached.
#[derive(Debug)]
pub enum PendingEventBuffer {
    /// No listener has attached yet; events accumulate in arrival order.
    Buffering {
        /// Queued events, oldest first.
        queue: VecDeque<DeepLinkEvent>,
    },
    /// A listener has attached at least once; events flow through.
    Retired,
}

impl PendingEventBuffer {
    /// Create an empty buffer in the buffering state.
    pub fn new() -> Self {
        Self::Buffering {
            queue: VecDeque::new(),
        }
    }

    /// Offer an event for dispatch.
    pub fn offer(&mut self, event: DeepLinkEvent) -> Dispatch {
        match self {
            Self::Buffering { queue } => {
                queue.push_back(event);
                Dispatch::Queued
            }
            Self::Retired => Dispatch::Deliver(event),
        }
    }

    /// Record the first listener attachment.
    ///
    /// Returns the backlog in original emission order and retires the
    /// buffer. Later attachments return an empty backlog.
    pub fn listener_attached(&mut self) -> Vec<DeepLinkEvent> {
        match std::mem::replace(self, Self::Retired) {
            Self::Buffering { queue } => queue.into(),
            Self::Retired => Vec::new(),
        }
    }

    /// Number of queued events (zero once retired).
    pub fn queued_count(&self) -> usize {
        match self {
            Self::Buffering { queue } => queue.len(),
            Self::Retired => 0,
        }
    }
}

impl Default for PendingEventBuffer {
    fn default() -> Self {
        Self::new()
    }
}
