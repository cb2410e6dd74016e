//! Intent delivery state machine.
//!
//! The host OS can open the app with a link before the bridge has finished
//! initializing the native service. This machine decides, without performing
//! any I/O, whether a link-open signal is forwarded immediately or parked in
//! the single pending slot. The caller (`applink-client`) executes the
//! returned actions.

use applink_types::LinkIntent;

/// Delivery state machine - NO I/O, just state transitions.
///
/// Two states: before the native service is initialized, at most one intent
/// is retained (the most recent unhandled one); afterwards every intent is
/// forwarded immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryState {
    /// Service not initialized; the slot holds the most recent unhandled intent.
    NotReady {
        /// The parked intent, if any arrived pre-init.
        pending: Option<LinkIntent>,
    },
    /// Service initialized; intents are forwarded as they arrive.
    Ready,
}

/// Inputs to the delivery machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryEvent {
    /// The OS delivered a link-open signal.
    LinkOpened(LinkIntent),
    /// The native service finished initializing.
    ServiceInitialized,
}

/// Effects the caller must execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryAction {
    /// Forward the intent to the native service.
    Forward(LinkIntent),
}

impl DeliveryState {
    /// Create a new machine in the NotReady state with an empty slot.
    pub fn new() -> Self {
        Self::NotReady { pending: None }
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// Pure function - the caller performs the actual forwarding.
    pub fn on_event(self, event: DeliveryEvent) -> (Self, Vec<DeliveryAction>) {
        match (self, event) {
            // Pre-init signals overwrite the slot; only the most recent
            // unhandled intent is eventually delivered.
            (Self::NotReady { .. }, DeliveryEvent::LinkOpened(intent)) => (
                Self::NotReady {
                    pending: Some(intent),
                },
                vec![],
            ),

            // Initialization consumes the slot exactly once.
            (Self::NotReady { pending }, DeliveryEvent::ServiceInitialized) => (
                Self::Ready,
                pending.into_iter().map(DeliveryAction::Forward).collect(),
            ),

            (Self::Ready, DeliveryEvent::LinkOpened(intent)) => {
                (Self::Ready, vec![DeliveryAction::Forward(intent)])
            }

            // Re-initialization is a no-op; nothing can be forwarded twice.
            (Self::Ready, DeliveryEvent::ServiceInitialized) => (Self::Ready, vec![]),
        }
    }

    /// Whether the service has been initialized.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl Default for DeliveryState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(url: &str) -> LinkIntent {
        LinkIntent::new(url)
    }

    #[test]
    fn starts_not_ready_with_empty_slot() {
        let state = DeliveryState::new();
        assert_eq!(state, DeliveryState::NotReady { pending: None });
        assert!(!state.is_ready());
    }

    #[test]
    fn pre_init_intent_is_parked_not_forwarded() {
        let state = DeliveryState::new();
        let (state, actions) =
            state.on_event(DeliveryEvent::LinkOpened(intent("https://x.co/a")));
        assert!(actions.is_empty());
        assert_eq!(
            state,
            DeliveryState::NotReady {
                pending: Some(intent("https://x.co/a"))
            }
        );
    }

    #[test]
    fn second_pre_init_intent_overwrites_the_first() {
        let state = DeliveryState::new();
        let (state, _) = state.on_event(DeliveryEvent::LinkOpened(intent("https://x.co/a")));
        let (state, actions) =
            state.on_event(DeliveryEvent::LinkOpened(intent("https://x.co/b")));
        assert!(actions.is_empty());

        let (state, actions) = state.on_event(DeliveryEvent::ServiceInitialized);
        assert_eq!(actions, vec![DeliveryAction::Forward(intent("https://x.co/b"))]);
        assert!(state.is_ready());
    }

    #[test]
    fn init_with_empty_slot_forwards_nothing() {
        let state = DeliveryState::new();
        let (state, actions) = state.on_event(DeliveryEvent::ServiceInitialized);
        assert!(actions.is_empty());
        assert!(state.is_ready());
    }

    #[test]
    fn pending_intent_is_forwarded_exactly_once() {
        let state = DeliveryState::new();
        let (state, _) = state.on_event(DeliveryEvent::LinkOpened(intent("https://x.co/a")));

        let (state, actions) = state.on_event(DeliveryEvent::ServiceInitialized);
        assert_eq!(actions.len(), 1);

        // A second initialization must not replay the intent.
        let (state, actions) = state.on_event(DeliveryEvent::ServiceInitialized);
        assert!(actions.is_empty());
        assert!(state.is_ready());
    }

    #[test]
    fn ready_intents_are_forwarded_immediately() {
        let (state, _) = DeliveryState::new().on_event(DeliveryEvent::ServiceInitialized);
        let (state, actions) =
            state.on_event(DeliveryEvent::LinkOpened(intent("https://x.co/c")));
        assert_eq!(actions, vec![DeliveryAction::Forward(intent("https://x.co/c"))]);
        assert!(state.is_ready());
    }
}
