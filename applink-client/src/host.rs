//! Host application glue.
//!
//! Platform entry points (activity, app delegate) receive link-open signals
//! from the OS, sometimes before the bridge exists. [`HostRelay`] is the
//! deliver-or-buffer seam between the two: URLs queue while no bridge is
//! attached and drain in arrival order the moment one is. The relay never
//! drops a signal; the single-slot pre-init rule is the bridge's business,
//! not the relay's.

use std::sync::{Arc, Mutex};

use crate::bridge::AppLinkBridge;
use crate::service::AppLinkService;

/// Deliver-or-buffer relay for OS-level link-open signals.
pub struct HostRelay<S: AppLinkService> {
    inner: Mutex<RelayTarget<S>>,
}

enum RelayTarget<S: AppLinkService> {
    Detached { queued: Vec<String> },
    Attached(Arc<AppLinkBridge<S>>),
}

impl<S: AppLinkService> HostRelay<S> {
    /// Create a detached relay.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RelayTarget::Detached { queued: Vec::new() }),
        }
    }

    /// Accept a link-open signal from the OS.
    pub async fn url_opened(&self, url: &str) {
        let bridge = {
            let mut guard = self.inner.lock().unwrap();
            match &mut *guard {
                RelayTarget::Detached { queued } => {
                    queued.push(url.to_string());
                    None
                }
                RelayTarget::Attached(bridge) => Some(Arc::clone(bridge)),
            }
        };
        if let Some(bridge) = bridge {
            bridge.handle_intent(url).await;
        }
    }

    /// Attach the bridge and drain any queued signals in arrival order.
    pub async fn attach(&self, bridge: Arc<AppLinkBridge<S>>) {
        let queued = {
            let mut guard = self.inner.lock().unwrap();
            match std::mem::replace(&mut *guard, RelayTarget::Attached(Arc::clone(&bridge))) {
                RelayTarget::Detached { queued } => queued,
                RelayTarget::Attached(_) => Vec::new(),
            }
        };
        for url in queued {
            bridge.handle_intent(&url).await;
        }
    }
}

impl<S: AppLinkService> Default for HostRelay<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::HostContext;
    use crate::service::MockAppLinkService;

    fn attached_pair() -> (MockAppLinkService, Arc<AppLinkBridge<MockAppLinkService>>) {
        let service = MockAppLinkService::new();
        let bridge = Arc::new(AppLinkBridge::new(service.clone()));
        (service, bridge)
    }

    #[tokio::test]
    async fn signals_queue_while_detached_and_drain_on_attach() {
        let (service, bridge) = attached_pair();
        bridge
            .initialize(Some(HostContext::new("com.example.app")))
            .await
            .unwrap();

        let relay = HostRelay::new();
        relay.url_opened("https://x.co/a").await;
        relay.url_opened("https://x.co/b").await;
        assert!(service.handled_links().is_empty());

        relay.attach(Arc::clone(&bridge)).await;
        let urls: Vec<String> = service.handled_links().into_iter().map(|(u, _)| u).collect();
        assert_eq!(urls, vec!["https://x.co/a", "https://x.co/b"]);
    }

    #[tokio::test]
    async fn attached_relay_forwards_directly() {
        let (service, bridge) = attached_pair();
        bridge
            .initialize(Some(HostContext::new("com.example.app")))
            .await
            .unwrap();

        let relay = HostRelay::new();
        relay.attach(Arc::clone(&bridge)).await;
        relay.url_opened("https://x.co/direct").await;
        assert_eq!(service.handled_links().len(), 1);
    }

    #[tokio::test]
    async fn pre_init_drain_lands_in_the_single_pending_slot() {
        // Relay attached to an uninitialized bridge: queued URLs reach the
        // bridge, which keeps only the most recent one until init.
        let (service, bridge) = attached_pair();
        let relay = HostRelay::new();
        relay.url_opened("https://x.co/a").await;
        relay.url_opened("https://x.co/b").await;
        relay.attach(Arc::clone(&bridge)).await;
        assert!(service.handled_links().is_empty());

        bridge
            .initialize(Some(HostContext::new("com.example.app")))
            .await
            .unwrap();
        let links = service.handled_links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].0, "https://x.co/b");
    }
}
