use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use thumbgrid_core::WidgetId;

use crate::{SYNC_EVENT_NAME, SyncEvent};

/// A raw sync event body, optionally addressed to a single widget.
///
/// The body stays undecoded until a subscriber consumes it so malformed
/// payloads are rejected by the widget that would have applied them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEnvelope {
    #[serde(default)]
    pub target: Option<WidgetId>,
    pub detail: serde_json::Value,
}

impl SyncEnvelope {
    pub fn broadcast(detail: serde_json::Value) -> Self {
        Self {
            target: None,
            detail,
        }
    }

    pub fn addressed(target: WidgetId, detail: serde_json::Value) -> Self {
        Self {
            target: Some(target),
            detail,
        }
    }

    fn is_for(&self, id: WidgetId) -> bool {
        self.target.is_none_or(|target| target == id)
    }
}

struct SubscriberSlot {
    token: u64,
    tx: Sender<SyncEnvelope>,
}

#[derive(Default)]
struct BusInner {
    subscribers: RwLock<HashMap<WidgetId, SubscriberSlot>>,
    next_token: AtomicU64,
}

/// Fan-out channel from the backend to live gallery widgets.
#[derive(Clone, Default)]
pub struct SyncBus {
    inner: Arc<BusInner>,
}

impl SyncBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget. The returned guard unsubscribes when dropped.
    ///
    /// Subscribing an id twice replaces the earlier registration; the older
    /// guard then receives nothing and its drop leaves the new one in place.
    pub fn subscribe(&self, id: WidgetId) -> Subscription {
        let (tx, rx) = unbounded();
        let token = self.inner.next_token.fetch_add(1, Ordering::Relaxed);
        let previous = self
            .inner
            .subscribers
            .write()
            .insert(id, SubscriberSlot { token, tx });
        if previous.is_some() {
            tracing::warn!("Widget {} re-subscribed; replacing old subscription", id);
        }
        tracing::info!("Widget {} subscribed to gallery sync", id);

        Subscription {
            id,
            token,
            rx,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an envelope to every matching subscriber. Returns how many
    /// widgets received it.
    pub fn publish(&self, envelope: SyncEnvelope) -> usize {
        let subscribers = self.inner.subscribers.read();
        let mut delivered = 0;
        for (id, slot) in subscribers.iter() {
            if envelope.is_for(*id) && slot.tx.send(envelope.clone()).is_ok() {
                delivered += 1;
            }
        }
        tracing::debug!(
            "Published sync event (target: {:?}) to {} widget(s)",
            envelope.target,
            delivered
        );
        delivered
    }

    /// Entry point for host events. Anything not named
    /// [`SYNC_EVENT_NAME`] is ignored.
    pub fn dispatch(&self, name: &str, target: Option<WidgetId>, detail: serde_json::Value) -> usize {
        if name != SYNC_EVENT_NAME {
            tracing::debug!("Ignoring unrelated host event {:?}", name);
            return 0;
        }
        self.publish(SyncEnvelope { target, detail })
    }

    /// Send a typed event to one widget.
    pub fn send_to(&self, id: WidgetId, event: &SyncEvent) -> Result<()> {
        let detail = serde_json::to_value(event)?;
        let subscribers = self.inner.subscribers.read();
        let slot = subscribers
            .get(&id)
            .ok_or_else(|| anyhow::anyhow!("no gallery widget subscribed as {}", id))?;
        slot.tx
            .send(SyncEnvelope::addressed(id, detail))
            .map_err(|error| anyhow::anyhow!(error.to_string()))
    }

    /// Send a typed event to every widget.
    pub fn broadcast(&self, event: &SyncEvent) -> Result<usize> {
        let detail = serde_json::to_value(event)?;
        Ok(self.publish(SyncEnvelope::broadcast(detail)))
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().len()
    }

    pub fn is_subscribed(&self, id: WidgetId) -> bool {
        self.inner.subscribers.read().contains_key(&id)
    }
}

/// Scoped registration on a [`SyncBus`].
pub struct Subscription {
    id: WidgetId,
    token: u64,
    rx: Receiver<SyncEnvelope>,
    bus: Weak<BusInner>,
}

impl Subscription {
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Next pending event body for this widget, without blocking.
    pub fn try_next(&self) -> Option<serde_json::Value> {
        while let Ok(envelope) = self.rx.try_recv() {
            if envelope.is_for(self.id) {
                return Some(envelope.detail);
            }
        }
        None
    }

    /// All pending event bodies in arrival order.
    pub fn drain(&self) -> Vec<serde_json::Value> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.bus.upgrade() else {
            return;
        };
        let mut subscribers = inner.subscribers.write();
        if subscribers
            .get(&self.id)
            .is_some_and(|slot| slot.token == self.token)
        {
            subscribers.remove(&self.id);
            tracing::info!("Widget {} unsubscribed from gallery sync", self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("pending", &self.rx.len())
            .finish()
    }
}
