//! Inventory change notifications

use crate::item::ItemRef;
use crate::slot::GridPos;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Events emitted by the inventory engine
#[derive(Debug, Clone)]
pub enum InventoryEvent {
    /// Some slot changed; re-read the snapshot
    Changed,
    /// A use was attempted on this item
    ItemUsed(ItemRef),
    /// Item became equipped (also re-sent as a refresh after sorting)
    ItemEquipped(ItemRef),
    /// Item left its equipment slot
    ItemUnequipped(ItemRef),
    /// Positional hint for move/merge animation
    ItemMoved { from: GridPos, to: GridPos },
}

impl InventoryEvent {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Callback type for inventory events
pub type InventoryCallback = Box<dyn Fn(&InventoryEvent) + Send + Sync>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

enum Subscriber {
    Callback(InventoryCallback),
    Channel(Sender<InventoryEvent>),
}

/// Synchronous multi-subscriber dispatcher.
///
/// Events reach subscribers in registration order before `emit` returns.
/// Handlers must not call back into the inventory that emitted them.
#[derive(Default)]
pub struct EventDispatcher {
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber_id: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> SubscriberId {
        self.next_subscriber_id += 1;
        SubscriberId(self.next_subscriber_id)
    }

    /// Register a callback
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: Fn(&InventoryEvent) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.subscribers
            .push((id, Subscriber::Callback(Box::new(callback))));
        id
    }

    /// Register a channel subscriber. Dropping the receiver unsubscribes it.
    pub fn subscribe_channel(&mut self) -> Receiver<InventoryEvent> {
        let (tx, rx) = unbounded();
        let id = self.next_id();
        self.subscribers.push((id, Subscriber::Channel(tx)));
        rx
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver an event to every subscriber
    pub fn emit(&mut self, event: InventoryEvent) {
        log::trace!("Inventory event: {:?}", event);

        self.subscribers.retain(|(id, subscriber)| match subscriber {
            Subscriber::Callback(callback) => {
                callback(&event);
                true
            }
            Subscriber::Channel(tx) => {
                let alive = tx.send(event.clone()).is_ok();
                if !alive {
                    log::debug!("Dropping disconnected inventory subscriber {:?}", id);
                }
                alive
            }
        });
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
