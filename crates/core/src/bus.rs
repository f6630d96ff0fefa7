//! Storage change bus
//!
//! A process-wide fire-and-forget broadcast fired after every mutating
//! write to shared storage. Events are typed: they carry the mutated
//! collection and, for message appends, the new record, so listeners can
//! filter by topic instead of re-reading everything on every signal.

use tokio::sync::broadcast;

use crate::models::MessageRecord;
use crate::storage::Collection;

/// A typed storage change notification
#[derive(Debug, Clone)]
pub enum StorageEvent {
    /// A message was appended to the log
    MessageAppended(MessageRecord),
    /// A collection was replaced wholesale
    CollectionReplaced(Collection),
    /// The `CurrentUser` document changed
    AccountChanged,
}

impl StorageEvent {
    /// The collection this event concerns
    pub fn collection(&self) -> Collection {
        match self {
            Self::MessageAppended(_) => Collection::Messages,
            Self::CollectionReplaced(c) => *c,
            Self::AccountChanged => Collection::CurrentUser,
        }
    }
}

/// Broadcast channel for storage change notifications.
///
/// Publishing never blocks and never fails: a send with no subscribers is
/// silently dropped, and a slow subscriber that falls behind the channel
/// capacity misses events rather than stalling the writer.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<StorageEvent>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: StorageEvent) {
        // Err means no live subscribers; fire-and-forget
        let _ = self.tx.send(event);
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let bus = ChangeBus::default();
        let mut rx_a = bus.subscribe();
        let mut rx_b = bus.subscribe();

        bus.publish(StorageEvent::AccountChanged);

        assert!(matches!(rx_a.recv().await.unwrap(), StorageEvent::AccountChanged));
        assert!(matches!(rx_b.recv().await.unwrap(), StorageEvent::AccountChanged));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_a_noop() {
        let bus = ChangeBus::default();
        bus.publish(StorageEvent::CollectionReplaced(Collection::Cart));
        // A late subscriber does not see past events
        let mut rx = bus.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_event_collection_topic() {
        assert_eq!(
            StorageEvent::AccountChanged.collection(),
            Collection::CurrentUser
        );
        assert_eq!(
            StorageEvent::CollectionReplaced(Collection::Prescriptions).collection(),
            Collection::Prescriptions
        );
    }
}
