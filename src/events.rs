//! Completion events from the concurrent dispatcher.
//!
//! Each sort task holds a clone of the engine's [`EventBus`] and emits its
//! own events as soon as it finishes, so subscribers see results in
//! completion order. Built on
//! [`tokio::sync::broadcast`] so multiple listeners can react independently.

use serde::Serialize;
use tokio::sync::broadcast;

/// Events that flow out of a concurrent run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A task picked up its copy of the input.
    Started { algorithm: String, len: usize },
    /// A task produced its sorted output.
    Finished {
        algorithm: String,
        sorted: Vec<i64>,
        elapsed_us: u64,
    },
    /// A task panicked or was lost before producing output.
    Failed { algorithm: String, reason: String },
}

impl Event {
    pub fn algorithm(&self) -> &str {
        match self {
            Event::Started { algorithm, .. }
            | Event::Finished { algorithm, .. }
            | Event::Failed { algorithm, .. } => algorithm,
        }
    }

    /// Finished or Failed: nothing more will come from this task.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Event::Started { .. })
    }
}

/// A broadcast channel that any component can emit to or subscribe from.
/// Clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Does not replay past ones.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(algorithm: &str) -> Event {
        Event::Finished {
            algorithm: algorithm.to_string(),
            sorted: vec![1, 2, 3],
            elapsed_us: 10,
        }
    }

    #[tokio::test]
    async fn emit_reaches_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.emit(finished("merge"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event, finished("merge"));
        assert_eq!(event.algorithm(), "merge");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(Event::Failed {
            algorithm: "quick".to_string(),
            reason: "boom".to_string(),
        });

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1, e2);
        assert!(e1.is_terminal());
    }

    #[test]
    fn emit_without_subscribers_returns_zero() {
        let bus = EventBus::default();
        assert_eq!(bus.emit(finished("bubble")), 0);
    }

    #[tokio::test]
    async fn clone_emits_to_original_subscribers() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let handle = bus.clone();
        assert_eq!(handle.emit(finished("simple")), 1);

        assert_eq!(rx.recv().await.unwrap(), finished("simple"));
    }

    #[test]
    fn started_is_not_terminal() {
        let event = Event::Started {
            algorithm: "simple".to_string(),
            len: 4,
        };
        assert!(!event.is_terminal());
    }

    #[test]
    fn serializes_with_tag() {
        let json = serde_json::to_value(finished("insertion")).unwrap();
        assert_eq!(json["event"], "finished");
        assert_eq!(json["algorithm"], "insertion");
    }
}
