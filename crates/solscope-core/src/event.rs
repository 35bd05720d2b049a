//! Event bus for solscope using tokio::broadcast
//!
//! Provides a publish-subscribe mechanism for data updates.

use tokio::sync::broadcast;

/// Events emitted by the data layer
#[derive(Debug, Clone)]
pub enum DataEvent {
    /// Statistics for a wallet were fetched (or refreshed)
    StatsFetched(String),
    /// The wallet registry changed (wallet added or removed)
    RegistryUpdated,
    /// The leaderboard finished recomputing
    LeaderboardUpdated,
    /// A counterparty graph was built for a wallet
    GraphBuilt(String),
    /// A fetch failed; message is user-displayable
    FetchFailed { address: String, message: String },
}

/// Event bus for broadcasting data events
///
/// Uses tokio::broadcast for multi-consumer support.
/// The TUI subscribes for redraw triggers.
pub struct EventBus {
    sender: broadcast::Sender<DataEvent>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create with default capacity (256 events)
    pub fn default_capacity() -> Self {
        Self::new(256)
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: DataEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    /// Subscribe to receive events
    pub fn subscribe(&self) -> broadcast::Receiver<DataEvent> {
        self.sender.subscribe()
    }

    /// Get current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::default_capacity()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
