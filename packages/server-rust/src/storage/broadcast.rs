//! Notification hub fanning created messages out to live subscribers.
//!
//! [`MessageHub`] wraps a `tokio::sync::broadcast` channel. Publishing is
//! fire-and-forget: with no subscribers the event is discarded, and a slow
//! subscriber drops missed events instead of stalling the publisher.
//! At-most-once, best-effort, no replay of events published before
//! subscription.

use scribe_core::Message;
use tokio::sync::broadcast;
use tracing::{trace, warn};

/// Default number of in-flight events retained per subscriber before the
/// oldest are dropped.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Broadcast hub for message-creation events.
///
/// Cloning is cheap and every clone publishes into the same channel. The
/// hub owns only its subscriber registrations, never any domain data; it
/// receives each created [`Message`] by value.
#[derive(Debug, Clone)]
pub struct MessageHub {
    tx: broadcast::Sender<Message>,
}

impl MessageHub {
    /// Creates a hub retaining up to `capacity` undelivered events per
    /// subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Delivers `message` to every currently registered subscriber.
    ///
    /// A hub without subscribers silently discards the event; this is never
    /// an error and nothing is buffered for future subscribers.
    pub fn publish(&self, message: Message) {
        match self.tx.send(message) {
            Ok(subscribers) => trace!(subscribers, "published created message"),
            Err(_) => trace!("no live subscribers; event discarded"),
        }
    }

    /// Registers a fresh, independent subscriber.
    ///
    /// The subscription only observes events published after this call.
    /// Dropping it deregisters the subscriber.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for MessageHub {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// A single subscriber's view of the event stream.
///
/// The stream never completes on its own; it ends only when the consumer
/// drops the subscription or every hub handle is gone.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<Message>,
}

impl Subscription {
    /// Waits for the next created message.
    ///
    /// Returns `None` once every hub handle has been dropped. Events missed
    /// while lagging are skipped with a warning; delivery resumes from the
    /// oldest retained event.
    pub async fn recv(&mut self) -> Option<Message> {
        loop {
            match self.rx.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "subscriber lagged; missed events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
