//! In-process change notifications for score sets.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::Serialize;

use crate::dto::TournamentId;

/// Handed to subscribers each time a tournament or its scores are written.
#[derive(Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeToken {
    /// Increases by one per change, starting at 1.
    pub sequence: u64,
    pub tournament_id: TournamentId,
}

type Callback = Arc<dyn Fn(ChangeToken) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: HashMap<u64, Callback>,
}

#[derive(Default)]
struct FeedInner {
    sequence: AtomicU64,
    registry: Mutex<Registry>,
}

#[derive(Default, Clone)]
pub struct ChangeFeed {
    inner: Arc<FeedInner>,
}

/// Keeps a callback registered. Dropping it unregisters the callback.
#[must_use = "dropping a Subscription unregisters its callback"]
pub struct Subscription {
    id: u64,
    feed: Weak<FeedInner>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(ChangeToken) + Send + Sync + 'static,
    {
        let mut registry = self.inner.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.insert(id, Arc::new(callback));
        Subscription {
            id,
            feed: Arc::downgrade(&self.inner),
        }
    }

    /// Records a change and runs every registered callback with its token.
    pub fn publish(&self, tournament_id: TournamentId) -> ChangeToken {
        let token = ChangeToken {
            sequence: self.inner.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            tournament_id,
        };
        // Callbacks run outside the lock so they may subscribe or unsubscribe.
        let callbacks: Vec<Callback> = self
            .inner
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .callbacks
            .values()
            .cloned()
            .collect();
        for callback in callbacks {
            callback(token);
        }
        token
    }

    /// Sequence of the latest change, 0 before the first one.
    pub fn current_sequence(&self) -> u64 {
        self.inner.sequence.load(Ordering::SeqCst)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .callbacks
            .len()
    }
}

impl std::fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeFeed")
            .field("sequence", &self.current_sequence())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.feed.upgrade() {
            inner
                .registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .callbacks
                .remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_receive_tokens_until_unsubscribed() {
        let feed = ChangeFeed::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let subscription = feed.subscribe(move |token| sink.lock().unwrap().push(token));
        assert_eq!(feed.subscriber_count(), 1);

        feed.publish(TournamentId(7));
        feed.publish(TournamentId(7));
        subscription.unsubscribe();
        feed.publish(TournamentId(8));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ChangeToken { sequence: 1, tournament_id: TournamentId(7) },
                ChangeToken { sequence: 2, tournament_id: TournamentId(7) },
            ]
        );
        assert_eq!(feed.subscriber_count(), 0);
        assert_eq!(feed.current_sequence(), 3);
    }

    #[test]
    fn dropping_the_feed_first_is_fine() {
        let feed = ChangeFeed::new();
        let subscription = feed.subscribe(|_| {});
        drop(feed);
        drop(subscription);
    }

    #[test]
    fn clones_share_subscribers() {
        let feed = ChangeFeed::new();
        let count = Arc::new(AtomicU64::new(0));
        let counter = count.clone();
        let _subscription = feed.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        feed.clone().publish(TournamentId(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
