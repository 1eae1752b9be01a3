//! # Message Store
//!
//! The client's authoritative list of chat messages.
//!
//! `MessageList` is an immutable value: every operation returns a new list
//! and leaves the original untouched. `MessageStore` holds the current list
//! in a `tokio::sync::watch` channel and swaps it atomically, so observers
//! always see a complete snapshot and a change notification per update.
//!
//! ## Delivery states
//!
//! ```text
//! Pending ──publish ok──▶ Confirmed
//!    │
//!    └──publish failed──▶ Failed ──resend──▶ Pending
//!
//! any state ──echo received──▶ Echoed
//! ```
//!
//! An echo is the server's copy coming back through the stream. It is proof
//! of delivery, so a publish result arriving after the echo is ignored.

use crate::shared::Message;
use std::sync::Arc;
use tokio::sync::watch;

/// Delivery state of one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Inserted locally, publish in flight
    Pending,
    /// Publish returned success, echo not seen yet
    Confirmed,
    /// Publish failed; eligible for resend
    Failed,
    /// Canonical copy received from the stream
    Echoed,
}

/// One row of the message list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub message: Message,
    pub delivery: Delivery,
}

impl Entry {
    pub fn is_failed(&self) -> bool {
        self.delivery == Delivery::Failed
    }
}

/// Ordered list of messages, keyed by message id
///
/// Order is first appearance; entries never move once inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageList {
    entries: Vec<Entry>,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.message.id == id)
    }

    /// Append a locally created message as `Pending`
    ///
    /// A message whose id is already present is left as it is.
    pub fn insert_local(&self, message: Message) -> Self {
        let mut next = self.clone();
        if next.position(&message.id).is_none() {
            next.entries.push(Entry {
                message,
                delivery: Delivery::Pending,
            });
        }
        next
    }

    /// Merge a message received from the stream
    ///
    /// Replaces the entry with the same id in place, or appends it.
    pub fn upsert_echo(&self, message: Message) -> Self {
        let mut next = self.clone();
        let entry = Entry {
            message,
            delivery: Delivery::Echoed,
        };
        match next.position(&entry.message.id) {
            Some(index) => next.entries[index] = entry,
            None => next.entries.push(entry),
        }
        next
    }

    /// Record the outcome of a publish call for `id`
    pub fn record_publish(&self, id: &str, success: bool) -> Self {
        let mut next = self.clone();
        if let Some(index) = next.position(id) {
            let entry = &mut next.entries[index];
            if entry.delivery != Delivery::Echoed {
                entry.delivery = if success {
                    Delivery::Confirmed
                } else {
                    Delivery::Failed
                };
            }
        }
        next
    }

    /// Move a failed message back to `Pending` ahead of a resend
    pub fn mark_pending(&self, id: &str) -> Self {
        let mut next = self.clone();
        if let Some(index) = next.position(id) {
            let entry = &mut next.entries[index];
            if entry.delivery == Delivery::Failed {
                entry.delivery = Delivery::Pending;
            }
        }
        next
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.message.id == id)
    }

    pub fn delivery(&self, id: &str) -> Option<Delivery> {
        self.get(id).map(|entry| entry.delivery)
    }

    /// Ids of all failed messages, in list order
    pub fn failed_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.is_failed())
            .map(|entry| entry.message.id.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.message.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Observable holder of the current `MessageList`
#[derive(Debug, Clone)]
pub struct MessageStore {
    current: Arc<watch::Sender<MessageList>>,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    pub fn new() -> Self {
        let (current, _) = watch::channel(MessageList::new());
        Self {
            current: Arc::new(current),
        }
    }

    /// Replace the list with `f(current)`
    ///
    /// Observers are notified only when the list actually changed. Returns
    /// whether it did.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&MessageList) -> MessageList,
    {
        self.current.send_if_modified(|list| {
            let next = f(list);
            if next == *list {
                false
            } else {
                *list = next;
                true
            }
        })
    }

    /// Copy of the current list
    pub fn snapshot(&self) -> MessageList {
        self.current.borrow().clone()
    }

    /// Receiver notified on every change
    pub fn subscribe(&self) -> watch::Receiver<MessageList> {
        self.current.subscribe()
    }
}
