//! Collection change events and subscriber bookkeeping.
//!
//! # Responsibility
//! - Define the event vocabulary the rendering collaborator consumes.
//! - Track subscriber registrations and dispatch events in order.
//!
//! # Invariants
//! - Dispatch is synchronous; no queuing or reordering.
//! - Events carry owned snapshots, so subscribers never need to re-borrow
//!   the collection that emitted them.

use crate::model::todo::Todo;

/// Notification emitted by [`TodoList`](crate::TodoList) on every mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// A todo entered the membership.
    Added(Todo),
    /// A member's content or completion flag changed.
    Changed(Todo),
    /// A member left the membership; its stored row (if any) was deleted.
    Destroyed(Todo),
    /// The membership was replaced wholesale from storage.
    Reset { count: usize },
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ListSubscriber = Box<dyn FnMut(&ListEvent)>;

/// Ordered registry of event subscribers.
///
/// Registration order is dispatch order. Removal keeps the order of the
/// remaining subscribers intact.
#[derive(Default)]
pub(crate) struct SubscriberSet {
    next_id: u64,
    entries: Vec<(SubscriptionId, ListSubscriber)>,
}

impl SubscriberSet {
    pub(crate) fn subscribe(
        &mut self,
        callback: impl FnMut(&ListEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: &ListEvent) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }
}
