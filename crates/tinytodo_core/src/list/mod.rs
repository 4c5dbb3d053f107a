//! Todo collection and change notification.
//!
//! # Responsibility
//! - Maintain the ordered membership of todos for one session.
//! - Orchestrate repository calls for collection-level operations.
//! - Publish synchronous change events to registered subscribers.
//!
//! # Invariants
//! - Membership stays sorted ascending by display order.
//! - Events are dispatched synchronously, in operation order.

pub mod events;
pub mod todo_list;
