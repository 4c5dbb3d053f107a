//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record shared by collection and persistence.
//! - Enforce the non-empty-content rule through constructors and mutators.
//!
//! # Invariants
//! - `content` is never empty after construction or `set_content`.
//! - `order` is assigned once by the owning list and not mutated afterward;
//!   `0` means "not yet assigned" (list-assigned orders start at 1).
//! - `id` is `None` until the repository persists the record.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by the persistence layer on first save.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = Uuid;

/// Content used when a todo is constructed with empty or missing text.
pub const DEFAULT_CONTENT: &str = "empty todo...";

/// Violations of the persisted-todo invariants.
///
/// Fields are public, so a record can be driven into an invalid shape after
/// construction; write paths re-check before any SQL mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    /// `content` must stay non-empty once the record exists.
    EmptyContent,
    /// `order` is a display position; negative values cannot be rendered.
    NegativeOrder { order: i64 },
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "todo content must not be empty"),
            Self::NegativeOrder { order } => {
                write!(f, "todo order must be >= 0, got {order}")
            }
        }
    }
}

impl Error for TodoValidationError {}

/// Optional-field input for constructing a todo from loosely shaped data,
/// e.g. raw user input where any of the fields may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoAttributes {
    pub content: Option<String>,
    pub done: Option<bool>,
    pub order: Option<i64>,
}

/// One to-do record: text content, completion flag, display order, identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// `None` until the repository assigns an id on first save.
    pub id: Option<TodoId>,
    /// Display text. Empty input is coerced to [`DEFAULT_CONTENT`].
    pub content: String,
    /// Completion flag.
    pub done: bool,
    /// Display position within the owning list. Assigned once at creation.
    pub order: i64,
}

impl Todo {
    /// Creates an unsaved todo with the given content and display order.
    ///
    /// Empty content is coerced to [`DEFAULT_CONTENT`].
    pub fn new(content: impl Into<String>, order: i64) -> Self {
        Self {
            id: None,
            content: coerce_content(content.into()),
            done: false,
            order,
        }
    }

    /// Creates an unsaved todo from an optional-field mapping.
    ///
    /// Missing or empty `content` falls back to [`DEFAULT_CONTENT`],
    /// `done` defaults to `false`, `order` defaults to unassigned (`0`).
    pub fn from_attributes(attributes: TodoAttributes) -> Self {
        Self {
            id: None,
            content: coerce_content(attributes.content.unwrap_or_default()),
            done: attributes.done.unwrap_or(false),
            order: attributes.order.unwrap_or(0),
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }

    /// Replaces the content, applying the same empty-input coercion as
    /// construction.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = coerce_content(content.into());
    }

    /// Returns whether the repository has assigned an identity.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Returns whether the owning list has assigned a display order.
    pub fn has_order(&self) -> bool {
        self.order != 0
    }

    /// Checks the persisted-record invariants.
    ///
    /// # Errors
    /// - [`TodoValidationError::EmptyContent`] when `content` was blanked
    ///   after construction.
    /// - [`TodoValidationError::NegativeOrder`] when `order` is negative.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.content.is_empty() {
            return Err(TodoValidationError::EmptyContent);
        }
        if self.order < 0 {
            return Err(TodoValidationError::NegativeOrder { order: self.order });
        }
        Ok(())
    }
}

fn coerce_content(content: String) -> String {
    if content.is_empty() {
        DEFAULT_CONTENT.to_string()
    } else {
        content
    }
}
