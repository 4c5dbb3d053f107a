//! Ordered todo collection with derived views and persistence orchestration.
//!
//! # Responsibility
//! - Keep the session's todos sorted by display order.
//! - Assign display orders to new members (`next_order`).
//! - Derive done/remaining views and stats on demand by linear scan.
//! - Persist mutations through the repository and notify subscribers.
//!
//! # Invariants
//! - Membership is sorted ascending by `order` at all times.
//! - A member's `order` is never reassigned after it was set.
//! - Mutation persistence is best-effort: a storage failure is logged and
//!   the in-memory mutation plus its notification still take place.

use crate::list::events::{ListEvent, SubscriberSet, SubscriptionId};
use crate::model::todo::{Todo, TodoId};
use crate::repo::todo_repo::{RepoResult, TodoRepository};
use log::{debug, info, warn};

/// Snapshot of the membership counts the rendering collaborator displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStats {
    pub total: usize,
    pub done: usize,
    pub remaining: usize,
}

/// The ordered set of all todos for one user session.
///
/// Generic over the persistence adapter so tests and alternative backends
/// can stand in for SQLite.
pub struct TodoList<R: TodoRepository> {
    repo: R,
    todos: Vec<Todo>,
    subscribers: SubscriberSet,
}

impl<R: TodoRepository> TodoList<R> {
    /// Creates an empty list over the given repository.
    ///
    /// Call [`load`](Self::load) to populate it from storage.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            todos: Vec::new(),
            subscribers: SubscriberSet::default(),
        }
    }

    /// Registers a callback invoked synchronously on every mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&ListEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Removes a previously registered callback.
    ///
    /// Returns `false` when the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Display order for the next new member: 1 on an empty list, otherwise
    /// the last member's order + 1.
    ///
    /// Orders are explicit rather than implicit list position, so new items
    /// land at the visual end regardless of in-memory insertion order.
    pub fn next_order(&self) -> i64 {
        self.todos.last().map_or(1, |todo| todo.order + 1)
    }

    /// Inserts a todo into the membership at its sorted position.
    ///
    /// Assigns `order` via [`next_order`](Self::next_order) when the todo
    /// does not carry one yet. Emits [`ListEvent::Added`].
    pub fn add(&mut self, mut todo: Todo) {
        if !todo.has_order() {
            todo.order = self.next_order();
        }
        let position = self
            .todos
            .partition_point(|member| member.order <= todo.order);
        self.todos.insert(position, todo.clone());
        self.subscribers.emit(&ListEvent::Added(todo));
    }

    /// Builds a new todo from user input, persists it, and adds it.
    ///
    /// The repository assigns the identity, so unlike the best-effort
    /// mutation paths a storage failure here is propagated: without an id
    /// there is nothing to add.
    ///
    /// # Errors
    /// Returns the repository error unchanged.
    pub fn create(&mut self, content: impl Into<String>) -> RepoResult<TodoId> {
        let mut todo = Todo::new(content, self.next_order());
        let id = self.repo.create_todo(&todo)?;
        todo.id = Some(id);
        self.add(todo);
        Ok(id)
    }

    /// Replaces the membership with everything currently in storage.
    ///
    /// Emits a single [`ListEvent::Reset`] instead of per-item `Added`
    /// events; renderers react by clearing and redrawing.
    ///
    /// # Errors
    /// Returns the repository error unchanged.
    pub fn load(&mut self) -> RepoResult<usize> {
        let todos = self.repo.find_all()?;
        let count = todos.len();
        self.todos = todos;
        info!("event=list_load module=list status=ok count={count}");
        self.subscribers.emit(&ListEvent::Reset { count });
        Ok(count)
    }

    /// Flips a member's completion flag and persists the new value.
    ///
    /// Emits [`ListEvent::Changed`]. Returns `false` when no member has
    /// the given id.
    pub fn toggle_done(&mut self, id: TodoId) -> bool {
        let Some(index) = self.position_of(id) else {
            return false;
        };
        self.todos[index].toggle();
        let snapshot = self.todos[index].clone();
        self.persist(&snapshot);
        self.subscribers.emit(&ListEvent::Changed(snapshot));
        true
    }

    /// Replaces a member's content and persists the new value.
    ///
    /// Empty input is coerced to the default content, the same policy as
    /// construction. Emits [`ListEvent::Changed`]. Returns `false` when no
    /// member has the given id.
    pub fn update_content(&mut self, id: TodoId, content: impl Into<String>) -> bool {
        let Some(index) = self.position_of(id) else {
            return false;
        };
        self.todos[index].set_content(content);
        let snapshot = self.todos[index].clone();
        self.persist(&snapshot);
        self.subscribers.emit(&ListEvent::Changed(snapshot));
        true
    }

    /// Removes a member from storage and from the membership. Terminal.
    ///
    /// Emits [`ListEvent::Destroyed`]. Returns `false` when no member has
    /// the given id.
    pub fn delete(&mut self, id: TodoId) -> bool {
        let Some(index) = self.position_of(id) else {
            return false;
        };
        let todo = self.todos.remove(index);
        if let Err(err) = self.repo.delete_todo(id) {
            warn!("event=delete module=list status=error id={id} error={err}");
        }
        self.subscribers.emit(&ListEvent::Destroyed(todo));
        true
    }

    /// Deletes every member that is done at call time, in list order.
    ///
    /// Each deletion is independent: a storage failure is logged and the
    /// sweep proceeds. Returns the number of members removed.
    pub fn clear_completed(&mut self) -> usize {
        let mut removed = 0;
        while let Some(index) = self.todos.iter().position(|todo| todo.done) {
            let todo = self.todos.remove(index);
            if let Some(id) = todo.id {
                if let Err(err) = self.repo.delete_todo(id) {
                    warn!("event=delete module=list status=error id={id} error={err}");
                }
            }
            self.subscribers.emit(&ListEvent::Destroyed(todo));
            removed += 1;
        }
        info!("event=clear_completed module=list status=ok removed={removed}");
        removed
    }

    /// Sets every member's completion flag to `done`, persisting each
    /// individually with no atomicity across members.
    ///
    /// Emits one [`ListEvent::Changed`] per member, in list order.
    pub fn toggle_all_complete(&mut self, done: bool) {
        for index in 0..self.todos.len() {
            self.todos[index].done = done;
            let snapshot = self.todos[index].clone();
            self.persist(&snapshot);
            self.subscribers.emit(&ListEvent::Changed(snapshot));
        }
    }

    /// Members with `done == true`, in list order.
    pub fn done(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|todo| todo.done).collect()
    }

    /// Members with `done == false`, in list order.
    ///
    /// The complement of [`done`](Self::done); together they partition the
    /// membership.
    pub fn remaining(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|todo| !todo.done).collect()
    }

    /// Membership counts for the stats display.
    pub fn stats(&self) -> ListStats {
        let done = self.todos.iter().filter(|todo| todo.done).count();
        ListStats {
            total: self.todos.len(),
            done,
            remaining: self.todos.len() - done,
        }
    }

    /// Whether nothing remains to do. True on an empty list.
    pub fn all_done(&self) -> bool {
        self.todos.iter().all(|todo| todo.done)
    }

    /// Member lookup by persistence identity.
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.position_of(id).map(|index| &self.todos[index])
    }

    /// Members in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    fn position_of(&self, id: TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == Some(id))
    }

    /// Best-effort write-back of one member's current state.
    ///
    /// Unsaved members have nothing to update; storage failures are logged
    /// and control returns to the caller untouched.
    fn persist(&self, todo: &Todo) {
        let Some(id) = todo.id else {
            debug!("event=persist module=list status=skip reason=unsaved");
            return;
        };
        if let Err(err) = self.repo.update_todo(todo) {
            warn!("event=persist module=list status=error id={id} error={err}");
        }
    }
}
