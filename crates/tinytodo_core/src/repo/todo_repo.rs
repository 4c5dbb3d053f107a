//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `todos` table.
//! - Assign persistence identity (a fresh UUID) on first save.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Todo::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `find_all` returns rows in display order (`display_order ASC, uuid ASC`).

use crate::db::DbError;
use crate::model::todo::{Todo, TodoId, TodoValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    uuid,
    content,
    done,
    display_order
FROM todos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoValidationError),
    Db(DbError),
    /// The targeted row does not exist in storage.
    NotFound(TodoId),
    /// `create_todo` was handed a todo that already has an identity.
    AlreadySaved(TodoId),
    /// `update_todo`/`delete_todo` need an identity assigned by a prior save.
    Unsaved,
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::AlreadySaved(id) => write!(f, "todo already saved with id {id}"),
            Self::Unsaved => write!(f, "todo has no persistence id yet"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for todo records.
///
/// The collection layer holds this as its only storage seam, so tests and
/// alternative backends can stand in for SQLite.
pub trait TodoRepository {
    /// Persists a new todo and returns its freshly assigned identity.
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId>;
    /// Overwrites the stored row matching `todo.id`.
    fn update_todo(&self, todo: &Todo) -> RepoResult<()>;
    /// Removes the stored row for `id`.
    fn delete_todo(&self, id: TodoId) -> RepoResult<()>;
    /// Returns all stored todos in display order.
    fn find_all(&self) -> RepoResult<Vec<Todo>>;
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId> {
        todo.validate()?;
        if let Some(id) = todo.id {
            return Err(RepoError::AlreadySaved(id));
        }

        let id: TodoId = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO todos (uuid, content, done, display_order)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                todo.content.as_str(),
                bool_to_int(todo.done),
                todo.order,
            ],
        )?;

        Ok(id)
    }

    fn update_todo(&self, todo: &Todo) -> RepoResult<()> {
        todo.validate()?;
        let id = todo.id.ok_or(RepoError::Unsaved)?;

        let changed = self.conn.execute(
            "UPDATE todos
             SET
                content = ?1,
                done = ?2,
                display_order = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?4;",
            params![
                todo.content.as_str(),
                bool_to_int(todo.done),
                todo.order,
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} ORDER BY display_order ASC, uuid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in todos.uuid"))
    })?;

    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in todos.done"
            )));
        }
    };

    let todo = Todo {
        id: Some(id),
        content: row.get("content")?,
        done,
        order: row.get("display_order")?,
    };
    todo.validate()?;
    Ok(todo)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
