//! Persistence adapter contracts and implementations.
//!
//! # Responsibility
//! - Define the data access contract the collection layer depends on.
//! - Isolate SQLite query details from collection/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Todo::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `Unsaved`) in
//!   addition to DB transport errors.

pub mod todo_repo;
