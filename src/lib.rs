//! # todo-ledger
//!
//! The state-transition and validation core of a single-list todo manager.
//!
//! ## Overview
//!
//! A presentation layer (web view, TUI, native UI) renders forms and lists;
//! this crate decides what those forms are allowed to change and keeps the
//! collection durable. It includes:
//!
//! - **Task model**: [`task::Task`] with its id, timestamp, and status types
//! - **Validation**: presence and length rules for titles and content
//! - **Reducer**: the pure `(state, action) -> state` transition function
//! - **Pagination**: page slicing and page counts over the collection
//! - **Persistence**: a key-value store abstraction with in-memory and
//!   file-backed implementations, plus the JSON codec for the collection
//! - **Store**: the state holder tying the above together and reporting
//!   each request as an [`outcome::Outcome`]
//!
//! ## Example
//!
//! ```rust
//! use todo_ledger::prelude::*;
//!
//! let mut store = TodoStore::open(MemoryStore::new(), StoreConfig::default()).unwrap();
//!
//! let outcome = store.add_task("", "Forgot the title").unwrap();
//! assert_eq!(outcome, Outcome::Failure(ValidationError::MissingTitle));
//!
//! store.add_task("Water plants", "Balcony and kitchen").unwrap();
//! let page = store.page();
//! assert_eq!(page.items.len(), 1);
//! assert_eq!(page.page_count, 1);
//! ```
//!
//! ## Logging
//!
//! Store operations emit `tracing` events. The crate never installs a
//! subscriber.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the types a presentation layer needs.
///
/// # Usage
///
/// ```rust
/// use todo_ledger::prelude::*;
/// ```
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::config::StoreConfig;
    pub use crate::outcome::{Feedback, Outcome};
    pub use crate::pagination::{PAGE_SIZE, Page, paginate};
    pub use crate::state::{Filter, TodoState, reduce};
    pub use crate::storage::{FileStore, KeyValueStore, MemoryStore, TaskStorage};
    pub use crate::store::{StoreError, TodoStore};
    pub use crate::task::{Task, TaskId, TaskStatus, Timestamp};
    pub use crate::validation::ValidationError;
}

pub mod action;
pub mod config;
pub mod outcome;
pub mod pagination;
pub mod state;
pub mod storage;
pub mod store;
pub mod task;
pub mod validation;
