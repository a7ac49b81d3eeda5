//! The state holder a presentation layer talks to.
//!
//! [`TodoStore`] owns the current [`TodoState`] snapshot and the
//! [`TaskStorage`] it is persisted through. Every mutation goes through
//! [`TodoStore::dispatch`], which runs the reducer and then writes the full
//! task collection back. The controller methods (`add_task`, `update_task`,
//! ...) validate their input first and report the result as an [`Outcome`];
//! a rejected request never reaches the reducer.
//!
//! # Lifecycle
//!
//! ```rust
//! use todo_ledger::config::StoreConfig;
//! use todo_ledger::storage::MemoryStore;
//! use todo_ledger::store::TodoStore;
//!
//! let mut store = TodoStore::open(MemoryStore::new(), StoreConfig::default()).unwrap();
//! let outcome = store.add_task("Buy milk", "Two litres").unwrap();
//! assert!(outcome.is_success());
//!
//! let backing = store.close().unwrap();
//! let reopened = TodoStore::open(backing, StoreConfig::default()).unwrap();
//! assert_eq!(reopened.state().tasks.len(), 1);
//! ```

use thiserror::Error;

use crate::action::Action;
use crate::config::{ConfigError, StoreConfig};
use crate::outcome::{Feedback, Outcome};
use crate::pagination::{Page, paginate};
use crate::state::{Filter, TodoState, reduce};
use crate::storage::{KeyValueStore, PersistenceError, TaskStorage, encode};
use crate::task::{Task, TaskId, TaskStatus, Timestamp};
use crate::validation::{ValidationError, validate_draft, validate_id};

/// Failure of the store itself, as opposed to a refused request.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Loading or saving the task collection failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Owner of the current state and its persistence.
///
/// All mutations take `&mut self`, so they apply one at a time in call order.
#[derive(Debug)]
pub struct TodoStore<S> {
    storage: TaskStorage<S>,
    config: StoreConfig,
    state: TodoState,
    unsaved: bool,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Opens a store over `store`, loading the collection saved under
    /// `config.storage_key`.
    ///
    /// A corrupted stored value is copied to
    /// [`TaskStorage::corrupted_key`] and the store starts empty. The first
    /// save then replaces the original key, but the copy is never touched.
    ///
    /// # Errors
    ///
    /// [`StoreError::Config`] for an invalid `config`,
    /// [`StoreError::Persistence`] if the backend cannot be read or the
    /// corrupted value cannot be copied.
    pub fn open(store: S, config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        let mut storage = TaskStorage::new(store, config.storage_key.clone());
        let tasks = match storage.load() {
            Ok(tasks) => tasks,
            Err(error) if error.is_corrupted() => {
                let backup = storage.preserve_corrupted()?;
                tracing::warn!(
                    key = storage.key(),
                    backup = backup.as_deref(),
                    %error,
                    "unreadable task collection set aside"
                );
                Vec::new()
            }
            Err(error) => return Err(error.into()),
        };
        tracing::info!(key = storage.key(), tasks = tasks.len(), "todo store opened");
        Ok(Self {
            storage,
            config,
            state: TodoState::new(tasks),
            unsaved: false,
        })
    }

    /// Closes the store and hands back the backing store.
    ///
    /// If the last save failed, it is retried first.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persistence`] if that retry fails.
    pub fn close(mut self) -> Result<S, StoreError> {
        if self.unsaved {
            self.persist()?;
        }
        tracing::info!(key = self.storage.key(), tasks = self.state.tasks.len(), "todo store closed");
        Ok(self.storage.into_store())
    }

    /// Current snapshot.
    pub const fn state(&self) -> &TodoState {
        &self.state
    }

    /// Active configuration.
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns `true` if the latest snapshot has not reached storage.
    pub const fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// The page selected by the current cursor.
    pub fn page(&self) -> Page<'_> {
        paginate(
            &self.state.tasks,
            self.state.current_page,
            self.config.page_size,
        )
    }

    /// Applies `action` and persists the resulting task collection.
    ///
    /// The action goes to the reducer as is. Unlike the controller methods
    /// it is not validated, so a raw [`Action::Add`] or
    /// [`Action::UpdateItem`] can store text over the length limits or a
    /// duplicate id. Callers handling user input use `add_task`,
    /// `update_task`, `check_task` or `delete_task` instead.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persistence`] if the save fails. The new snapshot is
    /// kept in memory either way and is written again on the next dispatch
    /// or on [`TodoStore::close`].
    pub fn dispatch(&mut self, action: Action) -> Result<&TodoState, StoreError> {
        let kind = action.kind();
        self.state = reduce(&self.state, action);
        tracing::debug!(
            action = kind,
            tasks = self.state.tasks.len(),
            page = self.state.current_page,
            "action applied"
        );
        self.persist()?;
        Ok(&self.state)
    }

    /// Creates an in-progress task from user input.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persistence`] if the save fails.
    pub fn add_task(&mut self, title: &str, content: &str) -> Result<Outcome, StoreError> {
        if let Err(error) = validate_draft(title, content) {
            return Ok(reject("add", error));
        }
        let task = Task::new(TaskId::generate(), title, content, Timestamp::now());
        self.dispatch(Action::Add(task))?;
        Ok(Outcome::Success(Feedback::Added))
    }

    /// Removes the task with `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persistence`] if the save fails.
    pub fn delete_task(&mut self, id: &TaskId) -> Result<Outcome, StoreError> {
        if let Err(error) = validate_id(id) {
            return Ok(reject("delete", error));
        }
        self.dispatch(Action::Delete(id.clone()))?;
        Ok(Outcome::Success(Feedback::Deleted))
    }

    /// Replaces the title and content of the task with `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persistence`] if the save fails.
    pub fn update_task(
        &mut self,
        id: &TaskId,
        title: &str,
        content: &str,
    ) -> Result<Outcome, StoreError> {
        if let Err(error) = validate_id(id).and_then(|()| validate_draft(title, content)) {
            return Ok(reject("update", error));
        }
        self.dispatch(Action::UpdateItem {
            id: id.clone(),
            title: title.to_string(),
            content: content.to_string(),
        })?;
        Ok(Outcome::Success(Feedback::Updated))
    }

    /// Marks the task with `id` as done.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persistence`] if the save fails.
    pub fn check_task(&mut self, id: &TaskId) -> Result<Outcome, StoreError> {
        if let Err(error) = validate_id(id) {
            return Ok(reject("check", error));
        }
        self.dispatch(Action::CheckItem {
            id: id.clone(),
            status: TaskStatus::Done,
        })?;
        Ok(Outcome::Success(Feedback::Completed))
    }

    /// Moves the page cursor.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persistence`] if the save fails.
    pub fn select_page(&mut self, page: usize) -> Result<&TodoState, StoreError> {
        self.dispatch(Action::NextPage(page))
    }

    /// Replaces the display filter.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persistence`] if the save fails.
    pub fn set_filter(&mut self, filter: Filter) -> Result<&TodoState, StoreError> {
        self.dispatch(Action::Filter(filter))
    }

    /// The task collection as JSON text, as it is stored.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persistence`] if encoding fails.
    pub fn export(&self) -> Result<String, StoreError> {
        Ok(encode(&self.state.tasks)?)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        match self.storage.save(&self.state.tasks) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(error) => {
                self.unsaved = true;
                tracing::error!(key = self.storage.key(), %error, "failed to save task collection");
                Err(error.into())
            }
        }
    }
}

fn reject(operation: &'static str, error: ValidationError) -> Outcome {
    tracing::debug!(operation, reason = %error, "request rejected");
    Outcome::Failure(error)
}
