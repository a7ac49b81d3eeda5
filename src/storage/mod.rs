//! Persistence of the task collection in a key-value text store.
//!
//! The store abstraction mirrors browser local storage: string keys mapping
//! to string values. [`TaskStorage`] binds one store to one key and handles
//! the JSON encoding of the collection.
//!
//! # Format
//!
//! The stored value is a compact JSON array of task objects with the keys
//! `id`, `title`, `content`, `createdAt`, `type`, in that order. Encoding a
//! freshly decoded collection reproduces the stored text byte for byte.
//!
//! A value that does not decode can be copied aside with
//! [`TaskStorage::preserve_corrupted`] before it is overwritten. The copy
//! lives under the key with [`CORRUPTED_SUFFIX`] appended.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::task::Task;

/// Suffix of the key that receives a copy of an undecodable stored value.
pub const CORRUPTED_SUFFIX: &str = ".corrupted";

// =============================================================================
// Errors
// =============================================================================

/// Failure of a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be used by this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying I/O failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused the operation (quota, read-only, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure while loading or saving the task collection.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored value under `key` is not a valid task collection.
    #[error("Stored value under {key:?} is corrupted: {source}")]
    Corrupted {
        /// Key whose value failed to decode.
        key: String,
        /// Decoder error.
        source: serde_json::Error,
    },

    /// The collection could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl PersistenceError {
    /// Returns `true` for [`PersistenceError::Corrupted`].
    #[must_use]
    pub const fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted { .. })
    }
}

// =============================================================================
// KeyValueStore
// =============================================================================

/// A string-to-string store, the shape of browser local storage.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// TaskStorage
// =============================================================================

/// Loads and saves the task collection under a fixed key.
#[derive(Debug, Clone)]
pub struct TaskStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TaskStorage<S> {
    /// Binds `store` to `key`.
    #[must_use]
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Returns the key this adapter reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the backing store mutably.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Releases the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the key that [`TaskStorage::preserve_corrupted`] writes to.
    #[must_use]
    pub fn corrupted_key(&self) -> String {
        format!("{}{CORRUPTED_SUFFIX}", self.key)
    }

    /// Reads the stored collection.
    ///
    /// An absent key or an empty value yields an empty collection.
    ///
    /// # Errors
    ///
    /// [`PersistenceError::Corrupted`] if the stored text does not decode,
    /// [`PersistenceError::Storage`] if the backend fails.
    pub fn load(&self) -> Result<Vec<Task>, PersistenceError> {
        let Some(text) = self.store.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        if text.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|source| PersistenceError::Corrupted {
            key: self.key.clone(),
            source,
        })
    }

    /// Overwrites the stored collection with `tasks`.
    ///
    /// # Errors
    ///
    /// [`PersistenceError::Storage`] if the backend fails.
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), PersistenceError> {
        let text = encode(tasks)?;
        self.store.set_item(&self.key, &text)?;
        Ok(())
    }

    /// Copies the raw stored value to [`TaskStorage::corrupted_key`].
    ///
    /// Returns the copied key, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// [`PersistenceError::Storage`] if the backend fails.
    pub fn preserve_corrupted(&mut self) -> Result<Option<String>, PersistenceError> {
        let Some(text) = self.store.get_item(&self.key)? else {
            return Ok(None);
        };
        let backup = self.corrupted_key();
        self.store.set_item(&backup, &text)?;
        Ok(Some(backup))
    }

    /// Removes the stored collection.
    ///
    /// # Errors
    ///
    /// [`PersistenceError::Storage`] if the backend fails.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.store.remove_item(&self.key)?;
        Ok(())
    }
}

/// Encodes `tasks` exactly as [`TaskStorage::save`] stores them.
///
/// # Errors
///
/// [`PersistenceError::Serialization`] if encoding fails.
pub fn encode(tasks: &[Task]) -> Result<String, PersistenceError> {
    serde_json::to_string(tasks).map_err(PersistenceError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskId, TaskStatus, Timestamp};
    use rstest::{fixture, rstest};

    const STORED: &str = concat!(
        r#"[{"id":"1b9d6bcd-bbfd-4b2d-9b5d-ab8dfbbd4bed","title":"Buy milk","content":"Two litres","createdAt":"2024-01-15T10:30:00.000Z","type":"in progress"},"#,
        r#"{"id":"6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b","title":"Call Bob","content":"About the trip","createdAt":"2024-01-16T08:05:12.345Z","type":"done"}]"#
    );

    #[fixture]
    fn storage() -> TaskStorage<MemoryStore> {
        TaskStorage::new(MemoryStore::new(), "todo")
    }

    #[rstest]
    fn test_load_absent_key_is_empty(storage: TaskStorage<MemoryStore>) {
        assert!(storage.load().unwrap().is_empty());
    }

    #[rstest]
    fn test_load_restores_typed_fields() {
        let storage = TaskStorage::new(MemoryStore::new().with_item("todo", STORED), "todo");
        let tasks = storage.load().unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert_eq!(
            tasks[1].created_at,
            Timestamp::parse("2024-01-16T08:05:12.345Z").unwrap()
        );
        assert_eq!(tasks[1].status, TaskStatus::Done);
    }

    #[rstest]
    fn test_save_of_loaded_collection_is_byte_identical() {
        let mut storage = TaskStorage::new(MemoryStore::new().with_item("todo", STORED), "todo");
        let tasks = storage.load().unwrap();

        storage.save(&tasks).unwrap();

        assert_eq!(storage.store().get_item("todo").unwrap().as_deref(), Some(STORED));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"id":"a"}"#)]
    #[case(r#"[{"id":"a","title":"t","content":"c","createdAt":"yesterday","type":"done"}]"#)]
    #[case(r#"[{"id":"a","title":"t","content":"c","createdAt":"2024-01-15T10:30:00.000Z","type":"archived"}]"#)]
    fn test_load_corrupted_value_is_distinguishable(#[case] stored: &str) {
        let storage = TaskStorage::new(MemoryStore::new().with_item("todo", stored), "todo");
        let error = storage.load().unwrap_err();

        assert!(error.is_corrupted());
        assert!(error.to_string().contains("\"todo\""));
    }

    #[rstest]
    fn test_load_empty_value_is_empty_collection() {
        let storage = TaskStorage::new(MemoryStore::new().with_item("todo", ""), "todo");

        assert!(storage.load().unwrap().is_empty());
    }

    #[rstest]
    fn test_preserve_corrupted_copies_raw_value() {
        let mut storage = TaskStorage::new(MemoryStore::new().with_item("todo", "{broken"), "todo");

        let backup = storage.preserve_corrupted().unwrap();

        assert_eq!(backup.as_deref(), Some("todo.corrupted"));
        assert_eq!(
            storage.store().get_item("todo.corrupted").unwrap().as_deref(),
            Some("{broken")
        );
        assert_eq!(storage.store().get_item("todo").unwrap().as_deref(), Some("{broken"));
    }

    #[rstest]
    fn test_preserve_corrupted_without_value(mut storage: TaskStorage<MemoryStore>) {
        assert_eq!(storage.preserve_corrupted().unwrap(), None);
        assert!(storage.store().is_empty());
    }

    #[rstest]
    fn test_save_then_load(mut storage: TaskStorage<MemoryStore>) {
        let task = Task::new(TaskId::generate(), "Title", "Body", Timestamp::now());

        storage.save(std::slice::from_ref(&task)).unwrap();

        assert_eq!(storage.load().unwrap(), vec![task]);
    }

    #[rstest]
    fn test_clear_removes_value(mut storage: TaskStorage<MemoryStore>) {
        storage.save(&[]).unwrap();
        storage.clear().unwrap();

        assert_eq!(storage.store().get_item("todo").unwrap(), None);
    }

    #[rstest]
    fn test_empty_collection_encodes_as_empty_array() {
        assert_eq!(encode(&[]).unwrap(), "[]");
    }
}
