//! Task domain model.
//!
//! A [`Task`] is the only entity this crate persists. Every value here is
//! immutable once built; changes go through the `with_*` methods, which
//! consume the task and return an updated copy.

use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

// =============================================================================
// TaskId
// =============================================================================

/// Opaque identifier of a task.
///
/// Stored as text so that identifiers written by other hosts load unchanged.
/// Freshly generated ids are random UUIDs (v4).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a new random `TaskId`.
    ///
    /// **Note**: This is an impure function (side effect: random number generation).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier without checking it.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// Timestamp
// =============================================================================

/// Creation time of a task, in UTC with millisecond precision.
///
/// Serialized as RFC 3339 with exactly three fractional digits and a `Z`
/// suffix (`2024-01-15T10:30:00.000Z`). Values are truncated to milliseconds
/// on construction, so a serialize/deserialize round trip is lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current time.
    ///
    /// **Note**: This is an impure function (side effect: system clock).
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Creates a `Timestamp`, dropping sub-millisecond precision.
    #[must_use]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.trunc_subsecs(3))
    }

    /// Parses an RFC 3339 string.
    ///
    /// # Errors
    ///
    /// Returns the underlying `chrono` parse error if `value` is not RFC 3339.
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value)
            .map(|datetime| Self::from_datetime(datetime.with_timezone(&Utc)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TaskStatus
// =============================================================================

/// Completion status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    /// The task is still open.
    #[default]
    #[serde(rename = "in progress")]
    InProgress,
    /// The task has been completed.
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    /// Returns `true` for [`TaskStatus::Done`].
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => formatter.write_str("in progress"),
            Self::Done => formatter.write_str("done"),
        }
    }
}

// =============================================================================
// Task
// =============================================================================

/// A single todo item.
///
/// Field order matters: it is the key order of the stored JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, fixed at creation.
    pub id: TaskId,
    /// Short title, at most 25 characters.
    pub title: String,
    /// Body text, at most 120 characters.
    pub content: String,
    /// Creation time, fixed at creation.
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    /// Completion status.
    #[serde(rename = "type")]
    pub status: TaskStatus,
}

impl Task {
    /// Creates an in-progress task.
    ///
    /// This is a pure function; obtain `id` and `created_at` with
    /// [`TaskId::generate`] and [`Timestamp::now`]. The fields are not
    /// validated here, see [`crate::validation::validate_draft`].
    #[must_use]
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at,
            status: TaskStatus::InProgress,
        }
    }

    /// Returns a new task with the given title and content.
    #[must_use]
    pub fn with_text(self, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..self
        }
    }

    /// Returns a new task with the given status.
    #[must_use]
    pub fn with_status(self, status: TaskStatus) -> Self {
        Self { status, ..self }
    }
}

/// Returns a copy of `tasks` ordered by creation time, oldest first.
///
/// The sort is stable: tasks created in the same millisecond keep their
/// relative order. The reducer never calls this; it exists for hosts that
/// want a chronological listing.
#[must_use]
pub fn sort_by_created_at(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| task.created_at);
    sorted
}

// =============================================================================
// Tests
// =============================================================================
