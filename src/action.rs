//! The action vocabulary accepted by the reducer.

use crate::state::Filter;
use crate::task::{Task, TaskId, TaskStatus};

/// One requested state mutation.
///
/// This is the whole contract between a presentation layer and
/// [`crate::state::reduce`]. Payloads are expected to be validated already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a fully built task.
    Add(Task),
    /// Remove every task carrying this id.
    Delete(TaskId),
    /// Replace the display filter.
    Filter(Filter),
    /// Move the page cursor (1-based). Not clamped.
    NextPage(usize),
    /// Replace title and content of the first task with `id`.
    UpdateItem {
        /// Task to edit.
        id: TaskId,
        /// New title.
        title: String,
        /// New content.
        content: String,
    },
    /// Replace the status of the first task with `id`.
    CheckItem {
        /// Task to mark.
        id: TaskId,
        /// New status.
        status: TaskStatus,
    },
    /// Leaves the state unchanged.
    Noop,
}

impl Action {
    /// Short name of the action, used in log records.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::Filter(_) => "filter",
            Self::NextPage(_) => "nextPage",
            Self::UpdateItem { .. } => "updateItem",
            Self::CheckItem { .. } => "checkItem",
            Self::Noop => "noop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Action::Delete(TaskId::new("a")), "delete")]
    #[case(Action::Filter(Filter::Done), "filter")]
    #[case(Action::NextPage(2), "nextPage")]
    #[case(Action::UpdateItem { id: TaskId::new("a"), title: "t".to_string(), content: "c".to_string() }, "updateItem")]
    #[case(Action::CheckItem { id: TaskId::new("a"), status: TaskStatus::Done }, "checkItem")]
    #[case(Action::Noop, "noop")]
    fn test_action_kind(#[case] action: Action, #[case] kind: &str) {
        assert_eq!(action.kind(), kind);
    }
}
