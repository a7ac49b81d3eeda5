//! Application state and the reducer that transitions it.
//!
//! [`reduce`] is the only place the task collection changes. It is pure: it
//! borrows the current state and returns a fresh snapshot, leaving the input
//! untouched.
//!
//! # Matching policy
//!
//! Tasks are matched by exact id equality. Ids are unique in a well-formed
//! collection, but if duplicates slip in (for example from hand-edited
//! storage) `Delete` removes every match while `UpdateItem` and `CheckItem`
//! only touch the first one in collection order.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::task::{Task, TaskId, TaskStatus};

/// Display subset selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Filter {
    /// Show everything.
    #[default]
    #[serde(rename = "default")]
    Default,
    /// Show only open tasks.
    #[serde(rename = "in progress")]
    InProgress,
    /// Show only completed tasks.
    #[serde(rename = "done")]
    Done,
}

impl Filter {
    /// Returns `true` if `task` belongs to this subset.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::Default => true,
            Self::InProgress => matches!(task.status, TaskStatus::InProgress),
            Self::Done => matches!(task.status, TaskStatus::Done),
        }
    }
}

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoState {
    /// Tasks in insertion order.
    pub tasks: Vec<Task>,
    /// Active display filter.
    pub filter: Filter,
    /// 1-based page cursor.
    pub current_page: usize,
}

impl TodoState {
    /// Creates the start-up state around previously stored tasks.
    #[must_use]
    pub const fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            filter: Filter::Default,
            current_page: 1,
        }
    }

    /// Returns the first task with `id`, if any.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Returns the tasks selected by the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&Task> {
        filtered(&self.tasks, self.filter)
    }
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Returns the tasks of `tasks` matching `filter`, in order.
#[must_use]
pub fn filtered(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// Computes the state that follows `state` once `action` is applied.
///
/// # Examples
///
/// ```
/// use todo_ledger::action::Action;
/// use todo_ledger::state::{reduce, TodoState};
/// use todo_ledger::task::{Task, TaskId, Timestamp};
///
/// let task = Task::new(TaskId::generate(), "Title", "Body", Timestamp::now());
/// let state = reduce(&TodoState::default(), Action::Add(task.clone()));
/// assert_eq!(state.tasks, vec![task.clone()]);
///
/// let state = reduce(&state, Action::Delete(task.id));
/// assert!(state.tasks.is_empty());
/// ```
#[must_use]
pub fn reduce(state: &TodoState, action: Action) -> TodoState {
    match action {
        Action::Add(task) => {
            let mut tasks = Vec::with_capacity(state.tasks.len() + 1);
            tasks.extend(state.tasks.iter().cloned());
            tasks.push(task);
            TodoState {
                tasks,
                ..state.clone()
            }
        }
        Action::Delete(id) => TodoState {
            tasks: state
                .tasks
                .iter()
                .filter(|task| task.id != id)
                .cloned()
                .collect(),
            ..state.clone()
        },
        Action::Filter(filter) => TodoState {
            filter,
            ..state.clone()
        },
        Action::NextPage(page) => TodoState {
            current_page: page,
            ..state.clone()
        },
        Action::UpdateItem { id, title, content } => TodoState {
            tasks: replace_first(&state.tasks, &id, |task| task.with_text(title, content)),
            ..state.clone()
        },
        Action::CheckItem { id, status } => TodoState {
            tasks: replace_first(&state.tasks, &id, |task| task.with_status(status)),
            ..state.clone()
        },
        Action::Noop => state.clone(),
    }
}

/// Copies `tasks`, passing the first task with `id` through `update`.
fn replace_first(tasks: &[Task], id: &TaskId, update: impl FnOnce(Task) -> Task) -> Vec<Task> {
    let mut update = Some(update);
    tasks
        .iter()
        .map(|task| {
            if &task.id == id
                && let Some(update) = update.take()
            {
                update(task.clone())
            } else {
                task.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Timestamp;
    use rstest::{fixture, rstest};

    fn task(id: &str, title: &str) -> Task {
        Task::new(
            TaskId::new(id),
            title,
            format!("{title} content"),
            Timestamp::parse("2024-01-15T10:30:00.000Z").unwrap(),
        )
    }

    #[fixture]
    fn state() -> TodoState {
        TodoState::new(vec![task("a", "First"), task("b", "Second"), task("c", "Third")])
    }

    #[rstest]
    fn test_new_state_starts_on_first_page_with_default_filter() {
        let state = TodoState::default();
        assert!(state.tasks.is_empty());
        assert_eq!(state.filter, Filter::Default);
        assert_eq!(state.current_page, 1);
    }

    #[rstest]
    fn test_add_appends_to_end(state: TodoState) {
        let added = task("d", "Fourth");
        let next = reduce(&state, Action::Add(added.clone()));

        assert_eq!(next.tasks.len(), 4);
        assert_eq!(next.tasks.last(), Some(&added));
        assert_eq!(&next.tasks[..3], &state.tasks[..]);
    }

    #[rstest]
    fn test_add_does_not_touch_input(state: TodoState) {
        let before = state.clone();
        let _ = reduce(&state, Action::Add(task("d", "Fourth")));
        assert_eq!(state, before);
    }

    #[rstest]
    fn test_delete_removes_matching_task(state: TodoState) {
        let next = reduce(&state, Action::Delete(TaskId::new("b")));
        let ids: Vec<&str> = next.tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[rstest]
    fn test_delete_unknown_id_is_noop(state: TodoState) {
        let next = reduce(&state, Action::Delete(TaskId::new("zzz")));
        assert_eq!(next, state);
    }

    #[rstest]
    fn test_delete_removes_all_duplicates() {
        let state = TodoState::new(vec![task("a", "One"), task("b", "Two"), task("a", "Three")]);
        let next = reduce(&state, Action::Delete(TaskId::new("a")));

        assert_eq!(next.tasks, vec![task("b", "Two")]);
    }

    #[rstest]
    fn test_filter_replaces_filter(state: TodoState) {
        let next = reduce(&state, Action::Filter(Filter::Done));
        assert_eq!(next.filter, Filter::Done);
        assert_eq!(next.tasks, state.tasks);
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[case(99)]
    fn test_next_page_is_not_clamped(state: TodoState, #[case] page: usize) {
        let next = reduce(&state, Action::NextPage(page));
        assert_eq!(next.current_page, page);
    }

    #[rstest]
    fn test_update_item_replaces_text_only(state: TodoState) {
        let checked = reduce(
            &state,
            Action::CheckItem {
                id: TaskId::new("b"),
                status: TaskStatus::Done,
            },
        );
        let next = reduce(
            &checked,
            Action::UpdateItem {
                id: TaskId::new("b"),
                title: "Renamed".to_string(),
                content: "New body".to_string(),
            },
        );

        let before = checked.find(&TaskId::new("b")).unwrap();
        let after = next.find(&TaskId::new("b")).unwrap();
        assert_eq!(after.title, "Renamed");
        assert_eq!(after.content, "New body");
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.status, TaskStatus::Done);
    }

    #[rstest]
    fn test_update_item_only_touches_first_duplicate() {
        let state = TodoState::new(vec![task("a", "One"), task("a", "Two")]);
        let next = reduce(
            &state,
            Action::UpdateItem {
                id: TaskId::new("a"),
                title: "Edited".to_string(),
                content: "Edited".to_string(),
            },
        );

        assert_eq!(next.tasks[0].title, "Edited");
        assert_eq!(next.tasks[1].title, "Two");
    }

    #[rstest]
    fn test_update_item_unknown_id_is_noop(state: TodoState) {
        let next = reduce(
            &state,
            Action::UpdateItem {
                id: TaskId::new("zzz"),
                title: "x".to_string(),
                content: "y".to_string(),
            },
        );
        assert_eq!(next, state);
    }

    #[rstest]
    fn test_check_item_replaces_status_only(state: TodoState) {
        let next = reduce(
            &state,
            Action::CheckItem {
                id: TaskId::new("c"),
                status: TaskStatus::Done,
            },
        );

        let before = state.find(&TaskId::new("c")).unwrap();
        let after = next.find(&TaskId::new("c")).unwrap();
        assert_eq!(after.status, TaskStatus::Done);
        assert_eq!(after.clone().with_status(TaskStatus::InProgress), *before);
    }

    #[rstest]
    fn test_check_item_only_touches_first_duplicate() {
        let state = TodoState::new(vec![task("a", "One"), task("a", "Two")]);
        let next = reduce(
            &state,
            Action::CheckItem {
                id: TaskId::new("a"),
                status: TaskStatus::Done,
            },
        );

        assert_eq!(next.tasks[0].status, TaskStatus::Done);
        assert_eq!(next.tasks[1].status, TaskStatus::InProgress);
    }

    #[rstest]
    fn test_noop_returns_equal_state(state: TodoState) {
        assert_eq!(reduce(&state, Action::Noop), state);
    }

    #[rstest]
    fn test_visible_applies_filter(state: TodoState) {
        let checked = reduce(
            &state,
            Action::CheckItem {
                id: TaskId::new("a"),
                status: TaskStatus::Done,
            },
        );

        let done = reduce(&checked, Action::Filter(Filter::Done));
        let open = reduce(&checked, Action::Filter(Filter::InProgress));

        assert_eq!(done.visible().len(), 1);
        assert_eq!(open.visible().len(), 2);
        assert_eq!(checked.visible().len(), 3);
    }

    #[rstest]
    fn test_filter_serializes_with_wire_names() {
        assert_eq!(serde_json::to_string(&Filter::Default).unwrap(), r#""default""#);
        assert_eq!(serde_json::to_string(&Filter::InProgress).unwrap(), r#""in progress""#);
        assert_eq!(serde_json::to_string(&Filter::Done).unwrap(), r#""done""#);
    }
}
