//! Presence and length rules gating task creation and edits.
//!
//! Every function here returns either `Ok(())` or exactly one
//! [`ValidationError`]. Rules never accumulate: the first failure wins.

use thiserror::Error;

use crate::task::TaskId;

/// Maximum number of characters in a task title.
pub const TITLE_MAX_LENGTH: usize = 25;

/// Maximum number of characters in a task body.
pub const CONTENT_MAX_LENGTH: usize = 120;

/// Reason a proposed mutation was rejected.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// The title is empty or whitespace only.
    #[error("Title field is required to be filled out!")]
    MissingTitle,
    /// The title is longer than [`TITLE_MAX_LENGTH`].
    #[error("The title cannot exceed 25 characters!")]
    TitleTooLong,
    /// The content is empty or whitespace only.
    #[error("Content field is required to be filled out!")]
    MissingContent,
    /// The content is longer than [`CONTENT_MAX_LENGTH`].
    #[error("The content cannot exceed 120 characters!")]
    ContentTooLong,
    /// No task id was supplied.
    #[error("Todo do not exist!")]
    MissingId,
}

impl ValidationError {
    /// Returns `true` if the error concerns the title field.
    ///
    /// Forms use this to decide which input to highlight.
    #[must_use]
    pub const fn is_title_error(self) -> bool {
        matches!(self, Self::MissingTitle | Self::TitleTooLong)
    }

    /// Returns `true` if the error concerns the content field.
    #[must_use]
    pub const fn is_content_error(self) -> bool {
        matches!(self, Self::MissingContent | Self::ContentTooLong)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn exceeds(value: &str, max_length: usize) -> bool {
    value.chars().count() > max_length
}

/// Checks a title on its own.
///
/// # Errors
///
/// [`ValidationError::MissingTitle`] if blank, [`ValidationError::TitleTooLong`]
/// if longer than 25 characters.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if is_blank(title) {
        Err(ValidationError::MissingTitle)
    } else if exceeds(title, TITLE_MAX_LENGTH) {
        Err(ValidationError::TitleTooLong)
    } else {
        Ok(())
    }
}

/// Checks a content body on its own.
///
/// # Errors
///
/// [`ValidationError::MissingContent`] if blank,
/// [`ValidationError::ContentTooLong`] if longer than 120 characters.
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if is_blank(content) {
        Err(ValidationError::MissingContent)
    } else if exceeds(content, CONTENT_MAX_LENGTH) {
        Err(ValidationError::ContentTooLong)
    } else {
        Ok(())
    }
}

/// Checks the title/content pair of a new or edited task.
///
/// Presence is checked before length, and title before content within each
/// tier, so a blank content beats an over-long title.
///
/// # Errors
///
/// The first failing rule as a [`ValidationError`].
///
/// # Examples
///
/// ```
/// use todo_ledger::validation::{validate_draft, ValidationError};
///
/// assert_eq!(validate_draft("", "body"), Err(ValidationError::MissingTitle));
/// assert_eq!(validate_draft(&"a".repeat(25), &"b".repeat(120)), Ok(()));
/// ```
pub fn validate_draft(title: &str, content: &str) -> Result<(), ValidationError> {
    if is_blank(title) {
        return Err(ValidationError::MissingTitle);
    }
    if is_blank(content) {
        return Err(ValidationError::MissingContent);
    }
    validate_title(title)?;
    validate_content(content)
}

/// Checks that an id was supplied for delete, update, or check.
///
/// # Errors
///
/// [`ValidationError::MissingId`] if the id is blank.
pub fn validate_id(id: &TaskId) -> Result<(), ValidationError> {
    if id.is_blank() {
        Err(ValidationError::MissingId)
    } else {
        Ok(())
    }
}
