//! Result of a controller operation as seen by the user.

use std::fmt;

use crate::validation::ValidationError;

/// What a successful operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// A task was created.
    Added,
    /// A task's text was changed.
    Updated,
    /// A task was removed.
    Deleted,
    /// A task was marked done.
    Completed,
}

impl fmt::Display for Feedback {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => formatter.write_str("Added successfully"),
            Self::Updated => formatter.write_str("Updated successfully"),
            Self::Deleted => formatter.write_str("Deleted successfully"),
            Self::Completed => formatter.write_str("Completed successfully"),
        }
    }
}

/// Either a success notice or the single reason a mutation was refused.
///
/// A presentation layer shows exactly one message per outcome: on success
/// it clears any error it was showing, on failure it clears the success
/// notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Outcome {
    /// The action was dispatched.
    Success(Feedback),
    /// Validation refused the request; state is unchanged.
    Failure(ValidationError),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Success`].
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the validation error of a failed outcome.
    pub const fn error(&self) -> Option<ValidationError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(*error),
        }
    }

    /// Returns the message to show the user.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(feedback) => fmt::Display::fmt(feedback, formatter),
            Self::Failure(error) => fmt::Display::fmt(error, formatter),
        }
    }
}

impl From<ValidationError> for Outcome {
    fn from(error: ValidationError) -> Self {
        Self::Failure(error)
    }
}
