//! Page slicing over the task collection.
//!
//! Pages are 1-based. Slicing is clamped to the collection, so any page
//! cursor, including 0 or one past the end, yields a (possibly empty) slice
//! rather than a panic.

use std::ops::RangeInclusive;

use crate::task::Task;

/// Number of tasks shown per page.
pub const PAGE_SIZE: usize = 6;

/// Returns the number of pages needed for `total` items.
///
/// An empty collection has zero pages.
///
/// # Examples
///
/// ```
/// use todo_ledger::pagination::page_count;
///
/// assert_eq!(page_count(13, 6), 3);
/// assert_eq!(page_count(0, 6), 0);
/// ```
#[must_use]
pub const fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The visible part of the collection together with the page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// Tasks on the selected page.
    pub items: &'a [Task],
    /// Selected page, as stored in the state.
    pub current_page: usize,
    /// Total number of pages.
    pub page_count: usize,
}

impl Page<'_> {
    /// Returns `true` if the selected page shows nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page numbers a pager should offer, `1..=page_count`.
    ///
    /// The range is empty when there are no tasks.
    #[must_use]
    pub const fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.page_count
    }

    /// Returns `true` if a page after the selected one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }

    /// Returns `true` if a page before the selected one exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// Slices `tasks` down to `current_page`.
///
/// Covers indices `(current_page - 1) * page_size` up to, but excluding,
/// `current_page * page_size`, clamped to the collection.
#[must_use]
pub fn paginate(tasks: &[Task], current_page: usize, page_size: usize) -> Page<'_> {
    let items = match current_page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(page_size).min(tasks.len());
            let end = current_page.saturating_mul(page_size).min(tasks.len());
            &tasks[start..end]
        }
        None => &[],
    };
    Page {
        items,
        current_page,
        page_count: page_count(tasks.len(), page_size),
    }
}
