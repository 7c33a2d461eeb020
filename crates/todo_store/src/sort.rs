//! Ordering of todo lists and todos by completion status and title.

use entities::{Todo, TodoList};

/// Something with a title that can be complete or not.
pub trait Completable {
    /// Title used for ordering.
    fn title(&self) -> &str;

    /// Whether the item counts as complete.
    fn is_complete(&self) -> bool;
}

impl Completable for Todo {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_complete(&self) -> bool {
        self.done
    }
}

impl Completable for TodoList {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_complete(&self) -> bool {
        self.is_done()
    }
}

/// Sorts items so that every incomplete item precedes every complete one.
///
/// Within each group items are ordered by lowercased title. The sort is
/// stable, so items with equal titles keep their input order.
pub fn sort_by_completion<T: Completable>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_cached_key(|item| (item.is_complete(), item.title().to_lowercase()));
    items
}
