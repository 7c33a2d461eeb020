//! Identifier generation for the session-backed store.

use entities::TodoListId;

/// Hands out increasing integer IDs, shared by lists and todos.
///
/// IDs are never reused while the generator lives, which keeps them unique
/// within each entity kind for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: TodoListId,
}

impl IdGenerator {
    /// Creates a generator whose first ID is 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next unused ID.
    pub fn next_id(&mut self) -> TodoListId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
