//! Sample data every new session starts with.

use entities::{Todo, TodoList};

use crate::id::IdGenerator;

/// Owner of the seeded lists.
pub const SEED_USERNAME: &str = "admin";

/// Builds the seed todo lists, drawing IDs from `ids`.
pub fn seed_todo_lists(ids: &mut IdGenerator) -> Vec<TodoList> {
    vec![
        seed_list(
            ids,
            "Work Todos",
            &[
                ("Get coffee", true),
                ("Chat with co-workers", true),
                ("Duck out of meeting", false),
            ],
        ),
        seed_list(
            ids,
            "Home Todos",
            &[
                ("Feed the cats", true),
                ("Go to bed", true),
                ("Buy milk", true),
                ("Study for Launch School", true),
            ],
        ),
        seed_list(ids, "Additional Todos", &[]),
        seed_list(ids, "social todos", &[("Go to Libby's birthday party", false)]),
    ]
}

fn seed_list(ids: &mut IdGenerator, title: &str, todos: &[(&str, bool)]) -> TodoList {
    let list_id = ids.next_id();
    let todos = todos
        .iter()
        .map(|(title, done)| Todo::new(ids.next_id(), *title, SEED_USERNAME).with_done(*done))
        .collect();
    TodoList::new(list_id, title, SEED_USERNAME).with_todos(todos)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_seed_shape() {
        let lists = seed_todo_lists(&mut IdGenerator::new());

        assert_eq!(lists.len(), 4);
        let work = lists.iter().find(|l| l.title == "Work Todos").unwrap();
        assert_eq!(work.todos.len(), 3);
        assert!(!work.is_done());
        assert!(work.has_undone_todos());

        let home = lists.iter().find(|l| l.title == "Home Todos").unwrap();
        assert!(home.is_done());

        let additional = lists.iter().find(|l| l.title == "Additional Todos").unwrap();
        assert!(!additional.is_done());
    }

    #[test]
    fn test_seed_ids_unique_and_owned() {
        let lists = seed_todo_lists(&mut IdGenerator::new());

        let mut seen = HashSet::new();
        for list in &lists {
            assert!(seen.insert(list.id));
            assert_eq!(list.username, SEED_USERNAME);
            for todo in &list.todos {
                assert!(seen.insert(todo.id));
                assert_eq!(todo.username, SEED_USERNAME);
            }
        }
    }
}
