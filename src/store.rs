use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use log::debug;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{error::TodoError, graphql::model::todo::Todo};

/// Handle to the todo store shared between request handlers.
pub type SharedTodoStore = Arc<RwLock<TodoStore>>;

/// In-memory todo store.
///
/// Todos are indexed by UUID, while `order` keeps the insertion order used
/// when listing.
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: HashMap<Uuid, Todo>,
    order: Vec<Uuid>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the store into a handle that can be placed into GraphQL context data.
    pub fn shared(self) -> SharedTodoStore {
        Arc::new(RwLock::new(self))
    }

    /// Number of stored todos.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Snapshot of all todos in insertion order.
    pub fn list(&self) -> Vec<Todo> {
        self.order
            .iter()
            .filter_map(|id| self.todos.get(id))
            .cloned()
            .collect()
    }

    /// Retrieves todo of specific id.
    pub fn get(&self, id: &str) -> Result<Todo, TodoError> {
        let key = parse_id(id)?;
        self.todos
            .get(&key)
            .cloned()
            .ok_or_else(|| TodoError::NotFound(id.to_string()))
    }

    /// Adds a todo with a fresh UUID and the current timestamp.
    pub fn insert(&mut self, text: String) -> Todo {
        let todo = Todo::new(text);
        self.order.push(todo._id);
        self.todos.insert(todo._id, todo.clone());
        debug!("Inserted todo `{}`.", todo._id);
        todo
    }

    /// Replaces the text of a todo and refreshes its update timestamp.
    pub fn update(&mut self, id: &str, text: String) -> Result<Todo, TodoError> {
        let key = parse_id(id)?;
        let todo = self
            .todos
            .get_mut(&key)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
        todo.text = text;
        todo.updated_at = Utc::now();
        debug!("Updated todo `{}`.", key);
        Ok(todo.clone())
    }

    /// Deletes todo of specific id.
    pub fn delete(&mut self, id: &str) -> Result<(), TodoError> {
        let key = parse_id(id)?;
        if self.todos.remove(&key).is_none() {
            return Err(TodoError::NotFound(id.to_string()));
        }
        self.order.retain(|ordered_id| *ordered_id != key);
        debug!("Deleted todo `{}`.", key);
        Ok(())
    }

    /// Inserts `count` demo todos named `Todo #1` to `Todo #count`.
    pub fn seed(&mut self, count: usize) {
        for number in 1..=count {
            self.insert(format!("Todo #{}", number));
        }
    }
}

/// Ids which are no valid UUIDs cannot belong to any stored todo.
fn parse_id(id: &str) -> Result<Uuid, TodoError> {
    Uuid::parse_str(id).map_err(|_| TodoError::NotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(store: &TodoStore) -> Vec<String> {
        store.list().into_iter().map(|todo| todo.text).collect()
    }

    #[test]
    fn lists_in_insertion_order() {
        let mut store = TodoStore::new();
        store.insert("first".to_string());
        store.insert("second".to_string());
        store.insert("third".to_string());
        assert_eq!(texts(&store), ["first", "second", "third"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn insert_assigns_fresh_ids_and_timestamps() {
        let mut store = TodoStore::new();
        let first = store.insert("a".to_string());
        let second = store.insert("a".to_string());
        assert_ne!(first._id, second._id);
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(store.get(&first._id.to_string()), Ok(first));
    }

    #[test]
    fn update_changes_text_and_keeps_position() {
        let mut store = TodoStore::new();
        let first = store.insert("first".to_string());
        store.insert("second".to_string());
        let updated = store
            .update(&first._id.to_string(), "changed".to_string())
            .unwrap();
        assert_eq!(updated._id, first._id);
        assert_eq!(updated.created_at, first.created_at);
        assert!(updated.updated_at >= first.updated_at);
        assert_eq!(texts(&store), ["changed", "second"]);
    }

    #[test]
    fn delete_removes_from_listing() {
        let mut store = TodoStore::new();
        let first = store.insert("first".to_string());
        store.insert("second".to_string());
        store.delete(&first._id.to_string()).unwrap();
        assert_eq!(texts(&store), ["second"]);
        assert_eq!(
            store.get(&first._id.to_string()),
            Err(TodoError::NotFound(first._id.to_string()))
        );
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut store = TodoStore::new();
        let unknown = Uuid::new_v4().to_string();
        assert_eq!(
            store.update(&unknown, "x".to_string()),
            Err(TodoError::NotFound(unknown.clone()))
        );
        assert_eq!(
            store.delete(&unknown),
            Err(TodoError::NotFound(unknown.clone()))
        );
        assert_eq!(
            store.delete("not-a-uuid"),
            Err(TodoError::NotFound("not-a-uuid".to_string()))
        );
        assert!(store.list().is_empty());
    }

    #[test]
    fn seed_inserts_numbered_todos() {
        let mut store = TodoStore::new();
        store.seed(3);
        assert_eq!(texts(&store), ["Todo #1", "Todo #2", "Todo #3"]);
    }
}
