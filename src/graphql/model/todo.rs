use async_graphql::{ComplexObject, SimpleObject, ID};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::pagination::Node;

/// A todo of the todo list.
#[derive(Debug, PartialEq, Eq, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Todo {
    #[graphql(skip)]
    /// Todo UUID, exposed as GraphQL `ID`.
    pub _id: Uuid,
    /// Text of the todo.
    pub text: String,
    /// Timestamp when todo was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when todo was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a todo with a fresh UUID, created and updated now.
    pub fn new(text: String) -> Self {
        let now = Utc::now();
        Self {
            _id: Uuid::new_v4(),
            text,
            created_at: now,
            updated_at: now,
        }
    }
}

#[ComplexObject]
impl Todo {
    /// Todo UUID.
    async fn id(&self) -> ID {
        ID(self._id.to_string())
    }
}

/// Todos are ordered by creation time, cursors are their ids.
impl Node for Todo {
    type SortKey = DateTime<Utc>;

    fn cursor(&self) -> String {
        self._id.to_string()
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }
}
