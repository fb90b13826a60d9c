use async_graphql::{Context, Object, Result, ResultExt, ID};
use log::info;

use crate::{error::TodoError, graphql::model::todo::Todo, store::SharedTodoStore};

/// Describes GraphQL todo mutations.
pub struct Mutation;

#[Object]
impl Mutation {
    /// Adds a todo with the given text.
    async fn add_todo<'a>(
        &self,
        ctx: &Context<'a>,
        #[graphql(desc = "Text of the todo to add.")] text: String,
    ) -> Result<Todo> {
        let text = validate_text(text).extend()?;
        let store = ctx.data::<SharedTodoStore>()?;
        let todo = store.write().await.insert(text);
        info!("Added todo `{}`.", todo._id);
        Ok(todo)
    }

    /// Updates the text of a todo referenced with an id.
    async fn update_todo<'a>(
        &self,
        ctx: &Context<'a>,
        #[graphql(desc = "UUID of todo to update.")] id: ID,
        #[graphql(desc = "New text of the todo.")] text: String,
    ) -> Result<Todo> {
        let text = validate_text(text).extend()?;
        let store = ctx.data::<SharedTodoStore>()?;
        let todo = store.write().await.update(&id, text).extend()?;
        info!("Updated todo `{}`.", todo._id);
        Ok(todo)
    }

    /// Deletes todo of id.
    async fn delete_todo<'a>(
        &self,
        ctx: &Context<'a>,
        #[graphql(desc = "UUID of todo to delete.")] id: ID,
    ) -> Result<bool> {
        let store = ctx.data::<SharedTodoStore>()?;
        store.write().await.delete(&id).extend()?;
        info!("Deleted todo `{}`.", id.as_str());
        Ok(true)
    }
}

/// Rejects todo texts that are empty or only whitespace.
fn validate_text(text: String) -> Result<String, TodoError> {
    match text.trim().is_empty() {
        true => Err(TodoError::EmptyText),
        false => Ok(text),
    }
}
