use async_graphql::{Context, Object, Result, ResultExt, ID};

use crate::{
    graphql::model::{
        connection::todo_connection::{PageWrapper, TodoConnection},
        todo::Todo,
    },
    pagination::{paginate, PageRequest},
    store::SharedTodoStore,
};

/// Describes GraphQL todo queries.
pub struct Query;

#[Object]
impl Query {
    /// Retrieves a page of todos ordered by creation time.
    async fn todos<'a>(
        &self,
        ctx: &Context<'a>,
        #[graphql(desc = "Describes that the `first` N todos after `after` should be retrieved.")]
        first: Option<i32>,
        #[graphql(desc = "Cursor of the todo the page starts after.")] after: Option<String>,
        #[graphql(desc = "Describes that the `last` N todos before `before` should be retrieved.")]
        last: Option<i32>,
        #[graphql(desc = "Cursor of the todo the page ends before.")] before: Option<String>,
    ) -> Result<TodoConnection> {
        let page_request = PageRequest::new(first, after, last, before).extend()?;
        let store = ctx.data::<SharedTodoStore>()?;
        let todos = store.read().await.list();
        let page = paginate(&todos, &page_request);
        Ok(TodoConnection::from(PageWrapper(page)))
    }

    /// Retrieves todo of specific id.
    async fn todo<'a>(
        &self,
        ctx: &Context<'a>,
        #[graphql(desc = "UUID of todo to retrieve.")] id: ID,
    ) -> Result<Todo> {
        let store = ctx.data::<SharedTodoStore>()?;
        let todo = store.read().await.get(&id).extend()?;
        Ok(todo)
    }
}
