use async_graphql::{extensions::Logger, EmptySubscription, Schema};

use crate::store::SharedTodoStore;

pub mod model;
pub mod mutation;
pub mod query;

use mutation::Mutation;
use query::Query;

/// GraphQL schema of the todo service.
pub type TodoSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builds the schema with the todo store as context data.
pub fn build_schema(store: SharedTodoStore) -> TodoSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .extension(Logger)
        .data(store)
        .finish()
}

/// Builds the schema without context data, used for SDL export.
pub fn sdl() -> String {
    Schema::build(Query, Mutation, EmptySubscription)
        .finish()
        .sdl()
}
