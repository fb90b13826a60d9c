use async_graphql::{
    connection::{Connection, Edge, EmptyFields},
    OutputType,
};
use log::debug;

use crate::{graphql::model::todo::Todo, pagination::Page};

/// A connection of todos.
///
/// Exposed as `TodoConnection` with `TodoEdge` edges and the relay `PageInfo`.
pub type TodoConnection = Connection<String, Todo, EmptyFields, EmptyFields>;

pub struct PageWrapper<Node>(pub Page<Node>);

/// Implementation of conversion from an in-memory page to a GraphQL connection.
///
/// Start and end cursors of the page info are taken from the first and last edge.
impl<Node> From<PageWrapper<Node>> for Connection<String, Node, EmptyFields, EmptyFields>
where
    Node: OutputType,
{
    fn from(value: PageWrapper<Node>) -> Self {
        let page = value.0;
        debug!(
            "Converting page of {} edges from {:?} to {:?}.",
            page.edges.len(),
            page.page_info.start_cursor,
            page.page_info.end_cursor
        );
        let mut connection = Connection::new(
            page.page_info.has_previous_page,
            page.page_info.has_next_page,
        );
        connection.edges.extend(
            page.edges
                .into_iter()
                .map(|edge| Edge::new(edge.cursor, edge.node)),
        );
        connection
    }
}
