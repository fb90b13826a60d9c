use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Failures surfaced by the todo service to GraphQL clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No todo with the given id is present in the store.
    #[error("Todo with id: `{0}` not found.")]
    NotFound(String),

    /// A page size argument was negative.
    #[error("Argument `{argument}` must be a non-negative integer, got `{value}`.")]
    InvalidPageSize { argument: &'static str, value: i32 },

    /// Todo text was empty or consisted only of whitespace.
    #[error("Todo text must not be empty.")]
    EmptyText,
}

impl TodoError {
    /// Machine readable error code, written to the `code` extension of a GraphQL error.
    pub fn code(&self) -> &'static str {
        match self {
            TodoError::NotFound(_) => "NOT_FOUND",
            TodoError::InvalidPageSize { .. } | TodoError::EmptyText => "BAD_USER_INPUT",
        }
    }
}

impl ErrorExtensions for TodoError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}
