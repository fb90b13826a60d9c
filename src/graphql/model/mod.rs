pub mod connection;
pub mod todo;
