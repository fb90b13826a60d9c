pub mod todo_connection;
