
pub mod connection;
pub use connection::Connection;

pub mod api;
pub use api::{ApiClient, ApiError};

pub mod results;
pub use results::QueryError;

pub mod schema;

mod members;
