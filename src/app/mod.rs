// Application layer: request schema, route table and response shapes.

pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod schema;
pub mod stdio;

pub use error::ApiError;
pub use response::ApiResponse;
pub use routes::{ApiRequest, Method, Router};
