pub mod pagination;
pub mod routes;

pub use routes::routes;
