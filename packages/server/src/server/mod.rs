// HTTP server setup (Axum health endpoint; business APIs are Restate handlers)
pub mod app;
pub mod routes;

pub use app::*;
