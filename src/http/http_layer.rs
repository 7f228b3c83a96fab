// HTTP layer - axum routes and handlers.

pub mod handlers;
pub mod server;

pub use server::{build_router, AppState};
