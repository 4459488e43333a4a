//! HTTP API for gateway callbacks.

mod handlers;
mod types;

pub use handlers::{create_router, AppState};
pub use types::*;
