//! API layer - controllers, result rendering and HTTP wiring

pub mod controllers;
pub mod dispatch;
pub mod middleware;
pub mod result;
pub mod router;
pub mod state;
pub mod types;

pub use dispatch::{write_result_or_error, Dispatch, HandlerResult};
pub use result::{ActionResult, JsonDocument};
pub use router::create_router;
pub use state::AppState;
