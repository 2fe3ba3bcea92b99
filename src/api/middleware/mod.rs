//! API middleware components

pub mod auth;
pub mod logging;

pub use auth::Credentials;
pub use logging::logging_middleware;
