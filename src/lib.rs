//! httpcallback
//!
//! An HTTP service where users register callbacks:
//! - Users and callbacks stored through a repository factory (document store or in-memory)
//! - Controllers return result values that the dispatch layer renders
//! - Server faults become bare 500 responses, client mistakes explicit status results

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
