//! Controllers
//!
//! Each controller holds the repositories it needs and answers with a
//! [`HandlerResult`](crate::api::dispatch::HandlerResult). Client mistakes
//! are `Ok` status results; `Err` always means a server fault.

pub mod callbacks;
pub mod home;
pub mod users;

pub use callbacks::CallbackController;
pub use home::HomeController;
pub use users::UserController;
