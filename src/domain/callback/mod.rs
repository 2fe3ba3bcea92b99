//! Callback domain module for scheduled HTTP callbacks

mod entity;
mod repository;
mod validation;

pub use entity::{Callback, NewCallback};
pub use repository::CallbackRepository;
pub use validation::{validate_callback_url, CallbackValidationError};

#[cfg(test)]
pub use repository::mock::MockCallbackRepository;
