//! Request types shared by the controllers

pub mod json;

pub use json::{DecodeError, Json};
