//! Callback request rules

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CallbackValidationError {
    #[error("Callback url cannot be empty")]
    EmptyUrl,

    #[error("Callback url must start with http:// or https://")]
    UnsupportedScheme,

    #[error("Callback url has no host")]
    MissingHost,

    #[error("Callback url cannot contain whitespace")]
    Whitespace,
}

/// Validate the target url of a callback
pub fn validate_callback_url(url: &str) -> Result<(), CallbackValidationError> {
    if url.is_empty() {
        return Err(CallbackValidationError::EmptyUrl);
    }

    if url.chars().any(char::is_whitespace) {
        return Err(CallbackValidationError::Whitespace);
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or(CallbackValidationError::UnsupportedScheme)?;

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();

    if host.is_empty() {
        return Err(CallbackValidationError::MissingHost);
    }

    Ok(())
}
