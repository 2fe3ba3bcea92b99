use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A unique field (e.g. username) is already taken in the backend
    #[error("Duplicate key: {message}")]
    DuplicateKey { message: String },

    /// The backend could not be reached while serving a request
    #[error("Backend unavailable: {message}")]
    BackendUnavailable { message: String },

    /// The backend session could not be established at startup
    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn duplicate_key(message: impl Into<String>) -> Self {
        Self::DuplicateKey {
            message: message.into(),
        }
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("User 'abc' not found");
        assert_eq!(error.to_string(), "Not found: User 'abc' not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_duplicate_key_error() {
        let error = DomainError::duplicate_key("Username 'alice' already exists");
        assert_eq!(
            error.to_string(),
            "Duplicate key: Username 'alice' already exists"
        );
        assert!(error.is_duplicate_key());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_connection_error() {
        let error = DomainError::connection("connection refused");
        assert_eq!(error.to_string(), "Connection error: connection refused");
    }

    #[test]
    fn test_backend_unavailable_error() {
        let error = DomainError::backend_unavailable("pool timed out");
        assert_eq!(error.to_string(), "Backend unavailable: pool timed out");
    }
}
