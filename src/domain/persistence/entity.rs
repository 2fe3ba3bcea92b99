//! Persisted entity traits and identifiers

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

const OBJECT_ID_LENGTH: usize = 32;

/// Opaque record identifier, assigned by the backend when a record is added
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parse an identifier received from outside the process
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let well_formed = value.len() == OBJECT_ID_LENGTH
            && value
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));

        if !well_formed {
            return Err(DomainError::validation(format!(
                "'{}' is not a valid object id",
                value
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record type that lives in one named collection of a backend
pub trait Entity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Everything needed to create a record except what the backend assigns
    type Draft: Debug + Send + 'static;

    /// Name of the backing collection
    const COLLECTION: &'static str;

    /// Document fields whose values must be unique within the collection
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    /// Builds the stored record once the backend has assigned identity
    fn from_draft(id: ObjectId, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;

    fn id(&self) -> &ObjectId;

    fn created_at(&self) -> DateTime<Utc>;
}
