//! Callback domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::persistence::{Entity, ObjectId};

/// A registered HTTP callback: call `url` at `when` on behalf of `owner`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Callback {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// User that registered the callback
    pub owner: ObjectId,
    /// Target URL that will be requested
    pub url: String,
    /// Moment the callback is due
    pub when: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A callback that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewCallback {
    pub owner: ObjectId,
    pub url: String,
    pub when: DateTime<Utc>,
}

impl Entity for Callback {
    type Draft = NewCallback;

    const COLLECTION: &'static str = "Callbacks";

    fn from_draft(id: ObjectId, created_at: DateTime<Utc>, draft: NewCallback) -> Self {
        Self {
            id,
            owner: draft.owner,
            url: draft.url,
            when: draft.when,
            created_at,
        }
    }

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
