//! Callback registration for authenticated users

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::dispatch::{Dispatch, HandlerResult};
use crate::api::middleware::Credentials;
use crate::api::result::ActionResult;
use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::callback::validate_callback_url;
use crate::domain::{
    Callback, CallbackRepository, DomainError, NewCallback, ObjectId, UserAuthInfo, UserRepository,
};

#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    pub url: String,
    /// Defaults to now
    #[serde(default)]
    pub when: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackResponse {
    pub id: ObjectId,
    pub owner: ObjectId,
    pub url: String,
    pub when: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&Callback> for CallbackResponse {
    fn from(callback: &Callback) -> Self {
        Self {
            id: callback.id.clone(),
            owner: callback.owner.clone(),
            url: callback.url.clone(),
            when: callback.when,
            created_at: callback.created_at,
        }
    }
}

pub struct CallbackController {
    users: Arc<dyn UserRepository>,
    callbacks: Arc<dyn CallbackRepository>,
}

impl CallbackController {
    pub fn new(users: Arc<dyn UserRepository>, callbacks: Arc<dyn CallbackRepository>) -> Self {
        Self { users, callbacks }
    }

    /// `None` when no user matches the credentials
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<UserAuthInfo>, DomainError> {
        match self
            .users
            .get_by_auth(&credentials.username, &credentials.auth_token)
            .await
        {
            Ok(info) => Ok(Some(info)),
            Err(e) if e.is_not_found() => {
                debug!(username = %credentials.username, "Credentials did not match a user");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn new_callback(
        &self,
        credentials: &Credentials,
        request: CallbackRequest,
    ) -> HandlerResult {
        let Some(owner) = self.authenticate(credentials).await? else {
            return Ok(ActionResult::status(StatusCode::UNAUTHORIZED));
        };

        if let Err(e) = validate_callback_url(&request.url) {
            debug!(error = %e, "Rejected callback url");
            return Ok(ActionResult::status(StatusCode::BAD_REQUEST));
        }

        let callback = self
            .callbacks
            .add(NewCallback {
                owner: owner.id,
                url: request.url,
                when: request.when.unwrap_or_else(Utc::now),
            })
            .await?;

        info!(
            callback_id = %callback.id,
            owner = %callback.owner,
            when = %callback.when,
            "Callback registered"
        );

        ActionResult::created(&CallbackResponse::from(&callback))
    }

    pub async fn list_callbacks(&self, credentials: &Credentials) -> HandlerResult {
        let Some(owner) = self.authenticate(credentials).await? else {
            return Ok(ActionResult::status(StatusCode::UNAUTHORIZED));
        };

        let callbacks = self.callbacks.list_by_owner(&owner.id).await?;
        let body: Vec<CallbackResponse> = callbacks.iter().map(CallbackResponse::from).collect();

        ActionResult::json(&body)
    }
}

async fn new_callback(
    State(state): State<AppState>,
    credentials: Credentials,
    Json(request): Json<CallbackRequest>,
) -> Dispatch {
    Dispatch(state.callbacks.new_callback(&credentials, request).await)
}

async fn list_callbacks(State(state): State<AppState>, credentials: Credentials) -> Dispatch {
    Dispatch(state.callbacks.list_callbacks(&credentials).await)
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/callbacks", get(list_callbacks).post(new_callback))
}
