//! User registration and lookup

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::dispatch::{Dispatch, HandlerResult};
use crate::api::result::ActionResult;
use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::user::validate_username;
use crate::domain::{AuthToken, Entity, NewUser, ObjectId, User, UserRepository};

#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub username: String,
}

/// Returned once, on registration; the only response that carries the token
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserResponse {
    pub id: ObjectId,
    pub username: String,
    pub auth_token: AuthToken,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: ObjectId,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            username: user.username().to_string(),
        }
    }
}

pub struct UserController {
    users: Arc<dyn UserRepository>,
}

impl UserController {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn add_user(&self, request: AddUserRequest) -> HandlerResult {
        if let Err(e) = validate_username(&request.username) {
            debug!(error = %e, "Rejected username");
            return Ok(ActionResult::status(StatusCode::BAD_REQUEST));
        }

        let draft = NewUser::new(request.username, AuthToken::generate());

        match self.users.add(draft).await {
            Ok(user) => {
                info!(user_id = %user.id(), username = %user.username(), "User added");

                ActionResult::created(&AddUserResponse {
                    id: user.id().clone(),
                    username: user.username().to_string(),
                    auth_token: user.auth_token().clone(),
                })
            }
            Err(e) if e.is_duplicate_key() => {
                debug!(error = %e, "Username already taken");
                Ok(ActionResult::status(StatusCode::CONFLICT))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get_user(&self, id: &str) -> HandlerResult {
        let Ok(id) = ObjectId::parse(id) else {
            return Ok(ActionResult::status(StatusCode::BAD_REQUEST));
        };

        match self.users.get(&id).await {
            Ok(user) => ActionResult::json(&UserResponse::from(&user)),
            Err(e) if e.is_not_found() => Ok(ActionResult::status(StatusCode::NOT_FOUND)),
            Err(e) => Err(e),
        }
    }

    pub async fn list_users(&self) -> HandlerResult {
        let users = self.users.list().await?;
        let body: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();

        ActionResult::json(&body)
    }
}

async fn add_user(
    State(state): State<AppState>,
    Json(request): Json<AddUserRequest>,
) -> Dispatch {
    debug!("Handing request to UserController");
    Dispatch(state.users.add_user(request).await)
}

async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Dispatch {
    Dispatch(state.users.get_user(&id).await)
}

async fn list_users(State(state): State<AppState>) -> Dispatch {
    Dispatch(state.users.list_users().await)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(add_user))
        .route("/users/{id}", get(get_user))
}
