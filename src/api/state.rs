//! Application state shared by all handlers

use std::sync::Arc;

use super::controllers::{CallbackController, HomeController, UserController};
use crate::domain::RepositoryFactory;

/// Controllers bound to one storage backend
#[derive(Clone)]
pub struct AppState {
    pub home: Arc<HomeController>,
    pub users: Arc<UserController>,
    pub callbacks: Arc<CallbackController>,
}

impl AppState {
    /// Wire every controller to repositories from `factory`
    pub fn new(factory: &dyn RepositoryFactory) -> Self {
        let users = factory.create_user_repository();
        let callbacks = factory.create_callback_repository();

        Self {
            home: Arc::new(HomeController::new()),
            users: Arc::new(UserController::new(users.clone())),
            callbacks: Arc::new(CallbackController::new(users, callbacks)),
        }
    }
}
