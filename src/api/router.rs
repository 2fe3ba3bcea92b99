use axum::{middleware, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::controllers::{callbacks, home, users};
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the full router with application state.
///
/// When `site_dir` is set, the site owns `/` (its `index.html`) and every
/// path no API route matches. Otherwise `/` answers with the welcome document.
pub fn create_router(state: AppState, site_dir: Option<&str>) -> Router {
    let api = Router::new()
        .merge(home::routes())
        .merge(users::routes())
        .merge(callbacks::routes());

    let router = match site_dir {
        Some(dir) => api.with_state(state).fallback_service(ServeDir::new(dir)),
        None => api.merge(home::index_routes()).with_state(state),
    };

    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
