//! Request arrival and completion logging

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Logs every request on arrival and on completion.
///
/// Runs inside `TraceLayer`, which already owns the request span, so no
/// span is opened here.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = matched_route(&request);
    let authenticated = request.headers().contains_key(header::AUTHORIZATION);

    info!(
        method = %method,
        uri = %uri,
        route = %route,
        authenticated,
        "[{}] {}", method, uri
    );

    let response = next.run(request).await;

    info!(
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}

fn matched_route(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}
