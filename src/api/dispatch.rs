//! Turns handler outcomes into exactly one HTTP response

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::result::ActionResult;
use crate::domain::DomainError;

/// What every controller action returns.
///
/// `Err` is reserved for server faults; anything the client caused is an
/// `Ok(ActionResult::Status(..))`.
pub type HandlerResult = Result<ActionResult, DomainError>;

/// Axum response wrapper around a [`HandlerResult`]
#[derive(Debug)]
pub struct Dispatch(pub HandlerResult);

impl From<HandlerResult> for Dispatch {
    fn from(result: HandlerResult) -> Self {
        Self(result)
    }
}

impl IntoResponse for Dispatch {
    fn into_response(self) -> Response {
        write_result_or_error(self.0)
    }
}

/// Render the result, or log the error and answer with a bare 500
pub fn write_result_or_error(result: HandlerResult) -> Response {
    match result {
        Ok(result) => result.write_response(),
        Err(e) => {
            error!(error = %e, "Controller finished with error");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
