//! JSON body extractor with bare-status rejections

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Request body decoded from JSON.
///
/// Unlike `axum::Json`, every rejection (wrong content type, syntax error,
/// missing field) is logged and answered with a bare 400.
#[derive(Debug)]
pub struct Json<T>(pub T);

/// The request body could not be decoded
#[derive(Debug)]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for DecodeError {
    fn into_response(self) -> Response {
        StatusCode::BAD_REQUEST.into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = DecodeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        debug!(
            "Decoding json into request {} object",
            std::any::type_name::<T>()
        );

        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => {
                let message = rejection.body_text();
                error!(
                    target_type = std::any::type_name::<T>(),
                    error = %message,
                    "Error decoding body json"
                );

                Err(DecodeError { message })
            }
        }
    }
}
