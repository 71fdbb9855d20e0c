use crate::database::StoreError;
use crate::features::entries::model::ErrorBody;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid entry data: missing {}.", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("Invalid request body: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid entry id: {0}")]
    EntryId(#[from] PathRejection),

    #[error("Entry {0} not found.")]
    NotFound(i64),

    #[error(transparent)]
    Store(StoreError),
}

impl ApiError {
    /// Logs the store failure inside the calling handler's span, so the
    /// record carries the request's entry id.
    pub fn store(err: StoreError) -> Self {
        tracing::error!(error = %err, "store operation failed");
        ApiError::Store(err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields(_)
            | ApiError::Body(_)
            | ApiError::Payload(_)
            | ApiError::EntryId(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // store detail stays in the logs; the client only gets a generic message
        let message = match &self {
            ApiError::Store(_) => "An unexpected error occurred.".to_string(),
            other => {
                tracing::debug!(%status, error = %other, "rejecting request");
                other.to_string()
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
