use crate::error::TodoError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Generic message only; the cause is logged, never sent.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Map a service error, using `failure` as the body of any 500.
    pub fn from_service(err: TodoError, failure: &'static str) -> Self {
        match err {
            TodoError::InvalidInput(message) => ApiError::BadRequest(message),
            TodoError::InvalidIdentifier(_) => ApiError::BadRequest(err.to_string()),
            TodoError::NotFound(_) => ApiError::NotFound("Todo not found".to_string()),
            other => {
                error!(error = %other, "{}", failure);
                ApiError::Internal(failure)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
