use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use models::errors::ModelError;
use models::user::NAME_REQUIRED;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const USER_NOT_FOUND: &str = "User not found";

/// HTTP error rendered as `{"detail": "..."}` with the given status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn user_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, USER_NOT_FOUND)
    }

    pub fn name_required() -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, NAME_REQUIRED)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.detail))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, msg)
            }
            ServiceError::Model(e @ ModelError::IdsExhausted(_)) => {
                error!(error = %e, "cannot assign a new user id");
                Self::internal()
            }
            ServiceError::Persistence(msg) => {
                error!(error = %msg, "persistence failure while handling request");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        match rejection {
            // well-formed JSON whose `name` is absent or not a string
            JsonRejection::JsonDataError(_) => Self::name_required(),
            JsonRejection::JsonSyntaxError(_) => Self::new(StatusCode::BAD_REQUEST, "invalid JSON body"),
            JsonRejection::MissingJsonContentType(_) => {
                Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "expected application/json")
            }
            other => Self::new(other.status(), other.body_text()),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot load user store: {0}")]
    Storage(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
