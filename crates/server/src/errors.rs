use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error response: `{"error": title, "message": detail}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, message: Option<String>) -> Self {
        Self { status, title: title.into(), message }
    }

    pub fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("{what} not found")))
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some("admin session required".into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.title, "message": self.message});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) | ServiceError::Model(ModelError::Validation(m)) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(m))
            }
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(m)),
            ServiceError::StoreUnavailable(m) => {
                error!(error = %m, "store unavailable");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "Store Unavailable", Some("content store is unreachable".into()))
            }
            ServiceError::Db(m) | ServiceError::Model(ModelError::Db(m)) => {
                error!(error = %m, "database error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error", None)
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized | AuthError::TokenError(_) | AuthError::NotFound => {
                Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some("invalid email or password".into()))
            }
            AuthError::Validation(m) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(m)),
            other => {
                error!(code = other.code(), error = %other, "auth failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Auth Error", None)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
