use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

const DUPLICATE_KEY: i32 = 11000;

/// Every handler failure funnels through this type so clients always get
/// `{ "success": false, "error": "..." }` with a matching status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("duplicate key: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("payment provider error: {0}")]
    PaymentProvider(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message exposed to clients. Detail of server-side failures stays in the log.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Unauthorized(_) => "unauthorized access".to_string(),
            AppError::InvalidId(id) => format!("invalid id: {}", id),
            AppError::InvalidRequest(msg) => msg.clone(),
            AppError::Conflict(_) => "duplicate key".to_string(),
            AppError::Database(_) => "database error".to_string(),
            AppError::PaymentProvider(_) => "payment provider error".to_string(),
            AppError::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            AppError::Conflict(err.to_string())
        } else {
            AppError::Database(err.to_string())
        }
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InvalidRequest(format!("body cannot be stored: {}", err))
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidId(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PaymentProvider(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {} ({})", self, status);
        } else {
            log::warn!("⚠️  {} ({})", self, status);
        }

        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "error": self.client_message()
        }))
    }
}
