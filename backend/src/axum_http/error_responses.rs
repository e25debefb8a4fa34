use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::usecases::errors::UseCaseError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::UseCase(err) => {
                let status = err.status_code();
                match err {
                    UseCaseError::Internal(inner) => {
                        error!(error = ?inner, "http: internal error");
                        (status, "Internal server error".to_string())
                    }
                    UseCaseError::UpstreamPayment(inner) => {
                        error!(error = ?inner, "http: payment provider error");
                        (status, "Payment provider error".to_string())
                    }
                    other => (status, other.to_string()),
                }
            }
            AppError::Internal(inner) => {
                // Don't leak internal error detail to client
                error!(error = ?inner, "http: internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}
