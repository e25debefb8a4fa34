use axum::{http::StatusCode, response::IntoResponse};

use super::error_responses::AppError;
use crate::usecases::errors::UseCaseError;

pub async fn not_found() -> impl IntoResponse {
    AppError::from(UseCaseError::NotFound("route")).into_response()
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}
