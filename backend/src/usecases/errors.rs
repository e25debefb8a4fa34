use axum::http::StatusCode;
use mapalocal_core::domain::value_objects::{
    enums::business_modes::InvalidModeError, taxonomy::TaxonomyError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    InvalidMode(#[from] InvalidModeError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Permission(&'static str),
    #[error("an active subscription is required")]
    PaymentRequired,
    #[error("payment provider error")]
    UpstreamPayment(#[source] anyhow::Error),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<TaxonomyError> for UseCaseError {
    fn from(err: TaxonomyError) -> Self {
        UseCaseError::Validation(err.to_string())
    }
}

impl UseCaseError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UseCaseError::Validation(_) | UseCaseError::InvalidMode(_) => StatusCode::BAD_REQUEST,
            UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
            UseCaseError::Permission(_) => StatusCode::FORBIDDEN,
            UseCaseError::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            UseCaseError::UpstreamPayment(_) => StatusCode::BAD_GATEWAY,
            UseCaseError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            UseCaseError::Conflict(_) => StatusCode::CONFLICT,
            UseCaseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;
