use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use mapalocal_core::{
    domain::repositories::{
        businesses::BusinessRepository, clock::Clock, payments::PaymentRepository,
    },
    infra::{
        clock::SystemClock,
        db::{
            postgres::postgres_connection::PgPoolSquad,
            repositories::{businesses::BusinessPostgres, payments::PaymentPostgres},
        },
    },
    payments::provider_client::PaymentProviderClient,
};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    axum_http::error_responses::AppError,
    config::config_model::Payment,
    usecases::payments::{PaymentGateway, PaymentSettings, PaymentUseCase},
};

pub const SIGNATURE_HEADER: &str = "x-signature";

pub fn routes(db_pool: Arc<PgPoolSquad>, payment: &Payment) -> Result<Router> {
    let business_repository = BusinessPostgres::new(Arc::clone(&db_pool));
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let provider_client = PaymentProviderClient::new(
        payment.api_base_url.clone(),
        payment.access_token.clone(),
        payment.timeout,
    )?;

    let usecase = PaymentUseCase::new(
        Arc::new(business_repository),
        Arc::new(payment_repository),
        Arc::new(provider_client),
        Arc::new(SystemClock),
        PaymentSettings {
            price_minor: payment.price_minor,
            currency: payment.currency.clone(),
            success_url: payment.success_url.clone(),
            webhook_secret: payment.webhook_secret.clone(),
            subscription_days: payment.subscription_days,
        },
    );

    Ok(Router::new()
        .route(
            "/checkout/:business_id",
            post(checkout::<BusinessPostgres, PaymentPostgres, PaymentProviderClient, SystemClock>),
        )
        .route(
            "/webhook",
            post(webhook::<BusinessPostgres, PaymentPostgres, PaymentProviderClient, SystemClock>),
        )
        .with_state(Arc::new(usecase)))
}

pub async fn checkout<B, P, G, C>(
    State(usecase): State<Arc<PaymentUseCase<B, P, G, C>>>,
    auth: AuthUser,
    Path(business_id): Path<Uuid>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
    C: Clock + 'static,
{
    match usecase.checkout(&auth, business_id).await {
        Ok(checkout) => (StatusCode::CREATED, Json(checkout)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn webhook<B, P, G, C>(
    State(usecase): State<Arc<PaymentUseCase<B, P, G, C>>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
    C: Clock + 'static,
{
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    match usecase.handle_webhook(&body, signature).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
