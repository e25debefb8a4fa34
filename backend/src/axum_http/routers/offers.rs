use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use mapalocal_core::{
    domain::{
        repositories::{businesses::BusinessRepository, clock::Clock, offers::OfferRepository},
        value_objects::offers::PublishOfferModel,
    },
    infra::{
        clock::SystemClock,
        db::{
            postgres::postgres_connection::PgPoolSquad,
            repositories::{businesses::BusinessPostgres, offers::OfferPostgres},
        },
    },
};
use uuid::Uuid;

use crate::{
    auth::AuthUser, axum_http::error_responses::AppError, config::config_model::Directory,
    usecases::offers::OfferUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>, directory: &Directory) -> Router {
    let business_repository = BusinessPostgres::new(Arc::clone(&db_pool));
    let offer_repository = OfferPostgres::new(Arc::clone(&db_pool));
    let usecase = OfferUseCase::new(
        Arc::new(business_repository),
        Arc::new(offer_repository),
        Arc::new(SystemClock),
        directory.require_payment_for_offers,
    );

    Router::new()
        .route(
            "/:business_id",
            post(publish::<BusinessPostgres, OfferPostgres, SystemClock>),
        )
        .with_state(Arc::new(usecase))
}

pub async fn publish<B, O, C>(
    State(usecase): State<Arc<OfferUseCase<B, O, C>>>,
    auth: AuthUser,
    Path(business_id): Path<Uuid>,
    Json(model): Json<PublishOfferModel>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.publish(&auth, business_id, model).await {
        Ok(offer) => (StatusCode::CREATED, Json(offer)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
