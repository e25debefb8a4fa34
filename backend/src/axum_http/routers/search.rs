use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use mapalocal_core::{
    domain::{
        repositories::{businesses::BusinessRepository, clock::Clock, offers::OfferRepository},
        value_objects::search::SearchQuery,
    },
    infra::{
        clock::SystemClock,
        db::{
            postgres::postgres_connection::PgPoolSquad,
            repositories::{businesses::BusinessPostgres, offers::OfferPostgres},
        },
    },
};

use crate::{
    axum_http::error_responses::AppError, config::config_model::Directory,
    usecases::search::SearchUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>, directory: &Directory) -> Router {
    let business_repository = BusinessPostgres::new(Arc::clone(&db_pool));
    let offer_repository = OfferPostgres::new(Arc::clone(&db_pool));
    let usecase = SearchUseCase::new(
        Arc::new(business_repository),
        Arc::new(offer_repository),
        Arc::new(SystemClock),
        directory.timezone,
        directory.city_match,
    );

    Router::new()
        .route("/", get(search::<BusinessPostgres, OfferPostgres, SystemClock>))
        .with_state(Arc::new(usecase))
}

pub async fn search<B, O, C>(
    State(usecase): State<Arc<SearchUseCase<B, O, C>>>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.search(query).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
