use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use mapalocal_core::{
    domain::{
        repositories::{businesses::BusinessRepository, clock::Clock, offers::OfferRepository},
        value_objects::businesses::{RegisterBusinessModel, SetModeModel},
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
    usecases::businesses::BusinessUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>, directory: &Directory) -> Router {
    let business_repository = BusinessPostgres::new(Arc::clone(&db_pool));
    let offer_repository = OfferPostgres::new(Arc::clone(&db_pool));
    let usecase = BusinessUseCase::new(
        Arc::new(business_repository),
        Arc::new(offer_repository),
        Arc::new(SystemClock),
        directory.timezone,
    );

    Router::new()
        .route(
            "/",
            get(list_own::<BusinessPostgres, OfferPostgres, SystemClock>)
                .post(register::<BusinessPostgres, OfferPostgres, SystemClock>),
        )
        .route(
            "/:business_id/status",
            get(get_own_status::<BusinessPostgres, OfferPostgres, SystemClock>),
        )
        .route(
            "/:business_id/mode",
            put(set_mode::<BusinessPostgres, OfferPostgres, SystemClock>),
        )
        .route(
            "/:business_id/open",
            post(open::<BusinessPostgres, OfferPostgres, SystemClock>),
        )
        .route(
            "/:business_id/close",
            post(close::<BusinessPostgres, OfferPostgres, SystemClock>),
        )
        .with_state(Arc::new(usecase))
}

pub async fn register<B, O, C>(
    State(usecase): State<Arc<BusinessUseCase<B, O, C>>>,
    auth: AuthUser,
    Json(model): Json<RegisterBusinessModel>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.register(&auth, model).await {
        Ok(business) => (StatusCode::CREATED, Json(business)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn list_own<B, O, C>(
    State(usecase): State<Arc<BusinessUseCase<B, O, C>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.list_own(&auth).await {
        Ok(businesses) => (StatusCode::OK, Json(businesses)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn get_own_status<B, O, C>(
    State(usecase): State<Arc<BusinessUseCase<B, O, C>>>,
    auth: AuthUser,
    Path(business_id): Path<Uuid>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.get_own_status(&auth, business_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn set_mode<B, O, C>(
    State(usecase): State<Arc<BusinessUseCase<B, O, C>>>,
    auth: AuthUser,
    Path(business_id): Path<Uuid>,
    Json(model): Json<SetModeModel>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.set_mode(&auth, business_id, model).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn open<B, O, C>(
    State(usecase): State<Arc<BusinessUseCase<B, O, C>>>,
    auth: AuthUser,
    Path(business_id): Path<Uuid>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.open(&auth, business_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn close<B, O, C>(
    State(usecase): State<Arc<BusinessUseCase<B, O, C>>>,
    auth: AuthUser,
    Path(business_id): Path<Uuid>,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.close(&auth, business_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
