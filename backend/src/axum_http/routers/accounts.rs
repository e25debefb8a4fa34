use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use mapalocal_core::{
    domain::{
        repositories::{accounts::AccountRepository, clock::Clock},
        value_objects::accounts::{LoginModel, SignUpModel},
    },
    infra::{
        clock::SystemClock,
        db::{postgres::postgres_connection::PgPoolSquad, repositories::accounts::AccountPostgres},
    },
};

use crate::{
    auth::{AuthUser, JwtKeys},
    axum_http::error_responses::AppError,
    usecases::accounts::AccountUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>, jwt_keys: Arc<JwtKeys>) -> Router {
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let usecase = AccountUseCase::new(Arc::new(account_repository), Arc::new(SystemClock), jwt_keys);

    Router::new()
        .route("/sign-up", post(sign_up::<AccountPostgres, SystemClock>))
        .route("/login", post(login::<AccountPostgres, SystemClock>))
        .route("/me", get(me::<AccountPostgres, SystemClock>))
        .with_state(Arc::new(usecase))
}

pub async fn sign_up<A, C>(
    State(usecase): State<Arc<AccountUseCase<A, C>>>,
    Json(model): Json<SignUpModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.sign_up(model).await {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn login<A, C>(
    State(usecase): State<Arc<AccountUseCase<A, C>>>,
    Json(model): Json<LoginModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.login(model).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn me<A, C>(
    State(usecase): State<Arc<AccountUseCase<A, C>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    match usecase.me(&auth).await {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
