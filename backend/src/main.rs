use anyhow::Result;
use backend::{
    axum_http::http_serve,
    background_worker::status_refresher,
    config::config_loader,
    usecases::status_refresher::StatusRefresherUseCase,
};
use mapalocal_core::infra::{
    clock::SystemClock,
    db::{postgres::postgres_connection, repositories::businesses::BusinessPostgres},
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Backend exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    mapalocal_core::observability::init_observability("backend")?;

    let dotenvy_env = Arc::new(config_loader::load()?);
    info!(
        timezone = %dotenvy_env.directory.timezone,
        require_payment_for_offers = dotenvy_env.directory.require_payment_for_offers,
        "ENV has been loaded"
    );

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");
    let db_pool = Arc::new(postgres_pool);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let refresher = Arc::new(StatusRefresherUseCase::new(
        Arc::new(BusinessPostgres::new(Arc::clone(&db_pool))),
        Arc::new(SystemClock),
        dotenvy_env.directory.timezone,
    ));
    let refresher_loop = tokio::spawn(status_refresher::run(
        refresher,
        dotenvy_env.directory.status_refresh_interval,
        shutdown_rx,
    ));

    let serve_result = http_serve::start(
        Arc::clone(&dotenvy_env),
        db_pool,
        http_serve::shutdown_signal(),
    )
    .await;

    let _ = shutdown_tx.send(true);
    if let Err(e) = refresher_loop.await {
        error!(error = %e, "status_refresher: task ended abnormally");
    }

    serve_result
}
