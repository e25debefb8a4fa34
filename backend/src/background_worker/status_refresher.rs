use std::{sync::Arc, time::Duration};

use mapalocal_core::domain::repositories::{businesses::BusinessRepository, clock::Clock};
use tokio::{
    sync::watch,
    time::{self, MissedTickBehavior},
};
use tracing::{error, info};

use crate::usecases::status_refresher::StatusRefresherUseCase;

/// Re-evaluates AUTOMATIC businesses every `period` until `shutdown` flips to true.
pub async fn run<B, C>(
    usecase: Arc<StatusRefresherUseCase<B, C>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) where
    B: BusinessRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    info!(period_secs = period.as_secs(), "status_refresher: started");

    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match usecase.refresh_once().await {
                    Ok(report) if report.changed > 0 || report.failed > 0 => info!(
                        scanned = report.scanned,
                        changed = report.changed,
                        failed = report.failed,
                        "status_refresher: sweep finished"
                    ),
                    Ok(_) => {}
                    Err(e) => error!(error = ?e, "status_refresher: sweep failed"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("status_refresher: stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mapalocal_core::domain::repositories::{
        businesses::MockBusinessRepository, clock::MockClock,
    };

    #[tokio::test]
    async fn sweeps_until_shutdown_is_signalled() {
        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_list_automatic()
            .times(1..)
            .returning(|| Ok(Vec::new()));
        let mut clock = MockClock::new();
        clock.expect_now_utc().returning(Utc::now);

        let usecase = Arc::new(StatusRefresherUseCase::new(
            Arc::new(business_repo),
            Arc::new(clock),
            chrono_tz::America::Santiago,
        ));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run(usecase, Duration::from_millis(10), shutdown_rx));

        time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("refresher did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn failed_sweeps_keep_the_loop_alive() {
        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_list_automatic()
            .times(2..)
            .returning(|| Err(anyhow::anyhow!("database unavailable")));
        let mut clock = MockClock::new();
        clock.expect_now_utc().returning(Utc::now);

        let usecase = Arc::new(StatusRefresherUseCase::new(
            Arc::new(business_repo),
            Arc::new(clock),
            chrono_tz::America::Santiago,
        ));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run(usecase, Duration::from_millis(10), shutdown_rx));

        time::sleep(Duration::from_millis(80)).await;
        drop(shutdown_tx);

        time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("refresher did not stop")
            .unwrap();
    }
}
