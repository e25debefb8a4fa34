use std::sync::Arc;

use anyhow::Result;
use chrono_tz::Tz;
use mapalocal_core::domain::repositories::{businesses::BusinessRepository, clock::Clock};
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub scanned: usize,
    pub changed: usize,
    pub failed: usize,
}

pub struct StatusRefresherUseCase<B, C>
where
    B: BusinessRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    business_repo: Arc<B>,
    clock: Arc<C>,
    timezone: Tz,
}

impl<B, C> StatusRefresherUseCase<B, C>
where
    B: BusinessRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    pub fn new(business_repo: Arc<B>, clock: Arc<C>, timezone: Tz) -> Self {
        Self {
            business_repo,
            clock,
            timezone,
        }
    }

    /// One sweep over AUTOMATIC businesses. Only differing values are written,
    /// and a failure on one business does not stop the others.
    pub async fn refresh_once(&self) -> Result<RefreshReport> {
        let businesses = self.business_repo.list_automatic().await?;
        let now_local = self.clock.now_utc().with_timezone(&self.timezone).time();

        let mut report = RefreshReport {
            scanned: businesses.len(),
            ..Default::default()
        };

        for business in businesses {
            let resolved = business.status_control().resolve(now_local);
            if resolved == business.is_open {
                continue;
            }

            match self
                .business_repo
                .update_automatic_status(business.id, resolved)
                .await
            {
                Ok(true) => {
                    report.changed += 1;
                    debug!(business_id = %business.id, is_open = resolved, "status_refresher: status changed");
                }
                // Switched to MANUAL between the read and the write.
                Ok(false) => {}
                Err(e) => {
                    report.failed += 1;
                    error!(business_id = %business.id, error = ?e, "status_refresher: update failed");
                }
            }
        }

        Ok(report)
    }
}
