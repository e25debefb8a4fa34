use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Number of days an approved payment keeps a business visible.
pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

/// Paid flag plus optional expiry. A `None` expiry never lapses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionState {
    pub paid: bool,
    pub paid_until: Option<DateTime<Utc>>,
}

impl SubscriptionState {
    pub fn new(paid: bool, paid_until: Option<DateTime<Utc>>) -> Self {
        Self { paid, paid_until }
    }

    pub fn is_visible(&self, now_utc: DateTime<Utc>) -> bool {
        is_visible(self.paid, self.paid_until, now_utc)
    }
}

pub fn is_visible(paid: bool, paid_until: Option<DateTime<Utc>>, now_utc: DateTime<Utc>) -> bool {
    paid && paid_until.is_none_or(|expiry| expiry > now_utc)
}

/// Expiry granted by an approved payment received at `now_utc`.
pub fn paid_until_from(now_utc: DateTime<Utc>, period_days: i64) -> DateTime<Utc> {
    now_utc + Duration::days(period_days)
}
