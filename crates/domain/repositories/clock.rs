use chrono::{DateTime, Utc};
use mockall::automock;

#[automock]
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}
