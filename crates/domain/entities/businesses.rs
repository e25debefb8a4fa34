use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::{
        business_status::StatusControl,
        enums::{business_kinds::BusinessKind, business_modes::BusinessMode},
        subscriptions::SubscriptionState,
    },
    infra::db::postgres::schema::businesses,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = businesses)]
pub struct BusinessEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub kind: String,
    pub category: String,
    pub description: Option<String>,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub mode: String,
    pub manual_open: bool,
    pub is_open: bool,
    pub paid: bool,
    pub paid_until: Option<DateTime<Utc>>,
    pub contact_handle: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessEntity {
    /// Unknown stored kinds are treated as physical so the schedule still applies.
    pub fn business_kind(&self) -> BusinessKind {
        BusinessKind::from_str(&self.kind).unwrap_or(BusinessKind::Physical)
    }

    /// Unknown stored modes fall back to AUTOMATIC.
    pub fn business_mode(&self) -> BusinessMode {
        self.mode.parse().unwrap_or_default()
    }

    pub fn subscription(&self) -> SubscriptionState {
        SubscriptionState::new(self.paid, self.paid_until)
    }

    pub fn status_control(&self) -> StatusControl<'_> {
        StatusControl {
            kind: self.business_kind(),
            mode: self.business_mode(),
            manual_open: self.manual_open,
            open_time: self.open_time.as_deref(),
            close_time: self.close_time.as_deref(),
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = businesses)]
pub struct InsertBusinessEntity {
    pub owner_id: Uuid,
    pub name: String,
    pub kind: String,
    pub category: String,
    pub description: Option<String>,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub mode: String,
    pub manual_open: bool,
    pub is_open: bool,
    pub paid: bool,
    pub paid_until: Option<DateTime<Utc>>,
    pub contact_handle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = businesses)]
pub struct UpdateStatusControlEntity {
    pub mode: String,
    pub manual_open: bool,
    pub is_open: bool,
    pub updated_at: DateTime<Utc>,
}
