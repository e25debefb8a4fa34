use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    enums::{business_kinds::BusinessKind, business_modes::BusinessMode},
    offers::OfferDto,
};
use crate::domain::entities::businesses::BusinessEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterBusinessModel {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: Option<String>,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub contact_handle: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetModeModel {
    pub mode: String,
    pub open: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessDto {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BusinessKind,
    pub category: String,
    pub description: Option<String>,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub mode: BusinessMode,
    pub paid: bool,
    pub paid_until: Option<DateTime<Utc>>,
    pub contact_handle: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BusinessEntity> for BusinessDto {
    fn from(entity: BusinessEntity) -> Self {
        Self {
            id: entity.id,
            kind: entity.business_kind(),
            mode: entity.business_mode(),
            name: entity.name,
            category: entity.category,
            description: entity.description,
            city: entity.city,
            latitude: entity.latitude,
            longitude: entity.longitude,
            open_time: entity.open_time,
            close_time: entity.close_time,
            paid: entity.paid,
            paid_until: entity.paid_until,
            contact_handle: entity.contact_handle,
            created_at: entity.created_at,
        }
    }
}

/// What an owner sees on their dashboard for one business.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessStatusDto {
    pub business_id: Uuid,
    pub mode: BusinessMode,
    pub manual_open: bool,
    /// Last value persisted by a toggle or by the refresher.
    pub stored_open: bool,
    /// Value resolved at request time.
    pub open_now: bool,
    pub visible: bool,
    pub paid_until: Option<DateTime<Utc>>,
    pub offer_today: Option<OfferDto>,
}
