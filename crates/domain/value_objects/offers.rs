use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::offers::OfferEntity;

/// An offer counts as today's offer while its creation instant and `now_local`
/// fall on the same local calendar date.
pub fn is_active<Tz: TimeZone>(created_at: DateTime<Utc>, now_local: &DateTime<Tz>) -> bool {
    created_at.with_timezone(&now_local.timezone()).date_naive() == now_local.date_naive()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishOfferModel {
    pub title: String,
    pub price: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfferDto {
    pub id: Uuid,
    pub business_id: Uuid,
    pub title: String,
    pub price: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OfferEntity> for OfferDto {
    fn from(entity: OfferEntity) -> Self {
        Self {
            id: entity.id,
            business_id: entity.business_id,
            title: entity.title,
            price: entity.price,
            description: entity.description,
            image_url: entity.image_url,
            created_at: entity.created_at,
        }
    }
}
