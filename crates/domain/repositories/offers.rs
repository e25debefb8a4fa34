use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::offers::{InsertOfferEntity, OfferEntity};

#[automock]
#[async_trait]
pub trait OfferRepository {
    /// Deletes every offer of the business and inserts the new one in a single
    /// transaction holding the business row lock. `None` when the business is gone.
    async fn replace_for_business(
        &self,
        insert_offer_entity: InsertOfferEntity,
    ) -> Result<Option<OfferEntity>>;

    async fn find_by_business(&self, business_id: Uuid) -> Result<Option<OfferEntity>>;

    async fn list_by_businesses(&self, business_ids: Vec<Uuid>) -> Result<Vec<OfferEntity>>;
}
