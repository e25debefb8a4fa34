use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::businesses::{BusinessEntity, InsertBusinessEntity, UpdateStatusControlEntity},
    value_objects::search::BusinessSearchFilter,
};

#[automock]
#[async_trait]
pub trait BusinessRepository {
    async fn create(&self, insert_business_entity: InsertBusinessEntity) -> Result<BusinessEntity>;

    async fn find_by_id(&self, business_id: Uuid) -> Result<Option<BusinessEntity>>;

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<BusinessEntity>>;

    /// City / type / category filtering only; visibility is decided by the caller.
    async fn search(&self, filter: BusinessSearchFilter) -> Result<Vec<BusinessEntity>>;

    async fn update_status_control(
        &self,
        business_id: Uuid,
        changes: UpdateStatusControlEntity,
    ) -> Result<BusinessEntity>;

    async fn list_automatic(&self) -> Result<Vec<BusinessEntity>>;

    /// Writes the refreshed status only while the business is still AUTOMATIC.
    /// Returns whether a row was updated.
    async fn update_automatic_status(&self, business_id: Uuid, is_open: bool) -> Result<bool>;
}
