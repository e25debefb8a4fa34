use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::accounts::{AccountEntity, InsertAccountEntity};

#[automock]
#[async_trait]
pub trait AccountRepository {
    /// Returns `None` when the email is already registered.
    async fn create(&self, insert_account_entity: InsertAccountEntity)
    -> Result<Option<AccountEntity>>;

    async fn find_by_email(&self, email: String) -> Result<Option<AccountEntity>>;

    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<AccountEntity>>;
}
