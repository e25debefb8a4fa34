use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;

use crate::domain::entities::payments::{InsertPaymentEntity, PaymentEntity};

#[automock]
#[async_trait]
pub trait PaymentRepository {
    async fn record_pending(&self, insert_payment_entity: InsertPaymentEntity) -> Result<()>;

    async fn find_by_provider_payment_id(
        &self,
        provider_payment_id: String,
    ) -> Result<Option<PaymentEntity>>;

    /// Upserts the payment as approved and extends the business subscription in
    /// one transaction. Returns `false` when the payment was already approved.
    async fn apply_approved(
        &self,
        insert_payment_entity: InsertPaymentEntity,
        paid_until: DateTime<Utc>,
    ) -> Result<bool>;

    /// Records a non-approved status. Returns `false` and leaves the row alone
    /// when the payment is already approved.
    async fn record_status(&self, insert_payment_entity: InsertPaymentEntity) -> Result<bool>;
}
