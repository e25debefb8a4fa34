use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update, upsert::excluded};
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::{
    domain::{
        entities::payments::{InsertPaymentEntity, PaymentEntity},
        repositories::payments::PaymentRepository,
        value_objects::enums::payment_statuses::PaymentStatus,
    },
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{businesses, payments},
    },
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn record_pending(&self, insert_payment_entity: InsertPaymentEntity) -> Result<()> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<()> {
            let mut conn = db_pool.get()?;

            insert_into(payments::table)
                .values(&insert_payment_entity)
                .on_conflict(payments::provider_payment_id)
                .do_nothing()
                .execute(&mut conn)?;

            Ok(())
        })
        .await??)
    }

    async fn find_by_provider_payment_id(
        &self,
        provider_payment_id: String,
    ) -> Result<Option<PaymentEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<PaymentEntity>> {
            let mut conn = db_pool.get()?;

            let payment = payments::table
                .filter(payments::provider_payment_id.eq(provider_payment_id))
                .select(PaymentEntity::as_select())
                .first::<PaymentEntity>(&mut conn)
                .optional()?;

            Ok(payment)
        })
        .await??)
    }

    async fn apply_approved(
        &self,
        insert_payment_entity: InsertPaymentEntity,
        paid_until: DateTime<Utc>,
    ) -> Result<bool> {
        let db_pool = Arc::clone(&self.db_pool);
        let now = Utc::now();
        let approved = PaymentStatus::Approved.to_string();

        Ok(task::spawn_blocking(move || -> Result<bool> {
            let mut conn = db_pool.get()?;
            let business_id = insert_payment_entity.business_id;

            let applied = conn.transaction::<bool, diesel::result::Error, _>(|tx| {
                // Locking the business first makes duplicate deliveries wait for each other.
                businesses::table
                    .find(business_id)
                    .select(businesses::id)
                    .for_update()
                    .first::<Uuid>(tx)?;

                let current_status = payments::table
                    .filter(payments::provider_payment_id.eq(&insert_payment_entity.provider_payment_id))
                    .select(payments::status)
                    .first::<String>(tx)
                    .optional()?;

                if current_status.as_deref() == Some(approved.as_str()) {
                    return Ok(false);
                }

                let approved_payment = InsertPaymentEntity {
                    status: approved.clone(),
                    ..insert_payment_entity
                };

                insert_into(payments::table)
                    .values(&approved_payment)
                    .on_conflict(payments::provider_payment_id)
                    .do_update()
                    .set((
                        payments::status.eq(excluded(payments::status)),
                        payments::amount_minor.eq(excluded(payments::amount_minor)),
                        payments::updated_at.eq(now),
                    ))
                    .execute(tx)?;

                update(businesses::table.find(business_id))
                    .set((
                        businesses::paid.eq(true),
                        businesses::paid_until.eq(Some(paid_until)),
                        businesses::updated_at.eq(now),
                    ))
                    .execute(tx)?;

                Ok(true)
            })?;

            Ok(applied)
        })
        .await??)
    }

    async fn record_status(&self, insert_payment_entity: InsertPaymentEntity) -> Result<bool> {
        let db_pool = Arc::clone(&self.db_pool);
        let now = Utc::now();
        let approved = PaymentStatus::Approved.to_string();

        Ok(task::spawn_blocking(move || -> Result<bool> {
            let mut conn = db_pool.get()?;
            let business_id = insert_payment_entity.business_id;

            let recorded = conn.transaction::<bool, diesel::result::Error, _>(|tx| {
                // Same lock as apply_approved, so an approval cannot commit between the read and the write.
                businesses::table
                    .find(business_id)
                    .select(businesses::id)
                    .for_update()
                    .first::<Uuid>(tx)?;

                let current_status = payments::table
                    .filter(payments::provider_payment_id.eq(&insert_payment_entity.provider_payment_id))
                    .select(payments::status)
                    .first::<String>(tx)
                    .optional()?;

                if current_status.as_deref() == Some(approved.as_str()) {
                    return Ok(false);
                }

                insert_into(payments::table)
                    .values(&insert_payment_entity)
                    .on_conflict(payments::provider_payment_id)
                    .do_update()
                    .set((
                        payments::status.eq(excluded(payments::status)),
                        payments::updated_at.eq(now),
                    ))
                    .execute(tx)?;

                Ok(true)
            })?;

            Ok(recorded)
        })
        .await??)
    }
}
