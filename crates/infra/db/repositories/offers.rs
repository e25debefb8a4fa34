use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, RunQueryDsl, delete, insert_into, prelude::*};
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::{
    domain::{
        entities::offers::{InsertOfferEntity, OfferEntity},
        repositories::offers::OfferRepository,
    },
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{businesses, offers},
    },
};

pub struct OfferPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OfferPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OfferRepository for OfferPostgres {
    async fn replace_for_business(
        &self,
        insert_offer_entity: InsertOfferEntity,
    ) -> Result<Option<OfferEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<OfferEntity>> {
            let mut conn = db_pool.get()?;
            let business_id = insert_offer_entity.business_id;

            // The business row lock serializes concurrent publishes for the same business.
            let offer = conn.transaction::<Option<OfferEntity>, diesel::result::Error, _>(|tx| {
                let locked = businesses::table
                    .find(business_id)
                    .select(businesses::id)
                    .for_update()
                    .first::<Uuid>(tx)
                    .optional()?;

                if locked.is_none() {
                    return Ok(None);
                }

                delete(offers::table.filter(offers::business_id.eq(business_id))).execute(tx)?;

                let offer = insert_into(offers::table)
                    .values(&insert_offer_entity)
                    .returning(OfferEntity::as_returning())
                    .get_result::<OfferEntity>(tx)?;

                Ok(Some(offer))
            })?;

            Ok(offer)
        })
        .await??)
    }

    async fn find_by_business(&self, business_id: Uuid) -> Result<Option<OfferEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<OfferEntity>> {
            let mut conn = db_pool.get()?;

            let offer = offers::table
                .filter(offers::business_id.eq(business_id))
                .order(offers::created_at.desc())
                .select(OfferEntity::as_select())
                .first::<OfferEntity>(&mut conn)
                .optional()?;

            Ok(offer)
        })
        .await??)
    }

    async fn list_by_businesses(&self, business_ids: Vec<Uuid>) -> Result<Vec<OfferEntity>> {
        if business_ids.is_empty() {
            return Ok(Vec::new());
        }

        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Vec<OfferEntity>> {
            let mut conn = db_pool.get()?;

            let results = offers::table
                .filter(offers::business_id.eq_any(business_ids))
                .select(OfferEntity::as_select())
                .load::<OfferEntity>(&mut conn)?;

            Ok(results)
        })
        .await??)
    }
}
