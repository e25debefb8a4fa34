use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::{
    domain::{
        entities::accounts::{AccountEntity, InsertAccountEntity},
        repositories::accounts::AccountRepository,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::accounts},
};

pub struct AccountPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AccountPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AccountRepository for AccountPostgres {
    async fn create(
        &self,
        insert_account_entity: InsertAccountEntity,
    ) -> Result<Option<AccountEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<AccountEntity>> {
            let mut conn = db_pool.get()?;

            let created = insert_into(accounts::table)
                .values(&insert_account_entity)
                .on_conflict(accounts::email)
                .do_nothing()
                .returning(AccountEntity::as_returning())
                .get_result::<AccountEntity>(&mut conn)
                .optional()?;

            Ok(created)
        })
        .await??)
    }

    async fn find_by_email(&self, email: String) -> Result<Option<AccountEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<AccountEntity>> {
            let mut conn = db_pool.get()?;

            let account = accounts::table
                .filter(accounts::email.eq(email))
                .select(AccountEntity::as_select())
                .first::<AccountEntity>(&mut conn)
                .optional()?;

            Ok(account)
        })
        .await??)
    }

    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<AccountEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<AccountEntity>> {
            let mut conn = db_pool.get()?;

            let account = accounts::table
                .find(account_id)
                .select(AccountEntity::as_select())
                .first::<AccountEntity>(&mut conn)
                .optional()?;

            Ok(account)
        })
        .await??)
    }
}
