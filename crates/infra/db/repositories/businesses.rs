use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::{
    domain::{
        entities::businesses::{BusinessEntity, InsertBusinessEntity, UpdateStatusControlEntity},
        repositories::businesses::BusinessRepository,
        value_objects::{
            enums::{business_modes::BusinessMode, city_match::CityMatch},
            search::BusinessSearchFilter,
        },
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::businesses},
};

pub struct BusinessPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BusinessPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BusinessRepository for BusinessPostgres {
    async fn create(&self, insert_business_entity: InsertBusinessEntity) -> Result<BusinessEntity> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<BusinessEntity> {
            let mut conn = db_pool.get()?;

            let business = insert_into(businesses::table)
                .values(&insert_business_entity)
                .returning(BusinessEntity::as_returning())
                .get_result::<BusinessEntity>(&mut conn)?;

            Ok(business)
        })
        .await??)
    }

    async fn find_by_id(&self, business_id: Uuid) -> Result<Option<BusinessEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<BusinessEntity>> {
            let mut conn = db_pool.get()?;

            let business = businesses::table
                .find(business_id)
                .select(BusinessEntity::as_select())
                .first::<BusinessEntity>(&mut conn)
                .optional()?;

            Ok(business)
        })
        .await??)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<BusinessEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Vec<BusinessEntity>> {
            let mut conn = db_pool.get()?;

            let results = businesses::table
                .filter(businesses::owner_id.eq(owner_id))
                .order(businesses::created_at.asc())
                .select(BusinessEntity::as_select())
                .load::<BusinessEntity>(&mut conn)?;

            Ok(results)
        })
        .await??)
    }

    async fn search(&self, filter: BusinessSearchFilter) -> Result<Vec<BusinessEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Vec<BusinessEntity>> {
            let mut conn = db_pool.get()?;

            let city = escape_like(filter.city.trim());
            let mut query = businesses::table
                .select(BusinessEntity::as_select())
                .into_boxed();

            query = match filter.city_match {
                CityMatch::Substring => query.filter(businesses::city.ilike(format!("%{city}%"))),
                CityMatch::Exact => query.filter(businesses::city.ilike(city)),
            };

            if let Some(kind) = filter.kind {
                query = query.filter(businesses::kind.eq(kind.as_str()));
            }

            if let Some(category) = filter.category {
                query = query.filter(businesses::category.eq(category));
            }

            let results = query
                .order(businesses::created_at.asc())
                .load::<BusinessEntity>(&mut conn)?;

            Ok(results)
        })
        .await??)
    }

    async fn update_status_control(
        &self,
        business_id: Uuid,
        changes: UpdateStatusControlEntity,
    ) -> Result<BusinessEntity> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<BusinessEntity> {
            let mut conn = db_pool.get()?;

            let business = update(businesses::table.find(business_id))
                .set(&changes)
                .returning(BusinessEntity::as_returning())
                .get_result::<BusinessEntity>(&mut conn)?;

            Ok(business)
        })
        .await??)
    }

    async fn list_automatic(&self) -> Result<Vec<BusinessEntity>> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Vec<BusinessEntity>> {
            let mut conn = db_pool.get()?;

            let results = businesses::table
                .filter(businesses::mode.eq(BusinessMode::Automatic.as_str()))
                .select(BusinessEntity::as_select())
                .load::<BusinessEntity>(&mut conn)?;

            Ok(results)
        })
        .await??)
    }

    async fn update_automatic_status(&self, business_id: Uuid, is_open: bool) -> Result<bool> {
        let db_pool = Arc::clone(&self.db_pool);
        let now = Utc::now();

        Ok(task::spawn_blocking(move || -> Result<bool> {
            let mut conn = db_pool.get()?;

            let updated = update(businesses::table)
                .filter(businesses::id.eq(business_id))
                .filter(businesses::mode.eq(BusinessMode::Automatic.as_str()))
                .set((
                    businesses::is_open.eq(is_open),
                    businesses::updated_at.eq(now),
                ))
                .execute(&mut conn)?;

            Ok(updated > 0)
        })
        .await??)
    }
}

/// Escapes LIKE metacharacters so user input only matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("San_Miguel 100%"), "San\\_Miguel 100\\%");
        assert_eq!(escape_like("Temuco"), "Temuco");
    }
}
