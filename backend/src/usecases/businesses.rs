use std::sync::Arc;

use chrono_tz::Tz;
use mapalocal_core::domain::{
    entities::businesses::{BusinessEntity, InsertBusinessEntity, UpdateStatusControlEntity},
    repositories::{businesses::BusinessRepository, clock::Clock, offers::OfferRepository},
    value_objects::{
        business_status::apply_mode_change,
        businesses::{BusinessDto, BusinessStatusDto, RegisterBusinessModel, SetModeModel},
        enums::business_modes::BusinessMode,
        offers::{OfferDto, is_active},
        schedule::{is_open_by_schedule, parse_clock},
        taxonomy,
    },
};
use tracing::info;
use uuid::Uuid;

use super::errors::{UseCaseError, UseCaseResult};
use crate::auth::AuthUser;

pub struct BusinessUseCase<B, O, C>
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    business_repo: Arc<B>,
    offer_repo: Arc<O>,
    clock: Arc<C>,
    timezone: Tz,
}

impl<B, O, C> BusinessUseCase<B, O, C>
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    pub fn new(business_repo: Arc<B>, offer_repo: Arc<O>, clock: Arc<C>, timezone: Tz) -> Self {
        Self {
            business_repo,
            offer_repo,
            clock,
            timezone,
        }
    }

    pub async fn register(
        &self,
        actor: &AuthUser,
        model: RegisterBusinessModel,
    ) -> UseCaseResult<BusinessDto> {
        require_owner(actor)?;

        let name = required_text(&model.name, "name")?;
        let city = required_text(&model.city, "city")?;
        let kind = taxonomy::parse_kind(&model.kind)?;
        let category = taxonomy::validate_category(kind, &model.category)?;

        let (latitude, longitude) = if kind.is_physical() {
            let (Some(latitude), Some(longitude)) = (model.latitude, model.longitude) else {
                return Err(UseCaseError::Validation(
                    "coordinates are required for physical businesses".to_string(),
                ));
            };
            if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                return Err(UseCaseError::Validation("coordinates are out of range".to_string()));
            }
            (Some(latitude), Some(longitude))
        } else {
            (None, None)
        };

        let (open_time, close_time) =
            normalize_schedule(model.open_time.as_deref(), model.close_time.as_deref())?;

        let mut entity = InsertBusinessEntity {
            owner_id: actor.account_id,
            name,
            kind: kind.as_str().to_string(),
            category: category.to_string(),
            description: optional_text(model.description),
            city,
            latitude,
            longitude,
            open_time,
            close_time,
            mode: BusinessMode::Automatic.as_str().to_string(),
            manual_open: false,
            is_open: false,
            paid: false,
            paid_until: None,
            contact_handle: optional_text(model.contact_handle),
        };
        entity.is_open = if kind.is_physical() {
            let now_local = self.clock.now_utc().with_timezone(&self.timezone).time();
            is_open_by_schedule(
                entity.open_time.as_deref(),
                entity.close_time.as_deref(),
                now_local,
            )
        } else {
            true
        };

        let business = self.business_repo.create(entity).await?;
        info!(
            business_id = %business.id,
            owner_id = %actor.account_id,
            kind = %kind,
            "businesses: registered"
        );

        Ok(BusinessDto::from(business))
    }

    pub async fn list_own(&self, actor: &AuthUser) -> UseCaseResult<Vec<BusinessDto>> {
        require_owner(actor)?;

        let businesses = self.business_repo.list_by_owner(actor.account_id).await?;
        Ok(businesses.into_iter().map(BusinessDto::from).collect())
    }

    /// Mode tokens are validated before anything is read or written.
    pub async fn set_mode(
        &self,
        actor: &AuthUser,
        business_id: Uuid,
        model: SetModeModel,
    ) -> UseCaseResult<BusinessStatusDto> {
        let requested: BusinessMode = model.mode.parse()?;
        self.change_mode(actor, business_id, requested, model.open).await
    }

    pub async fn open(&self, actor: &AuthUser, business_id: Uuid) -> UseCaseResult<BusinessStatusDto> {
        self.change_mode(actor, business_id, BusinessMode::Manual, Some(true))
            .await
    }

    pub async fn close(&self, actor: &AuthUser, business_id: Uuid) -> UseCaseResult<BusinessStatusDto> {
        self.change_mode(actor, business_id, BusinessMode::Manual, Some(false))
            .await
    }

    pub async fn get_own_status(
        &self,
        actor: &AuthUser,
        business_id: Uuid,
    ) -> UseCaseResult<BusinessStatusDto> {
        let business = load_owned_business(self.business_repo.as_ref(), actor, business_id).await?;
        self.status_of(business).await
    }

    async fn change_mode(
        &self,
        actor: &AuthUser,
        business_id: Uuid,
        requested: BusinessMode,
        requested_open: Option<bool>,
    ) -> UseCaseResult<BusinessStatusDto> {
        let business = load_owned_business(self.business_repo.as_ref(), actor, business_id).await?;

        let change = apply_mode_change(
            requested,
            requested_open,
            business.manual_open,
            business.is_open,
        );

        let updated = self
            .business_repo
            .update_status_control(
                business.id,
                UpdateStatusControlEntity {
                    mode: change.mode.as_str().to_string(),
                    manual_open: change.manual_open,
                    is_open: change.is_open,
                    updated_at: self.clock.now_utc(),
                },
            )
            .await?;

        info!(
            %business_id,
            mode = %change.mode,
            manual_open = change.manual_open,
            "businesses: mode updated"
        );

        self.status_of(updated).await
    }

    async fn status_of(&self, business: BusinessEntity) -> UseCaseResult<BusinessStatusDto> {
        let now_utc = self.clock.now_utc();
        let now_local = now_utc.with_timezone(&self.timezone);

        let offer_today = self
            .offer_repo
            .find_by_business(business.id)
            .await?
            .filter(|offer| is_active(offer.created_at, &now_local))
            .map(OfferDto::from);

        Ok(BusinessStatusDto {
            business_id: business.id,
            mode: business.business_mode(),
            manual_open: business.manual_open,
            stored_open: business.is_open,
            open_now: business.status_control().resolve(now_local.time()),
            visible: business.subscription().is_visible(now_utc),
            paid_until: business.paid_until,
            offer_today,
        })
    }
}

pub(crate) fn require_owner(actor: &AuthUser) -> UseCaseResult<()> {
    if actor.is_owner() {
        Ok(())
    } else {
        Err(UseCaseError::Permission("owner role required"))
    }
}

/// Missing businesses are `NotFound`; businesses of another owner are `Permission`.
pub(crate) async fn load_owned_business<B>(
    business_repo: &B,
    actor: &AuthUser,
    business_id: Uuid,
) -> UseCaseResult<BusinessEntity>
where
    B: BusinessRepository + Send + Sync,
{
    require_owner(actor)?;

    let business = business_repo
        .find_by_id(business_id)
        .await?
        .ok_or(UseCaseError::NotFound("business"))?;

    if business.owner_id != actor.account_id {
        return Err(UseCaseError::Permission("business belongs to another owner"));
    }

    Ok(business)
}

fn required_text(raw: &str, field: &str) -> UseCaseResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(UseCaseError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Stored schedules are normalized to `HH:MM`. Both bounds or neither.
fn normalize_schedule(
    open_time: Option<&str>,
    close_time: Option<&str>,
) -> UseCaseResult<(Option<String>, Option<String>)> {
    let open_time = open_time.map(str::trim).filter(|v| !v.is_empty());
    let close_time = close_time.map(str::trim).filter(|v| !v.is_empty());

    match (open_time, close_time) {
        (None, None) => Ok((None, None)),
        (Some(open), Some(close)) => {
            let open = parse_clock(open)
                .ok_or_else(|| UseCaseError::Validation(format!("invalid open_time: {open}")))?;
            let close = parse_clock(close)
                .ok_or_else(|| UseCaseError::Validation(format!("invalid close_time: {close}")))?;
            Ok((
                Some(open.format("%H:%M").to_string()),
                Some(close.format("%H:%M").to_string()),
            ))
        }
        _ => Err(UseCaseError::Validation(
            "open_time and close_time must be given together".to_string(),
        )),
    }
}
