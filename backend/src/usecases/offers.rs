use std::sync::Arc;

use mapalocal_core::domain::{
    entities::offers::InsertOfferEntity,
    repositories::{businesses::BusinessRepository, clock::Clock, offers::OfferRepository},
    value_objects::offers::{OfferDto, PublishOfferModel},
};
use tracing::info;
use uuid::Uuid;

use super::{
    businesses::load_owned_business,
    errors::{UseCaseError, UseCaseResult},
};
use crate::auth::AuthUser;

pub struct OfferUseCase<B, O, C>
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    business_repo: Arc<B>,
    offer_repo: Arc<O>,
    clock: Arc<C>,
    require_payment: bool,
}

impl<B, O, C> OfferUseCase<B, O, C>
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    pub fn new(business_repo: Arc<B>, offer_repo: Arc<O>, clock: Arc<C>, require_payment: bool) -> Self {
        Self {
            business_repo,
            offer_repo,
            clock,
            require_payment,
        }
    }

    /// Replaces whatever offer the business had with a new one stamped now.
    pub async fn publish(
        &self,
        actor: &AuthUser,
        business_id: Uuid,
        model: PublishOfferModel,
    ) -> UseCaseResult<OfferDto> {
        let title = model.title.trim();
        let price = model.price.trim();
        if title.is_empty() || price.is_empty() {
            return Err(UseCaseError::Validation("title and price are required".to_string()));
        }

        let business = load_owned_business(self.business_repo.as_ref(), actor, business_id).await?;
        let now_utc = self.clock.now_utc();

        if self.require_payment && !business.subscription().is_visible(now_utc) {
            return Err(UseCaseError::PaymentRequired);
        }

        let offer = self
            .offer_repo
            .replace_for_business(InsertOfferEntity {
                business_id,
                title: title.to_string(),
                price: price.to_string(),
                description: model.description.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
                image_url: model.image_url.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
                created_at: now_utc,
            })
            .await?
            .ok_or(UseCaseError::NotFound("business"))?;

        info!(%business_id, offer_id = %offer.id, "offers: published");
        Ok(OfferDto::from(offer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{fixed_clock, owner, sample_business, santiago, user};
    use mapalocal_core::domain::{
        entities::{businesses::BusinessEntity, offers::OfferEntity},
        repositories::{
            businesses::MockBusinessRepository, clock::MockClock, offers::MockOfferRepository,
        },
    };
    use std::sync::Mutex;

    fn model(title: &str) -> PublishOfferModel {
        PublishOfferModel {
            title: title.to_string(),
            price: "$2.000".to_string(),
            description: Some("solo hoy".to_string()),
            image_url: None,
        }
    }

    /// Offer store that keeps at most one row per business, like the table.
    fn replacing_offer_repo(store: Arc<Mutex<Vec<OfferEntity>>>) -> MockOfferRepository {
        let mut offer_repo = MockOfferRepository::new();
        offer_repo.expect_replace_for_business().returning(move |entity| {
            let mut rows = store.lock().unwrap();
            rows.retain(|row| row.business_id != entity.business_id);
            let offer = OfferEntity {
                id: Uuid::new_v4(),
                business_id: entity.business_id,
                title: entity.title,
                price: entity.price,
                description: entity.description,
                image_url: entity.image_url,
                created_at: entity.created_at,
            };
            rows.push(offer.clone());
            Ok(Some(offer))
        });
        offer_repo
    }

    fn business_repo_with(business: BusinessEntity) -> MockBusinessRepository {
        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(business.clone())));
        business_repo
    }

    #[tokio::test]
    async fn second_publish_replaces_the_first() {
        let actor = owner();
        let business = sample_business(actor.account_id);
        let business_id = business.id;
        let store = Arc::new(Mutex::new(Vec::new()));
        let business_repo = Arc::new(business_repo_with(business));
        let offer_repo = Arc::new(replacing_offer_repo(Arc::clone(&store)));

        let morning = OfferUseCase::new(
            Arc::clone(&business_repo),
            Arc::clone(&offer_repo),
            Arc::new(fixed_clock(2026, 3, 10, 8, 0)),
            false,
        );
        morning.publish(&actor, business_id, model("A")).await.unwrap();

        let afternoon = OfferUseCase::new(
            business_repo,
            offer_repo,
            Arc::new(fixed_clock(2026, 3, 10, 14, 0)),
            false,
        );
        let published = afternoon.publish(&actor, business_id, model("B")).await.unwrap();

        let rows = store.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "B");
        assert_eq!(rows[0].created_at, santiago(2026, 3, 10, 14, 0));
        assert_eq!(published.title, "B");
    }

    #[tokio::test]
    async fn payment_gate_blocks_unpaid_business_when_enabled() {
        let actor = owner();
        let business = sample_business(actor.account_id);
        let business_id = business.id;

        let mut offer_repo = MockOfferRepository::new();
        offer_repo.expect_replace_for_business().never();

        let usecase = OfferUseCase::new(
            Arc::new(business_repo_with(business)),
            Arc::new(offer_repo),
            Arc::new(fixed_clock(2026, 3, 10, 8, 0)),
            true,
        );

        let result = usecase.publish(&actor, business_id, model("A")).await;
        assert!(matches!(result, Err(UseCaseError::PaymentRequired)));
    }

    #[tokio::test]
    async fn payment_gate_lets_paid_business_through() {
        let actor = owner();
        let mut business = sample_business(actor.account_id);
        business.paid = true;
        business.paid_until = Some(santiago(2026, 4, 1, 0, 0));
        let business_id = business.id;

        let store = Arc::new(Mutex::new(Vec::new()));
        let usecase = OfferUseCase::new(
            Arc::new(business_repo_with(business)),
            Arc::new(replacing_offer_repo(store)),
            Arc::new(fixed_clock(2026, 3, 10, 8, 0)),
            true,
        );

        assert!(usecase.publish(&actor, business_id, model("A")).await.is_ok());
    }

    #[tokio::test]
    async fn users_and_blank_titles_are_rejected() {
        let mut business_repo = MockBusinessRepository::new();
        business_repo.expect_find_by_id().never();
        let mut offer_repo = MockOfferRepository::new();
        offer_repo.expect_replace_for_business().never();

        let usecase: OfferUseCase<_, _, MockClock> = OfferUseCase::new(
            Arc::new(business_repo),
            Arc::new(offer_repo),
            Arc::new(fixed_clock(2026, 3, 10, 8, 0)),
            false,
        );

        assert!(matches!(
            usecase.publish(&user(), Uuid::new_v4(), model("A")).await,
            Err(UseCaseError::Permission(_))
        ));
        assert!(matches!(
            usecase.publish(&owner(), Uuid::new_v4(), model("   ")).await,
            Err(UseCaseError::Validation(_))
        ));
    }
}
