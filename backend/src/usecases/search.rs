use std::{collections::HashMap, sync::Arc};

use chrono_tz::Tz;
use mapalocal_core::domain::{
    entities::{businesses::BusinessEntity, offers::OfferEntity},
    repositories::{businesses::BusinessRepository, clock::Clock, offers::OfferRepository},
    value_objects::{
        enums::city_match::CityMatch,
        offers::{OfferDto, is_active},
        search::{
            BusinessSearchFilter, Coordinates, SearchQuery, SearchResultItem, contact_link,
            map_link,
        },
        taxonomy,
    },
};
use tracing::debug;
use uuid::Uuid;

use super::errors::{UseCaseError, UseCaseResult};

pub struct SearchUseCase<B, O, C>
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    business_repo: Arc<B>,
    offer_repo: Arc<O>,
    clock: Arc<C>,
    timezone: Tz,
    city_match: CityMatch,
}

impl<B, O, C> SearchUseCase<B, O, C>
where
    B: BusinessRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    pub fn new(
        business_repo: Arc<B>,
        offer_repo: Arc<O>,
        clock: Arc<C>,
        timezone: Tz,
        city_match: CityMatch,
    ) -> Self {
        Self {
            business_repo,
            offer_repo,
            clock,
            timezone,
            city_match,
        }
    }

    /// Visible businesses of a city in creation order, with live status and today's offer.
    pub async fn search(&self, query: SearchQuery) -> UseCaseResult<Vec<SearchResultItem>> {
        let filter = self.filter_from(query)?;
        let now_utc = self.clock.now_utc();
        let now_local = now_utc.with_timezone(&self.timezone);

        let visible: Vec<BusinessEntity> = self
            .business_repo
            .search(filter)
            .await?
            .into_iter()
            .filter(|business| business.subscription().is_visible(now_utc))
            .collect();

        if visible.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = visible.iter().map(|business| business.id).collect();
        let mut offers_by_business: HashMap<Uuid, OfferEntity> = HashMap::new();
        for offer in self.offer_repo.list_by_businesses(ids).await? {
            if !is_active(offer.created_at, &now_local) {
                continue;
            }
            let newer = offers_by_business
                .get(&offer.business_id)
                .is_none_or(|existing| existing.created_at < offer.created_at);
            if newer {
                offers_by_business.insert(offer.business_id, offer);
            }
        }

        let now_clock = now_local.time();
        let results: Vec<SearchResultItem> = visible
            .into_iter()
            .map(|business| {
                let open_now = business.status_control().resolve(now_clock);
                let offer = offers_by_business.remove(&business.id).map(OfferDto::from);
                to_result_item(business, open_now, offer)
            })
            .collect();

        debug!(count = results.len(), "search: results assembled");
        Ok(results)
    }

    fn filter_from(&self, query: SearchQuery) -> UseCaseResult<BusinessSearchFilter> {
        let city = query.city.trim();
        if city.is_empty() {
            return Err(UseCaseError::Validation("city is required".to_string()));
        }

        let kind = match query.kind.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Some(taxonomy::parse_kind(raw)?),
            None => None,
        };

        let category = match query.category.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Some(
                match kind {
                    Some(kind) => taxonomy::validate_category(kind, raw)?,
                    None => taxonomy::validate_any_category(raw)?,
                }
                .to_string(),
            ),
            None => None,
        };

        Ok(BusinessSearchFilter {
            city: city.to_string(),
            city_match: self.city_match,
            kind,
            category,
        })
    }
}

fn to_result_item(business: BusinessEntity, open_now: bool, offer: Option<OfferDto>) -> SearchResultItem {
    let kind = business.business_kind();
    let coordinates = if kind.is_physical() {
        business
            .coordinates()
            .map(|(latitude, longitude)| Coordinates { latitude, longitude })
    } else {
        None
    };
    let map_url = coordinates
        .as_ref()
        .map(|c| map_link(c.latitude, c.longitude));
    let contact_url = business.contact_handle.as_deref().and_then(contact_link);

    SearchResultItem {
        id: business.id,
        name: business.name,
        kind,
        category: business.category,
        description: business.description,
        city: business.city,
        contact_url,
        coordinates,
        map_url,
        open_now,
        offer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{fixed_clock, sample_business, sample_offer, santiago};
    use mapalocal_core::domain::{
        repositories::{
            businesses::MockBusinessRepository, clock::MockClock, offers::MockOfferRepository,
        },
        value_objects::enums::business_kinds::BusinessKind,
    };

    fn paid(mut business: BusinessEntity) -> BusinessEntity {
        business.paid = true;
        business.paid_until = Some(santiago(2026, 4, 1, 0, 0));
        business
    }

    fn query(city: &str) -> SearchQuery {
        SearchQuery {
            city: city.to_string(),
            kind: None,
            category: None,
        }
    }

    fn usecase(
        business_repo: MockBusinessRepository,
        offer_repo: MockOfferRepository,
        local: (u32, u32),
    ) -> SearchUseCase<MockBusinessRepository, MockOfferRepository, MockClock> {
        SearchUseCase::new(
            Arc::new(business_repo),
            Arc::new(offer_repo),
            Arc::new(fixed_clock(2026, 3, 10, local.0, local.1)),
            chrono_tz::America::Santiago,
            CityMatch::Substring,
        )
    }

    #[tokio::test]
    async fn hides_unpaid_and_expired_businesses() {
        let visible = paid(sample_business(Uuid::new_v4()));
        let visible_id = visible.id;
        let unpaid = sample_business(Uuid::new_v4());
        let mut expired = paid(sample_business(Uuid::new_v4()));
        expired.paid_until = Some(santiago(2026, 3, 9, 10, 0));
        let mut never_expiring = paid(sample_business(Uuid::new_v4()));
        never_expiring.paid_until = None;
        let never_expiring_id = never_expiring.id;

        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_search()
            .returning(move |_| Ok(vec![visible.clone(), unpaid.clone(), expired.clone(), never_expiring.clone()]));

        let mut offer_repo = MockOfferRepository::new();
        offer_repo
            .expect_list_by_businesses()
            .withf(move |ids| ids == &vec![visible_id, never_expiring_id])
            .returning(|_| Ok(Vec::new()));

        let results = usecase(business_repo, offer_repo, (10, 0))
            .search(query("valpo"))
            .await
            .unwrap();

        let ids: Vec<Uuid> = results.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![visible_id, never_expiring_id]);
    }

    #[tokio::test]
    async fn only_todays_latest_offer_is_attached() {
        let business = paid(sample_business(Uuid::new_v4()));
        let business_id = business.id;
        let stale = paid(sample_business(Uuid::new_v4()));
        let stale_id = stale.id;

        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_search()
            .returning(move |_| Ok(vec![business.clone(), stale.clone()]));

        let offer_a = sample_offer(business_id, santiago(2026, 3, 10, 8, 0));
        let offer_b = sample_offer(business_id, santiago(2026, 3, 10, 14, 0));
        let offer_b_id = offer_b.id;
        let yesterday = sample_offer(stale_id, santiago(2026, 3, 9, 18, 0));
        let mut offer_repo = MockOfferRepository::new();
        // The older offer A comes after B, so a last-one-wins merge would pick A.
        offer_repo
            .expect_list_by_businesses()
            .returning(move |_| Ok(vec![offer_b.clone(), offer_a.clone(), yesterday.clone()]));

        let results = usecase(business_repo, offer_repo, (15, 0))
            .search(query("Valparaíso"))
            .await
            .unwrap();

        assert_eq!(results[0].offer.as_ref().map(|o| o.id), Some(offer_b_id));
        assert!(results[1].offer.is_none());
    }

    #[tokio::test]
    async fn open_now_follows_schedule_mode_and_kind() {
        let automatic = paid(sample_business(Uuid::new_v4()));
        let mut manual = paid(sample_business(Uuid::new_v4()));
        manual.mode = "MANUAL".to_string();
        manual.manual_open = true;
        let mut service = paid(sample_business(Uuid::new_v4()));
        service.kind = "service".to_string();
        service.category = "plumbing".to_string();
        service.open_time = None;
        service.close_time = None;
        service.contact_handle = Some("@gasfiter_juan".to_string());

        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_search()
            .returning(move |_| Ok(vec![automatic.clone(), manual.clone(), service.clone()]));
        let mut offer_repo = MockOfferRepository::new();
        offer_repo.expect_list_by_businesses().returning(|_| Ok(Vec::new()));

        // 21:00 local is after the 09:00-20:00 window.
        let results = usecase(business_repo, offer_repo, (21, 0))
            .search(query("valparaíso"))
            .await
            .unwrap();

        assert!(!results[0].open_now);
        assert!(results[0].map_url.is_some());
        assert!(results[1].open_now);
        assert!(results[2].open_now);
        assert_eq!(results[2].kind, BusinessKind::Service);
        assert!(results[2].coordinates.is_none());
        assert_eq!(results[2].contact_url.as_deref(), Some("https://t.me/gasfiter_juan"));
    }

    #[tokio::test]
    async fn automatic_business_is_open_inside_its_window() {
        let business = paid(sample_business(Uuid::new_v4()));

        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_search()
            .returning(move |_| Ok(vec![business.clone()]));
        let mut offer_repo = MockOfferRepository::new();
        offer_repo.expect_list_by_businesses().returning(|_| Ok(Vec::new()));

        let results = usecase(business_repo, offer_repo, (10, 0))
            .search(query("valparaíso"))
            .await
            .unwrap();

        assert!(results[0].open_now);
    }

    #[tokio::test]
    async fn filters_are_validated_and_forwarded() {
        let mut business_repo = MockBusinessRepository::new();
        business_repo
            .expect_search()
            .withf(|filter| {
                filter.city == "Viña"
                    && filter.kind == Some(BusinessKind::Physical)
                    && filter.category.as_deref() == Some("cafe")
                    && filter.city_match == CityMatch::Substring
            })
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let mut offer_repo = MockOfferRepository::new();
        offer_repo.expect_list_by_businesses().never();

        let usecase = usecase(business_repo, offer_repo, (10, 0));

        let results = usecase
            .search(SearchQuery {
                city: " Viña ".to_string(),
                kind: Some("physical".to_string()),
                category: Some("CAFE".to_string()),
            })
            .await
            .unwrap();
        assert!(results.is_empty());

        let mismatched = usecase
            .search(SearchQuery {
                city: "Viña".to_string(),
                kind: Some("service".to_string()),
                category: Some("cafe".to_string()),
            })
            .await;
        assert!(matches!(mismatched, Err(UseCaseError::Validation(_))));

        assert!(matches!(
            usecase.search(query("  ")).await,
            Err(UseCaseError::Validation(_))
        ));
    }
}
