use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use mapalocal_core::{
    domain::{
        entities::payments::InsertPaymentEntity,
        repositories::{businesses::BusinessRepository, clock::Clock, payments::PaymentRepository},
        value_objects::{
            enums::payment_statuses::PaymentStatus,
            payments::{
                CheckoutDto, PaymentIntent, PaymentIntentRequest, PaymentWebhookModel,
                ProviderPayment,
            },
            subscriptions::paid_until_from,
        },
    },
    payments::{provider_client::PaymentProviderClient, webhook_signature::verify_signature},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    businesses::load_owned_business,
    errors::{UseCaseError, UseCaseResult},
};
use crate::auth::AuthUser;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(&self, request: PaymentIntentRequest) -> AnyResult<PaymentIntent>;

    async fn fetch_payment(&self, payment_id: String) -> AnyResult<ProviderPayment>;
}

#[async_trait]
impl PaymentGateway for PaymentProviderClient {
    async fn create_payment_intent(&self, request: PaymentIntentRequest) -> AnyResult<PaymentIntent> {
        self.create_payment_intent(request).await
    }

    async fn fetch_payment(&self, payment_id: String) -> AnyResult<ProviderPayment> {
        self.fetch_payment(&payment_id).await
    }
}

#[derive(Debug, Clone)]
pub struct PaymentSettings {
    pub price_minor: i32,
    pub currency: String,
    pub success_url: String,
    pub webhook_secret: String,
    pub subscription_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WebhookOutcome {
    /// Business marked paid and its expiry extended.
    Applied,
    /// The payment was approved before; nothing changed.
    AlreadyApplied,
    /// Non-approved status stored; the business is untouched.
    Recorded { status: PaymentStatus },
}

pub struct PaymentUseCase<B, P, G, C>
where
    B: BusinessRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
    C: Clock + 'static,
{
    business_repo: Arc<B>,
    payment_repo: Arc<P>,
    gateway: Arc<G>,
    clock: Arc<C>,
    settings: PaymentSettings,
}

impl<B, P, G, C> PaymentUseCase<B, P, G, C>
where
    B: BusinessRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
    C: Clock + 'static,
{
    pub fn new(
        business_repo: Arc<B>,
        payment_repo: Arc<P>,
        gateway: Arc<G>,
        clock: Arc<C>,
        settings: PaymentSettings,
    ) -> Self {
        Self {
            business_repo,
            payment_repo,
            gateway,
            clock,
            settings,
        }
    }

    pub async fn checkout(&self, actor: &AuthUser, business_id: Uuid) -> UseCaseResult<CheckoutDto> {
        let business = load_owned_business(self.business_repo.as_ref(), actor, business_id).await?;

        let intent = self
            .gateway
            .create_payment_intent(PaymentIntentRequest {
                external_reference: business.id,
                amount_minor: self.settings.price_minor,
                currency: self.settings.currency.clone(),
                description: format!("MapaLocal subscription: {}", business.name),
                success_url: self.settings.success_url.clone(),
            })
            .await
            .map_err(UseCaseError::UpstreamPayment)?;

        self.payment_repo
            .record_pending(InsertPaymentEntity {
                business_id: business.id,
                provider_payment_id: intent.id.clone(),
                amount_minor: self.settings.price_minor,
                currency: self.settings.currency.clone(),
                status: PaymentStatus::Pending.to_string(),
            })
            .await?;

        info!(%business_id, payment_id = %intent.id, "payments: checkout created");
        Ok(CheckoutDto {
            payment_id: intent.id,
            redirect_url: intent.redirect_url,
        })
    }

    /// Verifies and applies a provider notification. Replays are harmless.
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> UseCaseResult<WebhookOutcome> {
        let signed = signature
            .is_some_and(|signature| verify_signature(&self.settings.webhook_secret, payload, signature));
        if !signed {
            warn!("payments: webhook with missing or invalid signature");
            return Err(UseCaseError::Unauthorized("invalid webhook signature"));
        }

        let model: PaymentWebhookModel = serde_json::from_slice(payload)
            .map_err(|e| UseCaseError::Validation(format!("invalid webhook payload: {e}")))?;
        let payment_id = model.payment_id.trim().to_string();
        if payment_id.is_empty() {
            return Err(UseCaseError::Validation("payment_id is required".to_string()));
        }

        let (status, external_reference, amount_minor) =
            match (model.status.as_deref(), model.external_reference.as_deref()) {
                (Some(status), Some(reference)) => (
                    PaymentStatus::from_str(status),
                    Some(reference.to_string()),
                    model.amount_minor,
                ),
                _ => {
                    let fetched = self
                        .gateway
                        .fetch_payment(payment_id.clone())
                        .await
                        .map_err(UseCaseError::UpstreamPayment)?;
                    (
                        fetched.payment_status(),
                        model.external_reference.or(fetched.external_reference),
                        model.amount_minor.or(fetched.amount_minor),
                    )
                }
            };

        let existing = self
            .payment_repo
            .find_by_provider_payment_id(payment_id.clone())
            .await?;

        let business_id = match external_reference.as_deref().map(|r| Uuid::parse_str(r.trim())) {
            Some(Ok(id)) => id,
            Some(Err(_)) => {
                return Err(UseCaseError::Validation("invalid external_reference".to_string()));
            }
            None => existing
                .as_ref()
                .map(|payment| payment.business_id)
                .ok_or_else(|| UseCaseError::Validation("external_reference is required".to_string()))?,
        };

        if self.business_repo.find_by_id(business_id).await?.is_none() {
            return Err(UseCaseError::NotFound("business"));
        }

        let entity = InsertPaymentEntity {
            business_id,
            provider_payment_id: payment_id.clone(),
            amount_minor: amount_minor
                .or(existing.as_ref().map(|payment| payment.amount_minor))
                .unwrap_or(self.settings.price_minor),
            currency: existing
                .as_ref()
                .map(|payment| payment.currency.clone())
                .unwrap_or_else(|| self.settings.currency.clone()),
            status: status.to_string(),
        };

        let already_approved = existing
            .as_ref()
            .is_some_and(|payment| PaymentStatus::from_str(&payment.status) == PaymentStatus::Approved);

        if status != PaymentStatus::Approved {
            if already_approved {
                warn!(%payment_id, %status, "payments: late status for an approved payment ignored");
                return Ok(WebhookOutcome::AlreadyApplied);
            }
            if !self.payment_repo.record_status(entity).await? {
                warn!(%payment_id, %status, "payments: approved concurrently, late status ignored");
                return Ok(WebhookOutcome::AlreadyApplied);
            }
            info!(%payment_id, %business_id, %status, "payments: status recorded");
            return Ok(WebhookOutcome::Recorded { status });
        }

        let paid_until = paid_until_from(self.clock.now_utc(), self.settings.subscription_days);
        let applied = self.payment_repo.apply_approved(entity, paid_until).await?;

        if applied {
            info!(%payment_id, %business_id, %paid_until, "payments: subscription extended");
            Ok(WebhookOutcome::Applied)
        } else {
            info!(%payment_id, %business_id, "payments: duplicate approval ignored");
            Ok(WebhookOutcome::AlreadyApplied)
        }
    }
}
