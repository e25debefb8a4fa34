use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::payment_statuses::PaymentStatus;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentIntentRequest {
    pub external_reference: Uuid,
    pub amount_minor: i32,
    pub currency: String,
    pub description: String,
    pub success_url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PaymentIntent {
    pub id: String,
    pub redirect_url: String,
}

/// Payment state as reported by the provider.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProviderPayment {
    pub id: String,
    pub status: String,
    pub external_reference: Option<String>,
    pub amount_minor: Option<i32>,
}

impl ProviderPayment {
    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::from_str(&self.status)
    }
}

/// Notification body posted by the provider. `status` and
/// `external_reference` may be omitted, in which case the payment is fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentWebhookModel {
    pub payment_id: String,
    pub status: Option<String>,
    pub external_reference: Option<String>,
    pub amount_minor: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutDto {
    pub payment_id: String,
    pub redirect_url: String,
}
