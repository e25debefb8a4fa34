use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::error;
use url::Url;

use crate::domain::value_objects::payments::{PaymentIntent, PaymentIntentRequest, ProviderPayment};

/// Minimal payment provider client built on reqwest.
pub struct PaymentProviderClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorEnvelope {
    message: Option<String>,
    error: Option<String>,
}

impl PaymentProviderClient {
    pub fn new(base_url: Url, access_token: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build payment provider http client")?;

        Ok(Self {
            http,
            base_url,
            access_token,
        })
    }

    /// Appends each segment percent-encoded, so ids cannot escape the base path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
            anyhow::bail!("invalid payment provider path: {segments:?}");
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("payment provider base url cannot take a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (provider_error, provider_message) =
            match serde_json::from_str::<ProviderErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.error, envelope.message),
                Err(_) => (None, None),
            };

        error!(
            status = %status,
            provider_error = ?provider_error,
            provider_message = ?provider_message,
            response_body = %body,
            context = %context,
            "payment provider request failed"
        );

        anyhow::bail!(
            "Payment provider request failed: {} (status {})",
            context,
            status
        );
    }

    /// Creates a payment intent and returns the provider id plus the redirect URL.
    pub async fn create_payment_intent(&self, request: PaymentIntentRequest) -> Result<PaymentIntent> {
        let resp = self
            .http
            .post(self.endpoint(&["payments"])?)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .json(&request)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create payment intent").await?;

        let intent: PaymentIntent = resp.json().await?;
        Ok(intent)
    }

    pub async fn fetch_payment(&self, payment_id: &str) -> Result<ProviderPayment> {
        let resp = self
            .http
            .get(self.endpoint(&["payments", payment_id])?)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "fetch payment").await?;

        let payment: ProviderPayment = resp.json().await?;
        Ok(payment)
    }
}
