use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mapalocal_core::domain::value_objects::enums::account_roles::AccountRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// HS256 signing material shared by login and the request extractor.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    pub ttl_seconds: u64,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    pub fn issue(
        &self,
        account_id: Uuid,
        email: &str,
        role: AccountRole,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let iat = now.timestamp().max(0) as usize;
        let claims = Claims {
            sub: account_id.to_string(),
            role: role.as_str().to_string(),
            email: email.to_string(),
            iat,
            exp: iat + self.ttl_seconds as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("failed to sign access token")
    }

    pub fn validate(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &self.decoding, &validation)
            .context("JWT validation failed")?;

        Ok(token_data.claims)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub account_id: Uuid,
    pub email: String,
    pub role: AccountRole,
}

impl AuthUser {
    pub fn is_owner(&self) -> bool {
        self.role == AccountRole::Owner
    }

    fn from_claims(claims: Claims) -> Result<Self> {
        let account_id = Uuid::parse_str(&claims.sub).context("Invalid account ID in token")?;
        let role = AccountRole::from_str(&claims.role).context("Invalid role in token")?;

        Ok(Self {
            account_id,
            email: claims.email,
            role,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = parts
            .extensions
            .get::<Arc<JwtKeys>>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("JWT keys are not installed")))?;

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized("Missing or invalid Authorization header".to_string()))?;

        let claims = keys
            .validate(bearer.token())
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        AuthUser::from_claims(claims).map_err(|e| AppError::Unauthorized(e.to_string()))
    }
}
