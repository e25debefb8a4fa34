use chrono_tz::Tz;
use mapalocal_core::domain::value_objects::enums::city_match::CityMatch;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub auth: AuthSecret,
    pub directory: Directory,
    pub payment: Payment,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct AuthSecret {
    pub jwt_secret: String,
    pub ttl_seconds: u64,
}

/// Rules shared by the status resolver, the offer manager and search.
#[derive(Debug, Clone)]
pub struct Directory {
    pub timezone: Tz,
    pub require_payment_for_offers: bool,
    pub status_refresh_interval: Duration,
    pub city_match: CityMatch,
}

#[derive(Debug, Clone)]
pub struct Payment {
    pub api_base_url: Url,
    pub access_token: String,
    pub webhook_secret: String,
    pub price_minor: i32,
    pub currency: String,
    pub success_url: String,
    pub timeout: Duration,
    pub subscription_days: i64,
}
