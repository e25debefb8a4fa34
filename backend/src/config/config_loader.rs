use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use mapalocal_core::domain::value_objects::{
    enums::city_match::CityMatch, subscriptions::SUBSCRIPTION_PERIOD_DAYS,
};
use url::Url;

use super::config_model::{AuthSecret, BackendServer, Database, Directory, DotEnvyConfig, Payment};

const DEFAULT_TIMEZONE: &str = "America/Santiago";
const DEFAULT_JWT_TTL_SECONDS: u64 = 86_400;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
const DEFAULT_PAYMENT_TIMEOUT_SECS: u64 = 10;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    from_lookup(|key| std::env::var(key).ok())
}

/// Builds the config from any key/value source so it can be exercised without
/// touching the process environment.
pub fn from_lookup<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let env = Env(lookup);

    let backend_server = BackendServer {
        port: env.parse("SERVER_PORT_BACKEND")?,
        body_limit: env.parse("SERVER_BODY_LIMIT")?,
        timeout: env.parse("SERVER_TIMEOUT")?,
    };

    let database = Database {
        url: env.required("DATABASE_URL")?,
    };

    let auth = AuthSecret {
        jwt_secret: env.required("JWT_SECRET")?,
        ttl_seconds: env.parse_or("JWT_TTL_SECONDS", DEFAULT_JWT_TTL_SECONDS)?,
    };

    let timezone_raw = env
        .optional("DIRECTORY_TIMEZONE")
        .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
    let timezone = Tz::from_str(&timezone_raw)
        .map_err(|e| anyhow!("DIRECTORY_TIMEZONE is invalid: {e}"))?;

    let city_match = match env.optional("CITY_MATCH") {
        Some(raw) => CityMatch::from_str(&raw)
            .ok_or_else(|| anyhow!("CITY_MATCH is invalid (value: {raw})"))?,
        None => CityMatch::default(),
    };

    let directory = Directory {
        timezone,
        require_payment_for_offers: env.flag("REQUIRE_PAYMENT_FOR_OFFERS")?,
        status_refresh_interval: Duration::from_secs(
            env.parse_or("STATUS_REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL_SECS)?
                .max(1),
        ),
        city_match,
    };

    let api_base_url = env.required("PAYMENT_API_BASE_URL")?;
    let payment = Payment {
        api_base_url: Url::parse(&api_base_url).context("PAYMENT_API_BASE_URL is invalid")?,
        access_token: env.required("PAYMENT_ACCESS_TOKEN")?,
        webhook_secret: env.required("PAYMENT_WEBHOOK_SECRET")?,
        price_minor: env.parse("PAYMENT_PRICE_MINOR")?,
        currency: env
            .optional("PAYMENT_CURRENCY")
            .unwrap_or_else(|| "CLP".to_string()),
        success_url: env.required("PAYMENT_SUCCESS_URL")?,
        timeout: Duration::from_secs(
            env.parse_or("PAYMENT_TIMEOUT_SECS", DEFAULT_PAYMENT_TIMEOUT_SECS)?,
        ),
        subscription_days: env.parse_or("SUBSCRIPTION_DAYS", SUBSCRIPTION_PERIOD_DAYS)?,
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        auth,
        directory,
        payment,
    })
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.optional(key)
            .ok_or_else(|| anyhow!("{key} is invalid"))
    }

    fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.required(key)?
            .parse()
            .with_context(|| format!("{key} is invalid"))
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.optional(key) {
            Some(raw) => raw.parse().with_context(|| format!("{key} is invalid")),
            None => Ok(default),
        }
    }

    fn flag(&self, key: &str) -> Result<bool> {
        match self.optional(key).map(|v| v.to_ascii_lowercase()) {
            None => Ok(false),
            Some(v) => match v.as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(anyhow!("{key} is invalid (value: {v})")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("SERVER_PORT_BACKEND", "8080"),
            ("SERVER_BODY_LIMIT", "10"),
            ("SERVER_TIMEOUT", "30"),
            ("DATABASE_URL", "postgres://localhost:5432/mapalocal"),
            ("JWT_SECRET", "secret"),
            ("PAYMENT_API_BASE_URL", "https://pay.example.com/v1/"),
            ("PAYMENT_ACCESS_TOKEN", "token"),
            ("PAYMENT_WEBHOOK_SECRET", "whsec"),
            ("PAYMENT_PRICE_MINOR", "9990"),
            ("PAYMENT_SUCCESS_URL", "https://mapalocal.example/paid"),
        ])
    }

    fn load_from(env: &HashMap<&'static str, &'static str>) -> Result<DotEnvyConfig> {
        from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_apply_when_optional_keys_are_missing() {
        let config = load_from(&base_env()).unwrap();

        assert_eq!(config.backend_server.port, 8080);
        assert_eq!(config.auth.ttl_seconds, 86_400);
        assert_eq!(config.directory.timezone, chrono_tz::America::Santiago);
        assert!(!config.directory.require_payment_for_offers);
        assert_eq!(config.directory.status_refresh_interval, Duration::from_secs(60));
        assert_eq!(config.directory.city_match, CityMatch::Substring);
        assert_eq!(config.payment.currency, "CLP");
        assert_eq!(config.payment.timeout, Duration::from_secs(10));
        assert_eq!(config.payment.subscription_days, 30);
    }

    #[test]
    fn overrides_are_parsed() {
        let mut env = base_env();
        env.insert("DIRECTORY_TIMEZONE", "Europe/Madrid");
        env.insert("REQUIRE_PAYMENT_FOR_OFFERS", "true");
        env.insert("STATUS_REFRESH_INTERVAL_SECS", "15");
        env.insert("CITY_MATCH", "exact");

        let config = load_from(&env).unwrap();

        assert_eq!(config.directory.timezone, chrono_tz::Europe::Madrid);
        assert!(config.directory.require_payment_for_offers);
        assert_eq!(config.directory.status_refresh_interval, Duration::from_secs(15));
        assert_eq!(config.directory.city_match, CityMatch::Exact);
    }

    #[test]
    fn missing_or_malformed_values_are_errors() {
        let mut env = base_env();
        env.remove("DATABASE_URL");
        assert!(load_from(&env).is_err());

        let mut env = base_env();
        env.insert("DIRECTORY_TIMEZONE", "Mars/Olympus");
        assert!(load_from(&env).is_err());

        let mut env = base_env();
        env.insert("REQUIRE_PAYMENT_FOR_OFFERS", "maybe");
        assert!(load_from(&env).is_err());
    }
}
