use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::America::Santiago;
use mapalocal_core::domain::{
    entities::{businesses::BusinessEntity, offers::OfferEntity},
    repositories::clock::MockClock,
    value_objects::enums::account_roles::AccountRole,
};
use uuid::Uuid;

use crate::auth::AuthUser;

/// Santiago wall-clock reading as a UTC instant.
pub fn santiago(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Santiago
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn fixed_clock(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> MockClock {
    let now = santiago(year, month, day, hour, minute);
    let mut clock = MockClock::new();
    clock.expect_now_utc().returning(move || now);
    clock
}

fn account(role: AccountRole) -> AuthUser {
    AuthUser {
        account_id: Uuid::new_v4(),
        email: "someone@example.com".to_string(),
        role,
    }
}

pub fn owner() -> AuthUser {
    account(AccountRole::Owner)
}

pub fn other_owner() -> AuthUser {
    account(AccountRole::Owner)
}

pub fn user() -> AuthUser {
    account(AccountRole::User)
}

/// Unpaid physical bakery in Valparaíso, AUTOMATIC, 09:00-20:00.
pub fn sample_business(owner_id: Uuid) -> BusinessEntity {
    let created_at = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
    BusinessEntity {
        id: Uuid::new_v4(),
        owner_id,
        name: "Panadería Sol".to_string(),
        kind: "physical".to_string(),
        category: "bakery".to_string(),
        description: None,
        city: "Valparaíso".to_string(),
        latitude: Some(-33.04),
        longitude: Some(-71.61),
        open_time: Some("09:00".to_string()),
        close_time: Some("20:00".to_string()),
        mode: "AUTOMATIC".to_string(),
        manual_open: false,
        is_open: false,
        paid: false,
        paid_until: None,
        contact_handle: None,
        created_at,
        updated_at: created_at,
    }
}

pub fn sample_offer(business_id: Uuid, created_at: DateTime<Utc>) -> OfferEntity {
    OfferEntity {
        id: Uuid::new_v4(),
        business_id,
        title: "2x1 marraquetas".to_string(),
        price: "$1.500".to_string(),
        description: None,
        image_url: None,
        created_at,
    }
}
