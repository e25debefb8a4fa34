use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    enums::{business_kinds::BusinessKind, city_match::CityMatch},
    offers::OfferDto,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub city: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
}

/// Validated filter handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessSearchFilter {
    pub city: String,
    pub city_match: CityMatch,
    pub kind: Option<BusinessKind>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BusinessKind,
    pub category: String,
    pub description: Option<String>,
    pub city: String,
    pub contact_url: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub map_url: Option<String>,
    pub open_now: bool,
    pub offer: Option<OfferDto>,
}

pub fn map_link(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps/search/?api=1&query={latitude},{longitude}")
}

/// Turns a stored messaging handle into a link a phone can open.
///
/// Phone numbers go to WhatsApp, `@name` handles to Telegram, full URLs pass
/// through unchanged.
pub fn contact_link(handle: &str) -> Option<String> {
    let handle = handle.trim();
    if handle.is_empty() {
        return None;
    }
    if handle.starts_with("https://") || handle.starts_with("http://") {
        return Some(handle.to_string());
    }
    if let Some(name) = handle.strip_prefix('@') {
        let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        return valid.then(|| format!("https://t.me/{name}"));
    }

    let phone_like = handle
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    let digits: String = handle.chars().filter(char::is_ascii_digit).collect();
    (phone_like && !digits.is_empty()).then(|| format!("https://wa.me/{digits}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers_link_to_whatsapp() {
        assert_eq!(
            contact_link("+56 9 1234-5678").as_deref(),
            Some("https://wa.me/56912345678")
        );
    }

    #[test]
    fn handles_link_to_telegram() {
        assert_eq!(
            contact_link("@panaderia_sol").as_deref(),
            Some("https://t.me/panaderia_sol")
        );
        assert_eq!(contact_link("@"), None);
    }

    #[test]
    fn urls_pass_through_and_garbage_is_dropped() {
        assert_eq!(
            contact_link("https://example.cl/contacto").as_deref(),
            Some("https://example.cl/contacto")
        );
        assert_eq!(contact_link("call me maybe"), None);
        assert_eq!(contact_link("   "), None);
    }

    #[test]
    fn map_link_embeds_coordinates() {
        assert_eq!(
            map_link(-33.45, -70.66),
            "https://www.google.com/maps/search/?api=1&query=-33.45,-70.66"
        );
    }
}
