use thiserror::Error;

use super::enums::business_kinds::BusinessKind;

const PHYSICAL_CATEGORIES: &[&str] = &[
    "restaurant",
    "cafe",
    "bakery",
    "bar",
    "grocery",
    "pharmacy",
    "hardware",
    "clothing",
    "hairdresser",
];

const SERVICE_CATEGORIES: &[&str] = &[
    "plumbing",
    "electrician",
    "cleaning",
    "beauty",
    "tutoring",
    "delivery",
    "repair",
    "gardening",
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("unknown business type: {0}")]
    UnknownKind(String),
    #[error("category `{category}` is not valid for type `{kind}`")]
    UnknownCategory { kind: BusinessKind, category: String },
}

pub fn categories_for(kind: BusinessKind) -> &'static [&'static str] {
    match kind {
        BusinessKind::Physical => PHYSICAL_CATEGORIES,
        BusinessKind::Service => SERVICE_CATEGORIES,
    }
}

pub fn parse_kind(raw: &str) -> Result<BusinessKind, TaxonomyError> {
    BusinessKind::from_str(raw).ok_or_else(|| TaxonomyError::UnknownKind(raw.to_string()))
}

/// Returns the canonical (lowercase) category when it belongs to `kind`.
pub fn validate_category(kind: BusinessKind, raw: &str) -> Result<&'static str, TaxonomyError> {
    let wanted = raw.trim().to_ascii_lowercase();
    categories_for(kind)
        .iter()
        .find(|category| **category == wanted)
        .copied()
        .ok_or(TaxonomyError::UnknownCategory {
            kind,
            category: raw.to_string(),
        })
}

/// Search may filter on a category without naming the type.
pub fn validate_any_category(raw: &str) -> Result<&'static str, TaxonomyError> {
    validate_category(BusinessKind::Physical, raw)
        .or_else(|_| validate_category(BusinessKind::Service, raw))
}
