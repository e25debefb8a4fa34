use serde::{Deserialize, Serialize};

/// How the search city filter is compared against the stored city.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CityMatch {
    /// Case-insensitive substring.
    #[default]
    Substring,
    /// Case-insensitive equality.
    Exact,
}

impl CityMatch {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "substring" | "contains" => Some(CityMatch::Substring),
            "exact" => Some(CityMatch::Exact),
            _ => None,
        }
    }
}
