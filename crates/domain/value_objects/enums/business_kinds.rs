use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A physical venue is bound to coordinates and a schedule; a service is not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BusinessKind {
    Physical,
    Service,
}

impl BusinessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessKind::Physical => "physical",
            BusinessKind::Service => "service",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "physical" => Some(BusinessKind::Physical),
            "service" => Some(BusinessKind::Service),
            _ => None,
        }
    }

    pub fn is_physical(&self) -> bool {
        matches!(self, BusinessKind::Physical)
    }
}

impl Display for BusinessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
