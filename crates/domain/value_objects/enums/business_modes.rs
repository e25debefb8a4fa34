use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which evaluator decides the open/closed status of a business.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessMode {
    #[default]
    Automatic,
    Manual,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid mode: {0}")]
pub struct InvalidModeError(pub String);

impl BusinessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessMode::Automatic => "AUTOMATIC",
            BusinessMode::Manual => "MANUAL",
        }
    }
}

impl FromStr for BusinessMode {
    type Err = InvalidModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AUTO" | "AUTOMATIC" => Ok(BusinessMode::Automatic),
            "MANUAL" => Ok(BusinessMode::Manual),
            _ => Err(InvalidModeError(value.to_string())),
        }
    }
}

impl Display for BusinessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
