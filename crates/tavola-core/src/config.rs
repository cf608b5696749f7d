//! Gateway configuration models.

use crate::error::Result;
use serde::{Deserialize, Serialize};

fn default_timeout_secs() -> u64 {
    30
}

/// Identity of the restaurant, as sent upstream with chat requests.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RestaurantConfig {
    /// Canonical display name. When configured, it takes precedence
    /// over the name carried on the catalog.
    pub name: String,
}

/// Configuration for the HTTP recommendation gateway.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Chat-completion endpoint (free-text mode).
    pub chat_url: String,
    /// Precomputed budget-recommendation store (bucket mode).
    pub budget_url: String,
    /// Per-request timeout in seconds. Timeouts surface as retryable
    /// gateway errors, identical to any other transport failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional restaurant identity override.
    #[serde(default)]
    pub restaurant: Option<RestaurantConfig>,
}

impl GatewayConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            chat_url: "http://localhost:3000/api/chat".to_string(),
            budget_url: "http://localhost:3000/api/budget-recommendation".to_string(),
            timeout_secs: default_timeout_secs(),
            restaurant: None,
        }
    }
}
