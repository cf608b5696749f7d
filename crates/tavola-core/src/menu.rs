//! Menu catalog types.
//!
//! The catalog is supplied by the host platform (the website builder owns
//! menu persistence) and is read-only to the ordering core. Prices arrive
//! in whatever shape the host stored them - JSON numbers or
//! currency-formatted strings - so every consumer goes through
//! [`normalize_price`] instead of trusting the raw value.

use serde::{Deserialize, Serialize};

/// A menu item price as it appears on the wire.
///
/// Hosts store prices inconsistently (`12.99` vs `"$12.99"`), so the raw
/// value is kept and normalized lazily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    /// Plain JSON number.
    Number(f64),
    /// Currency-formatted string, e.g. `"$12.99"` or `"12.99 USD"`.
    Text(String),
}

impl From<f64> for PriceValue {
    fn from(value: f64) -> Self {
        PriceValue::Number(value)
    }
}

impl From<&str> for PriceValue {
    fn from(value: &str) -> Self {
        PriceValue::Text(value.to_string())
    }
}

impl std::fmt::Display for PriceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceValue::Number(n) => write!(f, "{n}"),
            PriceValue::Text(s) => f.write_str(s),
        }
    }
}

/// Normalizes a raw price value to a finite `f64`.
///
/// Numbers pass through unchanged; strings are stripped down to
/// `[0-9.]` and parsed. Returns `None` when the result is not finite
/// (empty strings, `"market price"`, `NaN`, infinities).
pub fn normalize_price(price: &PriceValue) -> Option<f64> {
    let value = match price {
        PriceValue::Number(n) => *n,
        PriceValue::Text(s) => {
            let cleaned: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
            cleaned.parse::<f64>().ok()?
        }
    };

    value.is_finite().then_some(value)
}

/// A single item on a restaurant's menu.
///
/// Owned by the host catalog; immutable from the core's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Stable identifier, when the host assigned one.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name. Hosts that predate the `name` field send `title`.
    #[serde(alias = "title")]
    pub name: String,
    /// Raw price value as stored by the host.
    pub price: PriceValue,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category labels. The first tag is the item's primary category.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Opaque image reference (URL or asset id).
    #[serde(default)]
    pub image: Option<String>,
}

impl MenuItem {
    /// The stable identity key: the host-assigned `id`, falling back to
    /// the display name when no id exists.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// The normalized price, if the raw value is usable.
    pub fn normalized_price(&self) -> Option<f64> {
        normalize_price(&self.price)
    }

    /// The primary category label ("Uncategorized" for untagged items).
    pub fn category(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("Uncategorized")
    }
}

/// An in-memory, read-only view of a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCatalog {
    /// Display name of the restaurant, sent upstream with every chat call.
    pub restaurant_name: String,
    /// The menu items, in the host's display order.
    pub items: Vec<MenuItem>,
}

impl MenuCatalog {
    /// Creates a catalog view over the given items.
    pub fn new(restaurant_name: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            restaurant_name: restaurant_name.into(),
            items,
        }
    }
}

/// A precomputed (or deterministically derived) recommendation for a
/// budget bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecommendation {
    /// The recommended selection.
    pub recommended_items: Vec<MenuItem>,
    /// Human-readable summary shown alongside the selection.
    pub explanation: String,
    /// Exact sum of the normalized prices of `recommended_items`.
    pub total_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, price: PriceValue) -> MenuItem {
        MenuItem {
            id: Some(id.to_string()),
            name: name.to_string(),
            price,
            description: None,
            tags: Vec::new(),
            image: None,
        }
    }

    #[test]
    fn test_normalize_numeric_price() {
        assert_eq!(normalize_price(&PriceValue::Number(12.99)), Some(12.99));
        assert_eq!(normalize_price(&PriceValue::Number(f64::NAN)), None);
        assert_eq!(normalize_price(&PriceValue::Number(f64::INFINITY)), None);
    }

    #[test]
    fn test_normalize_currency_string() {
        assert_eq!(normalize_price(&"$12.99".into()), Some(12.99));
        assert_eq!(normalize_price(&"USD 8.50".into()), Some(8.50));
        assert_eq!(normalize_price(&"7".into()), Some(7.0));
    }

    #[test]
    fn test_normalize_unusable_string() {
        assert_eq!(normalize_price(&"market price".into()), None);
        assert_eq!(normalize_price(&"".into()), None);
    }

    #[test]
    fn test_key_falls_back_to_name() {
        let mut i = item("42", "Burger", PriceValue::Number(9.0));
        assert_eq!(i.key(), "42");
        i.id = None;
        assert_eq!(i.key(), "Burger");
    }

    #[test]
    fn test_category_defaults_to_uncategorized() {
        let mut i = item("1", "Soup", PriceValue::Number(4.0));
        assert_eq!(i.category(), "Uncategorized");
        i.tags = vec!["starter".to_string(), "vegan".to_string()];
        assert_eq!(i.category(), "starter");
    }

    #[test]
    fn test_deserialize_title_alias() {
        let json = r#"{"title": "Pasta", "price": "$11.00"}"#;
        let i: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(i.name, "Pasta");
        assert_eq!(i.normalized_price(), Some(11.0));
    }
}
