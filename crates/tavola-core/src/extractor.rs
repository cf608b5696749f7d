//! Order extraction from assistant replies.
//!
//! The upstream text producer is untrusted and inconsistent: it answers
//! informational questions in prose, proposes orders as JSON (sometimes
//! fenced, sometimes bare), and formats prices however it likes. This
//! module is the single choke point that converts that uncertainty into
//! a closed two-variant result - a fully validated [`OrderEnvelope`] or
//! [`Extraction::NotAnOrder`]. It never fails partially: one malformed
//! item rejects the whole envelope rather than presenting an incomplete
//! cart as complete.

use crate::menu::{PriceValue, normalize_price};
use crate::order::OrderItem;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Matches the first fenced code block, optionally tagged `json`.
static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid fence regex"));

/// A single proposed item inside an order envelope.
///
/// Prices are normalized to numbers during extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A validated structured order proposed by the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEnvelope {
    /// Proposed items, in reply order. Duplicate ids are preserved here;
    /// the cart merge sums them.
    pub menu_items: Vec<EnvelopeItem>,
    /// The question to keep the conversation going. Always non-empty.
    pub follow_up_question: String,
}

impl OrderEnvelope {
    /// Converts the envelope into cart lines, one quantity per occurrence.
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.menu_items
            .iter()
            .map(|item| OrderItem {
                id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
                quantity: 1,
                image: item.image.clone(),
            })
            .collect()
    }

    /// Serializes the envelope back into the reply wire shape, including
    /// the `"type": "order"` discriminant.
    pub fn to_reply_text(&self) -> String {
        let value = serde_json::json!({
            "type": "order",
            "menuItems": self.menu_items,
            "followUpQuestion": self.follow_up_question,
        });
        value.to_string()
    }
}

/// The closed result of inspecting an assistant reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The reply encodes a valid structured order.
    Order(OrderEnvelope),
    /// The reply is plain informational text (or malformed JSON, which
    /// fails closed to the same variant).
    NotAnOrder,
}

impl Extraction {
    /// Whether this is an order.
    pub fn is_order(&self) -> bool {
        matches!(self, Self::Order(_))
    }
}

/// Inspects a raw assistant reply for a structured order.
///
/// The candidate text is the inner content of the first fenced code
/// block when one exists, otherwise the trimmed reply itself. The
/// candidate must parse as JSON and pass structural validation:
/// `type == "order"`, `menuItems` an array of well-formed items, and a
/// non-empty `followUpQuestion`. Every violation degrades to
/// [`Extraction::NotAnOrder`]; this function never panics or errors.
pub fn extract(raw: &str) -> Extraction {
    let candidate = match FENCED_BLOCK.captures(raw) {
        Some(caps) => caps[1].trim().to_string(),
        None => raw.trim().to_string(),
    };

    let Ok(value) = serde_json::from_str::<Value>(&candidate) else {
        return Extraction::NotAnOrder;
    };

    match validate_envelope(&value) {
        Some(envelope) => Extraction::Order(envelope),
        None => Extraction::NotAnOrder,
    }
}

fn validate_envelope(value: &Value) -> Option<OrderEnvelope> {
    let object = value.as_object()?;

    if object.get("type")?.as_str()? != "order" {
        return None;
    }

    let raw_items = object.get("menuItems")?.as_array()?;

    let follow_up_question = object.get("followUpQuestion")?.as_str()?.trim();
    if follow_up_question.is_empty() {
        return None;
    }

    let mut menu_items = Vec::with_capacity(raw_items.len());
    for raw in raw_items {
        menu_items.push(validate_item(raw)?);
    }

    Some(OrderEnvelope {
        menu_items,
        follow_up_question: follow_up_question.to_string(),
    })
}

fn validate_item(value: &Value) -> Option<EnvelopeItem> {
    let object = value.as_object()?;

    // Ids are strings on the wire, but the producer occasionally emits
    // bare numbers; both resolve to the same identity key.
    let id = match object.get("id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    let name = object.get("name")?.as_str()?.to_string();

    let raw_price = match object.get("price")? {
        Value::Number(n) => PriceValue::Number(n.as_f64()?),
        Value::String(s) => PriceValue::Text(s.clone()),
        _ => return None,
    };
    let price = normalize_price(&raw_price)?;

    let image = match object.get("image") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return None,
    };

    Some(EnvelopeItem {
        id,
        name,
        price,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_envelope_with_currency_price() {
        let reply = "```json\n{\"type\":\"order\",\"menuItems\":[{\"id\":\"1\",\"name\":\"Burger\",\"price\":\"$12.99\"}],\"followUpQuestion\":\"Anything else?\"}\n```";
        let Extraction::Order(envelope) = extract(reply) else {
            panic!("expected an order");
        };
        assert_eq!(envelope.menu_items.len(), 1);
        assert_eq!(envelope.menu_items[0].price, 12.99);
        assert_eq!(envelope.follow_up_question, "Anything else?");
    }

    #[test]
    fn test_bare_json_without_fence() {
        let reply = r#"{"type":"order","menuItems":[{"id":"2","name":"Salad","price":8.99}],"followUpQuestion":"Add a drink?"}"#;
        assert!(extract(reply).is_order());
    }

    #[test]
    fn test_untagged_fence_is_accepted() {
        let reply = "Here you go:\n```\n{\"type\":\"order\",\"menuItems\":[],\"followUpQuestion\":\"More?\"}\n```";
        assert!(extract(reply).is_order());
    }

    #[test]
    fn test_plain_text_is_not_an_order() {
        assert_eq!(
            extract("We don't have vegan options."),
            Extraction::NotAnOrder
        );
    }

    #[test]
    fn test_wrong_type_tag_fails_closed() {
        let reply = r#"{"type":"info","menuItems":[],"followUpQuestion":"?"}"#;
        assert_eq!(extract(reply), Extraction::NotAnOrder);
    }

    #[test]
    fn test_missing_follow_up_question_fails_closed() {
        let reply = r#"{"type":"order","menuItems":[]}"#;
        assert_eq!(extract(reply), Extraction::NotAnOrder);
        let blank = r#"{"type":"order","menuItems":[],"followUpQuestion":"  "}"#;
        assert_eq!(extract(blank), Extraction::NotAnOrder);
    }

    #[test]
    fn test_one_bad_price_rejects_the_whole_envelope() {
        let reply = r#"{"type":"order","menuItems":[
            {"id":"1","name":"Burger","price":12.99},
            {"id":"2","name":"Mystery","price":"market price"}
        ],"followUpQuestion":"Ok?"}"#;
        assert_eq!(extract(reply), Extraction::NotAnOrder);
    }

    #[test]
    fn test_menu_items_must_be_an_array() {
        let reply = r#"{"type":"order","menuItems":{"id":"1"},"followUpQuestion":"Ok?"}"#;
        assert_eq!(extract(reply), Extraction::NotAnOrder);
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let reply = r#"{"type":"order","menuItems":[{"id":7,"name":"Soup","price":4.5}],"followUpQuestion":"Ok?"}"#;
        let Extraction::Order(envelope) = extract(reply) else {
            panic!("expected an order");
        };
        assert_eq!(envelope.menu_items[0].id, "7");
    }

    #[test]
    fn test_never_panics_on_adversarial_input() {
        for input in ["", "```", "``````", "```json\n```", "{", "[1,2,3]", "null", "42"] {
            assert_eq!(extract(input), Extraction::NotAnOrder, "input: {input:?}");
        }
    }

    #[test]
    fn test_round_trip_reproduces_the_envelope() {
        let envelope = OrderEnvelope {
            menu_items: vec![
                EnvelopeItem {
                    id: "1".to_string(),
                    name: "Burger".to_string(),
                    price: 12.99,
                    image: Some("burger.png".to_string()),
                },
                EnvelopeItem {
                    id: "2".to_string(),
                    name: "Salad".to_string(),
                    price: 8.99,
                    image: None,
                },
            ],
            follow_up_question: "Anything else?".to_string(),
        };

        let Extraction::Order(reparsed) = extract(&envelope.to_reply_text()) else {
            panic!("expected an order");
        };
        assert_eq!(reparsed, envelope);
    }

    #[test]
    fn test_order_items_carry_one_quantity_per_occurrence() {
        let reply = r#"{"type":"order","menuItems":[
            {"id":"1","name":"Burger","price":12.99},
            {"id":"1","name":"Burger","price":12.99}
        ],"followUpQuestion":"Ok?"}"#;
        let Extraction::Order(envelope) = extract(reply) else {
            panic!("expected an order");
        };
        let items = envelope.order_items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.quantity == 1));
    }
}
