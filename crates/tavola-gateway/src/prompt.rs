//! Prompt construction for the free-text recommendation mode.
//!
//! The upstream completion call is steered by a prompt contract, not by
//! code: plain text for informational queries, exactly one bare JSON
//! envelope when an order is proposed, and budget discipline. The
//! extractor and the deterministic allocator are what turn that soft
//! contract into guarantees; this module only renders the text.

use tavola_core::menu::{MenuCatalog, MenuItem};

/// The behavioral rules sent with every free-text request.
const INSTRUCTIONS: &str = "\
Rules:
- Answer informational questions in plain text.
- When you propose an order, reply with exactly one JSON object and no \
surrounding prose, shaped as: {\"type\": \"order\", \"menuItems\": \
[{\"id\": string, \"name\": string, \"price\": number}], \
\"followUpQuestion\": string}.
- Prioritize staying within any budget the user states. Exceed it only \
when no combination of menu items fits, and explain the shortfall in \
the same reply.";

/// Renders one numbered menu line:
/// `"<n>. <name> - $<price> (<category>): <description>"`.
pub fn format_menu_line(number: usize, item: &MenuItem) -> String {
    let price = match item.normalized_price() {
        Some(p) => format!("{p:.2}"),
        None => item.price.to_string(),
    };
    format!(
        "{number}. {name} - ${price} ({category}): {description}",
        name = item.name,
        category = item.category(),
        description = item.description.as_deref().unwrap_or_default(),
    )
}

/// Renders the whole catalog as a numbered list, one line per item.
pub fn render_menu(catalog: &MenuCatalog) -> String {
    catalog
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| format_menu_line(index + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the full system prompt for a catalog.
pub fn system_prompt(catalog: &MenuCatalog) -> String {
    format!(
        "You are a friendly ordering assistant for {name}.\n\nMenu:\n{menu}\n\n{INSTRUCTIONS}",
        name = catalog.restaurant_name,
        menu = render_menu(catalog),
    )
}
