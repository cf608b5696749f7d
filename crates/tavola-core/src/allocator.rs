//! Deterministic budget allocation.
//!
//! Given a catalog and a budget, selects a near-optimal subset of items
//! that spreads across categories before filling remaining budget with
//! cheap items. This is a greedy heuristic, not a knapsack solver: the
//! design trades optimality for determinism, speed, and category
//! variety. It backs the "here's what fits your budget" panel and the
//! fallback path when the precomputed bucket store has no entry.

use crate::menu::{BudgetRecommendation, MenuItem};
use crate::order::round_to_cents;

/// Selects menu items within `budget`, maximizing category variety first.
///
/// Pipeline:
/// 1. Filter out items whose normalized price is not a finite positive
///    number, or exceeds the budget outright.
/// 2. Group the rest by primary category (first tag; untagged items form
///    an "Uncategorized" group).
/// 3. Variety pass: visit groups in ascending order of their cheapest
///    item and take that cheapest item if it fits the *remaining*
///    budget. At most one representative per category before any
///    volume-filling. Cheapest-group-first is part of the contract, not
///    an optimization: it is what lets a small budget cover several
///    cheap categories instead of being consumed by the first expensive
///    one. Catalog insertion order is only the tie-break, for groups
///    (and items) with equal prices.
/// 4. Fill pass: merge everything not yet selected, sort ascending by
///    price, and append greedily while items fit.
///
/// Output ordering is part of the contract: category representatives
/// first (in selection order), then fill-pass items ascending by price.
/// A non-positive budget yields an empty selection.
pub fn allocate(items: &[MenuItem], budget: f64) -> Vec<MenuItem> {
    if budget <= 0.0 {
        return Vec::new();
    }

    // Filter and pair each item with its normalized price.
    let priced: Vec<(MenuItem, f64)> = items
        .iter()
        .filter_map(|item| {
            let price = item.normalized_price()?;
            (price > 0.0 && price <= budget).then(|| (item.clone(), price))
        })
        .collect();

    // Group by primary category, preserving catalog insertion order
    // within each group.
    let mut groups: Vec<(String, Vec<(MenuItem, f64)>)> = Vec::new();
    for (item, price) in priced {
        let category = item.category().to_string();
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, members)) => members.push((item, price)),
            None => groups.push((category, vec![(item, price)])),
        }
    }

    let mut remaining = budget;
    let mut representatives: Vec<(MenuItem, f64)> = Vec::new();

    // Variety pass: cheapest groups first so a small budget still covers
    // as many categories as possible. Contractual; insertion order is
    // only the tie-break (the sort is stable).
    let mut group_order: Vec<usize> = (0..groups.len()).collect();
    group_order.sort_by(|a, b| {
        let cheapest = |idx: &usize| {
            groups[*idx]
                .1
                .iter()
                .map(|(_, p)| *p)
                .fold(f64::INFINITY, f64::min)
        };
        cheapest(a).partial_cmp(&cheapest(b)).unwrap_or(std::cmp::Ordering::Equal)
    });

    for idx in group_order {
        let members = &mut groups[idx].1;
        // Ties on price keep catalog order.
        let Some(cheapest_pos) = members
            .iter()
            .enumerate()
            .min_by(|(pos_a, (_, a)), (pos_b, (_, b))| {
                a.partial_cmp(b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(pos_a.cmp(pos_b))
            })
            .map(|(pos, _)| pos)
        else {
            continue;
        };

        if members[cheapest_pos].1 <= remaining {
            let (item, price) = members.remove(cheapest_pos);
            remaining -= price;
            representatives.push((item, price));
        }
    }

    // Fill pass: everything left over, cheapest first.
    let mut leftovers: Vec<(MenuItem, f64)> =
        groups.into_iter().flat_map(|(_, members)| members).collect();
    leftovers.sort_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut selection: Vec<MenuItem> = representatives.into_iter().map(|(item, _)| item).collect();
    for (item, price) in leftovers {
        if price <= remaining {
            remaining -= price;
            selection.push(item);
        }
    }

    selection
}

/// Runs [`allocate`] and wraps the selection as a [`BudgetRecommendation`]
/// with an explanation line and the exact (cent-rounded) total.
///
/// Used when the precomputed bucket store has no entry for a budget.
pub fn allocate_recommendation(items: &[MenuItem], budget: f64) -> BudgetRecommendation {
    let selection = allocate(items, budget);
    let total: f64 = selection
        .iter()
        .filter_map(MenuItem::normalized_price)
        .sum();
    let total = round_to_cents(total);

    let categories: std::collections::HashSet<&str> =
        selection.iter().map(MenuItem::category).collect();

    let explanation = if selection.is_empty() {
        format!("Nothing on the menu fits a ${budget:.2} budget.")
    } else {
        format!(
            "{} items across {} categories for ${:.2}",
            selection.len(),
            categories.len(),
            total
        )
    };

    BudgetRecommendation {
        recommended_items: selection,
        explanation,
        total_price: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::PriceValue;

    fn item(id: &str, name: &str, price: impl Into<PriceValue>, tags: &[&str]) -> MenuItem {
        MenuItem {
            id: Some(id.to_string()),
            name: name.to_string(),
            price: price.into(),
            description: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: None,
        }
    }

    #[test]
    fn test_non_positive_budget_yields_empty_selection() {
        let catalog = vec![item("1", "Burger", 12.99, &["meat"])];
        assert!(allocate(&catalog, 0.0).is_empty());
        assert!(allocate(&catalog, -5.0).is_empty());
    }

    #[test]
    fn test_selection_total_never_exceeds_budget() {
        let catalog = vec![
            item("1", "Burger", 12.99, &["meat"]),
            item("2", "Salad", 8.99, &["veg"]),
            item("3", "Fries", 3.50, &["side"]),
            item("4", "Soda", 2.00, &["drink"]),
        ];
        for budget in [1.0, 5.0, 10.0, 20.0, 100.0] {
            let total: f64 = allocate(&catalog, budget)
                .iter()
                .filter_map(MenuItem::normalized_price)
                .sum();
            assert!(total <= budget, "total {total} exceeds budget {budget}");
        }
    }

    #[test]
    fn test_unpriced_and_free_items_are_excluded() {
        let catalog = vec![
            item("1", "Mystery", "market price", &["special"]),
            item("2", "Water", 0.0, &["drink"]),
            item("3", "Fries", 3.50, &["side"]),
        ];
        let selection = allocate(&catalog, 50.0);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0].name, "Fries");
    }

    // Burger fits the full budget but taking Salad first leaves too
    // little for the meat group, and the fill pass cannot recover it.
    #[test]
    fn test_two_category_budget_squeeze() {
        let catalog = vec![
            item("1", "Burger", 12.99, &["meat"]),
            item("2", "Salad", 8.99, &["veg"]),
        ];
        let selection = allocate(&catalog, 15.0);
        let names: Vec<&str> = selection.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Salad"]);
    }

    #[test]
    fn test_one_representative_per_category_before_filling() {
        let catalog = vec![
            item("1", "Ribeye", 25.00, &["meat"]),
            item("2", "Burger", 10.00, &["meat"]),
            item("3", "Salad", 8.00, &["veg"]),
            item("4", "Soup", 6.00, &["veg"]),
        ];
        let selection = allocate(&catalog, 20.0);
        let names: Vec<&str> = selection.iter().map(|i| i.name.as_str()).collect();
        // Representatives: Soup (veg, cheapest group) then Burger (meat).
        // Fill: Salad at 8.00 no longer fits the remaining 4.00.
        assert_eq!(names, vec!["Soup", "Burger"]);
    }

    #[test]
    fn test_fill_pass_appends_ascending_after_representatives() {
        let catalog = vec![
            item("1", "Burger", 10.00, &["meat"]),
            item("2", "Salad", 4.00, &["veg"]),
            item("3", "Soup", 3.00, &["veg"]),
            item("4", "Fries", 2.00, &["side"]),
            item("5", "Slaw", 5.00, &["side"]),
        ];
        let selection = allocate(&catalog, 30.0);
        let names: Vec<&str> = selection.iter().map(|i| i.name.as_str()).collect();
        // Representatives by cheapest group: Fries, Soup, Burger.
        // Fill pass ascending: Salad (4.00), Slaw (5.00).
        assert_eq!(names, vec!["Fries", "Soup", "Burger", "Salad", "Slaw"]);
    }

    #[test]
    fn test_equally_cheap_groups_keep_catalog_order() {
        let catalog = vec![
            item("1", "Fries", 5.00, &["side"]),
            item("2", "Soup", 5.00, &["veg"]),
            item("3", "Burger", 12.00, &["meat"]),
        ];
        let selection = allocate(&catalog, 11.0);
        let names: Vec<&str> = selection.iter().map(|i| i.name.as_str()).collect();
        // side and veg both open at 5.00; the side group appears first
        // in the catalog, so it wins the tie. Burger no longer fits.
        assert_eq!(names, vec!["Fries", "Soup"]);
    }

    #[test]
    fn test_untagged_items_form_their_own_group() {
        let catalog = vec![
            item("1", "Special", 7.00, &[]),
            item("2", "Burger", 10.00, &["meat"]),
        ];
        let selection = allocate(&catalog, 20.0);
        let names: Vec<&str> = selection.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Special", "Burger"]);
    }

    #[test]
    fn test_recommendation_explanation_and_total() {
        let catalog = vec![
            item("1", "Burger", 10.00, &["meat"]),
            item("2", "Salad", 4.50, &["veg"]),
        ];
        let rec = allocate_recommendation(&catalog, 20.0);
        assert_eq!(rec.recommended_items.len(), 2);
        assert_eq!(rec.total_price, 14.50);
        assert_eq!(rec.explanation, "2 items across 2 categories for $14.50");
    }

    #[test]
    fn test_recommendation_for_infeasible_budget() {
        let catalog = vec![item("1", "Burger", 10.00, &["meat"])];
        let rec = allocate_recommendation(&catalog, 1.0);
        assert!(rec.recommended_items.is_empty());
        assert_eq!(rec.total_price, 0.0);
        assert!(rec.explanation.contains("Nothing on the menu fits"));
    }
}
