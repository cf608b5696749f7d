//! Budget recommendation with deterministic fallback.

use tavola_core::allocator::allocate_recommendation;
use tavola_core::error::Result;
use tavola_core::menu::{BudgetRecommendation, MenuCatalog};
use tavola_core::session::RecommendationGateway;
use tracing::{debug, warn};

/// Resolves a budget recommendation: the precomputed bucket store first,
/// the deterministic allocator when the store has no entry.
///
/// A bucket miss (`Ok(None)` or an upstream 404) falls back to
/// [`allocate_recommendation`]; any other gateway failure propagates so
/// the host can show its retry banner.
pub async fn recommend_for_budget(
    gateway: &dyn RecommendationGateway,
    catalog: &MenuCatalog,
    budget: f64,
) -> Result<BudgetRecommendation> {
    match gateway.budget_lookup(budget).await {
        Ok(Some(recommendation)) => Ok(recommendation),
        Ok(None) => {
            debug!(budget, "bucket miss; using deterministic allocation");
            Ok(allocate_recommendation(&catalog.items, budget))
        }
        Err(err) if err.has_status(404) => {
            debug!(budget, "bucket lookup returned 404; using deterministic allocation");
            Ok(allocate_recommendation(&catalog.items, budget))
        }
        Err(err) => {
            warn!(budget, error = %err, "budget lookup failed");
            Err(err)
        }
    }
}
