//! Recommendation gateway trait.
//!
//! Defines the seam between the session core and whatever produces
//! recommendations upstream. The core never interprets transport
//! details; implementations surface every failure as a typed
//! [`TavolaError::Gateway`](crate::error::TavolaError) instead of
//! leaking their own error types across the boundary.

use crate::error::Result;
use crate::menu::{BudgetRecommendation, MenuCatalog};
use crate::session::ChatMessage;
use async_trait::async_trait;

/// An abstract gateway for obtaining recommendations.
///
/// Two retrieval modes exist, selected by the caller:
/// - free-text mode ([`chat`](Self::chat)): the full message history and
///   the catalog go to a text-completion service; the raw reply comes
///   back uninterpreted (the extractor decides whether it is an order);
/// - budget-bucket mode ([`budget_lookup`](Self::budget_lookup)): a
///   numeric budget resolves to a precomputed recommendation, or to
///   `None` when the store has no entry for that bucket, at which point
///   the caller falls back to the deterministic allocator.
#[async_trait]
pub trait RecommendationGateway: Send + Sync {
    /// Sends the conversation and catalog upstream and returns the raw
    /// assistant reply.
    ///
    /// A timeout is the implementation's responsibility and must surface
    /// as a gateway error like any other transport failure.
    async fn chat(&self, messages: &[ChatMessage], catalog: &MenuCatalog) -> Result<String>;

    /// Looks up the precomputed recommendation for the bucket containing
    /// `budget`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(recommendation))`: the store has an entry for the bucket
    /// - `Ok(None)`: no bucket entry exists
    /// - `Err(_)`: transport or upstream failure
    async fn budget_lookup(&self, budget: f64) -> Result<Option<BudgetRecommendation>>;
}
