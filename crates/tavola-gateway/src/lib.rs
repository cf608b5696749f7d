//! Tavola gateway: HTTP infrastructure for the ordering core.
//!
//! Implements [`tavola_core::session::RecommendationGateway`] over the
//! host platform's HTTP endpoints, renders the free-text prompt
//! contract, and orchestrates the bucket-store → deterministic-allocator
//! fallback for budget recommendations.

pub mod client;
pub mod fallback;
pub mod prompt;

pub use client::{HttpRecommendationGateway, bucket_for};
pub use fallback::recommend_for_budget;
