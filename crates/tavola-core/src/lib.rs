//! Tavola core: the conversational ordering domain.
//!
//! This crate holds the pure logic of the ordering pipeline - menu
//! types, the deterministic budget allocator, the order-envelope
//! extractor, the cart aggregator, and the chat session state machine -
//! plus the [`RecommendationGateway`](session::RecommendationGateway)
//! trait the infrastructure layer implements. It has no HTTP
//! dependency; see `tavola-gateway` for the reqwest clients.

pub mod allocator;
pub mod config;
pub mod error;
pub mod extractor;
pub mod menu;
pub mod order;
pub mod session;

// Re-export common error type
pub use error::TavolaError;
