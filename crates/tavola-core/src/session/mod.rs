//! Session domain module.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `ChatMessage`)
//! - `model`: Core session state (`ChatSession`)
//! - `machine`: The turn driver (`submit_message`, `TurnOutcome`)
//! - `gateway`: The `RecommendationGateway` trait implemented by the
//!   infrastructure layer

mod gateway;
mod machine;
mod message;
mod model;

// Re-export public API
pub use gateway::RecommendationGateway;
pub use machine::TurnOutcome;
pub use message::{ChatMessage, MessageRole};
pub use model::ChatSession;
