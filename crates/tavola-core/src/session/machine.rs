//! The session turn driver.
//!
//! A session alternates between two states: idle and awaiting a reply.
//! [`ChatSession::submit_message`] is the only transition that touches
//! the gateway; everything else is bookkeeping. Failure never leaves a
//! half-applied turn: the user message is staged, not committed, until
//! the gateway reply arrives, so a transport error leaves the history
//! and cart exactly as they were before the call.

use crate::extractor::{Extraction, extract};
use crate::menu::MenuCatalog;
use crate::session::gateway::RecommendationGateway;
use crate::session::message::ChatMessage;
use crate::session::model::ChatSession;
use tracing::{debug, warn};

/// User-visible message for transport-level failures. Parsing failures
/// never surface here; they degrade to showing the raw reply.
const GATEWAY_ERROR_MESSAGE: &str =
    "Something went wrong getting a recommendation. Please try again.";

/// The result of one call to [`ChatSession::submit_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The submission was ignored (blank text, or a turn already in
    /// flight). No state changed.
    Rejected,
    /// The exchange completed; `order_detected` says whether the reply
    /// carried an order envelope that was folded into the cart.
    Completed { order_detected: bool },
    /// The gateway call failed; `error` is set and history/cart are
    /// untouched.
    Failed,
}

impl ChatSession {
    /// Runs one conversational turn.
    ///
    /// Behavior:
    /// - blank (after trim) text is a no-op;
    /// - a submission while a turn is in flight is rejected, not queued,
    ///   so cart merges can never interleave out of request order;
    /// - on success the user and assistant messages are appended, the
    ///   reply is inspected for an order envelope, and any order is
    ///   merged into the cart;
    /// - on failure the session keeps its prior messages and cart, the
    ///   draft is restored for retry, and a generic error is exposed;
    /// - `loading` is cleared and `is_chat_view` latched on both paths.
    pub async fn submit_message(
        &mut self,
        gateway: &dyn RecommendationGateway,
        catalog: &MenuCatalog,
        text: &str,
    ) -> TurnOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!(session_id = %self.id, "ignoring blank submission");
            return TurnOutcome::Rejected;
        }
        if self.loading {
            warn!(session_id = %self.id, "rejecting submission while a turn is in flight");
            return TurnOutcome::Rejected;
        }

        self.loading = true;
        self.error = None;
        self.input.clear();

        // Staged, not yet committed: the gateway sees the prospective
        // history, but a failure must leave `messages` untouched.
        let user_message = ChatMessage::user(trimmed);
        let mut history = self.messages.clone();
        history.push(user_message.clone());

        debug!(session_id = %self.id, turns = history.len(), "requesting recommendation");
        let outcome = match gateway.chat(&history, catalog).await {
            Ok(reply) => {
                self.messages.push(user_message);
                let extraction = extract(&reply);
                self.messages.push(ChatMessage::assistant(reply));

                let order_detected = match extraction {
                    Extraction::Order(envelope) => {
                        debug!(
                            session_id = %self.id,
                            items = envelope.menu_items.len(),
                            "merging order envelope into cart"
                        );
                        self.cart.merge(envelope.order_items());
                        true
                    }
                    Extraction::NotAnOrder => false,
                };
                TurnOutcome::Completed { order_detected }
            }
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "gateway call failed");
                self.error = Some(GATEWAY_ERROR_MESSAGE.to_string());
                self.input = trimmed.to_string();
                TurnOutcome::Failed
            }
        };

        // The "finally" step: runs on both paths.
        self.loading = false;
        self.is_chat_view = true;
        self.touch();

        outcome
    }
}
