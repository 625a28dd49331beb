//! Hook into the generative backend's per-conversation session cache.

use crate::types::ConversationId;

/// Receives a signal whenever cached conversational state for a
/// conversation must be discarded before the next exchange.
pub trait SessionInvalidator {
    fn invalidate_session(&mut self, conversation_id: &ConversationId);
}

/// Invalidator for hosts without a session cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInvalidator;

impl SessionInvalidator for NoopInvalidator {
    fn invalidate_session(&mut self, conversation_id: &ConversationId) {
        tracing::trace!("No session cache to invalidate for {}", conversation_id);
    }
}

impl<F> SessionInvalidator for F
where
    F: FnMut(&ConversationId),
{
    fn invalidate_session(&mut self, conversation_id: &ConversationId) {
        self(conversation_id)
    }
}
