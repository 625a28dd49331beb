//! Stand-in generative backend.
//!
//! Replies by echoing the user's text and keeps a per-conversation turn
//! counter as its "session". Persona changes drop that session.

use snake_core::{ConversationId, SessionInvalidator};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct EchoBackend {
    turns: HashMap<ConversationId, u32>,
}

impl EchoBackend {
    /// Produce a reply and advance the conversation's session.
    pub fn reply(&mut self, conversation_id: &ConversationId, persona: Option<&str>, text: &str) -> String {
        let turn = self.turns.entry(conversation_id.clone()).or_insert(0);
        *turn += 1;
        match persona {
            Some(persona) => format!("[{persona}] (turn {turn}) You said: {text}"),
            None => format!("(turn {turn}) You said: {text}"),
        }
    }

    pub fn turns(&self, conversation_id: &ConversationId) -> u32 {
        self.turns.get(conversation_id).copied().unwrap_or(0)
    }
}

/// Shared handle so the shell can invalidate while the host keeps replying.
#[derive(Debug, Clone, Default)]
pub struct EchoHandle(Rc<RefCell<EchoBackend>>);

impl EchoHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, conversation_id: &ConversationId, persona: Option<&str>, text: &str) -> String {
        self.0.borrow_mut().reply(conversation_id, persona, text)
    }

    pub fn turns(&self, conversation_id: &ConversationId) -> u32 {
        self.0.borrow().turns(conversation_id)
    }
}

impl SessionInvalidator for EchoHandle {
    fn invalidate_session(&mut self, conversation_id: &ConversationId) {
        if self.0.borrow_mut().turns.remove(conversation_id).is_some() {
            tracing::debug!("Echo session dropped for {}", conversation_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::{Action, AppShell};

    #[test]
    fn test_turns_count_per_conversation() {
        let handle = EchoHandle::new();
        let a = ConversationId::new("a");
        let b = ConversationId::new("b");

        handle.reply(&a, None, "one");
        let reply = handle.reply(&a, None, "two");
        handle.reply(&b, Some("Pirate"), "hi");

        assert_eq!(reply, "(turn 2) You said: two");
        assert_eq!(handle.turns(&a), 2);
        assert_eq!(handle.turns(&b), 1);
    }

    #[test]
    fn test_persona_change_resets_session() {
        let handle = EchoHandle::new();
        let mut shell = AppShell::default().with_invalidator(handle.clone());
        shell.dispatch(Action::LoginSucceeded);
        let id = ConversationId::new("1");

        handle.reply(&id, None, "hello");
        assert_eq!(handle.turns(&id), 1);

        shell.dispatch(Action::SetPersona("Pirate".to_string()));
        assert_eq!(handle.turns(&id), 0);
        assert_eq!(
            handle.reply(&id, Some("Pirate"), "ahoy"),
            "[Pirate] (turn 1) You said: ahoy"
        );
    }
}
