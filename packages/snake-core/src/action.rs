//! User actions accepted by the shell.

use crate::types::{ConversationId, Message};
use crate::view::View;

/// A discrete user-triggered event.
///
/// Collaborators (auth page, sidebar, feature views) never mutate the shell
/// directly; they hand one of these to [`AppShell::dispatch`](crate::AppShell::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Auth
    LoginSucceeded,
    Logout,

    // Navigation
    Navigate(View),
    NewChat,
    /// Filter the history view; an empty query shows everything
    SearchHistory(String),

    // Conversation management
    SelectConversation(ConversationId),
    DeleteConversation(ConversationId),
    AppendMessage {
        conversation_id: ConversationId,
        message: Message,
    },
    SetTitle {
        conversation_id: ConversationId,
        title: String,
    },

    // Persona
    SetPersona(String),
}

impl Action {
    /// Whether the action may run while nobody is logged in.
    pub fn allowed_logged_out(&self) -> bool {
        matches!(self, Action::LoginSucceeded)
    }
}
