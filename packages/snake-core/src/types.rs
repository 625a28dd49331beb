//! Core data types for the SnakeEngine shell.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a conversation, unique within a [`SessionStore`](crate::SessionStore).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ConversationId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConversationId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique within the owning conversation
    pub id: String,
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn new(id: impl Into<String>, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sender,
            text: text.into(),
        }
    }

    /// Create a message authored by the AI.
    pub fn ai(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, Sender::Ai, text)
    }

    /// Create a message authored by the user.
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, Sender::User, text)
    }
}

/// A titled, ordered thread of messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    /// Messages in display order (oldest first)
    pub messages: Vec<Message>,
    /// Behavioral description applied to the AI for this conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
}

impl Conversation {
    pub fn new(id: ConversationId, title: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            id,
            title: title.into(),
            messages,
            persona: None,
        }
    }

    /// Id for the next message appended to this conversation.
    ///
    /// Ids take the form `<conversation>-<n>` and never repeat within the
    /// conversation, even after messages were produced elsewhere.
    pub fn next_message_id(&self) -> String {
        let mut n = self.messages.len() + 1;
        loop {
            let candidate = format!("{}-{}", self.id, n);
            if !self.messages.iter().any(|m| m.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_message_id_follows_length() {
        let conversation = Conversation::new(
            ConversationId::new("1"),
            "SnakeEngine.AI",
            vec![Message::ai("1-1", "Hello")],
        );

        assert_eq!(conversation.next_message_id(), "1-2");
    }

    #[test]
    fn test_next_message_id_skips_taken_ids() {
        let conversation = Conversation::new(
            ConversationId::new("7"),
            "SnakeEngine.AI",
            vec![Message::ai("7-2", "Hi")],
        );

        assert_eq!(conversation.next_message_id(), "7-3");
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let message = Message::ai("1-1", "Hello");
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["sender"], "ai");
        assert_eq!(json["id"], "1-1");
    }

    #[test]
    fn test_conversation_id_compares_with_str() {
        let id = ConversationId::from("42");
        assert_eq!(id, "42");
        assert_eq!(id.to_string(), "42");
    }
}
