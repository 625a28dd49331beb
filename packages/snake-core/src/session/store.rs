//! Authoritative conversation collection and active pointer.

use std::sync::Arc;

use super::ids::IdGenerator;
use crate::types::{Conversation, ConversationId, Message};

/// Texts the store stamps onto conversations it creates or updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTemplates {
    /// Title given to every new conversation; `set_title` refuses to write it
    pub default_title: String,
    /// First AI message of a new conversation
    pub greeting: String,
    /// Announcement appended on persona change, `{persona}` is substituted
    pub persona_announcement: String,
}

impl Default for SessionTemplates {
    fn default() -> Self {
        Self {
            default_title: "SnakeEngine.AI".to_string(),
            greeting: "Hello! I am SnakeEngine.AI. How can I assist you?".to_string(),
            persona_announcement: "Persona set! I am now: {persona}".to_string(),
        }
    }
}

/// Outcome of [`SessionStore::delete_conversation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    /// No conversation had that id
    NotFound,
    /// A non-active conversation was removed; the active pointer is untouched
    Removed,
    /// The active conversation was removed and the pointer moved to `next`
    RemovedActive { next: ConversationId },
    /// The active conversation was removed and nothing remains
    RemovedLast,
}

impl Deletion {
    pub fn removed(&self) -> bool {
        !matches!(self, Deletion::NotFound)
    }
}

/// Ordered conversation collection, newest first.
///
/// Conversations are shared behind `Arc`: an update replaces only the
/// target's pointer, every other entry keeps its identity.
/// The active id always refers to a conversation in the collection.
#[derive(Debug, Clone)]
pub struct SessionStore {
    conversations: Vec<Arc<Conversation>>,
    active_id: Option<ConversationId>,
    templates: SessionTemplates,
    ids: IdGenerator,
    revision: u64,
    history_query: String,
}

impl SessionStore {
    /// Empty store with no active conversation.
    pub fn new(templates: SessionTemplates) -> Self {
        Self {
            conversations: Vec::new(),
            active_id: None,
            templates,
            ids: IdGenerator::new(),
            revision: 0,
            history_query: String::new(),
        }
    }

    /// Store seeded with a single conversation, which becomes active.
    pub fn with_seed(templates: SessionTemplates, seed: Conversation) -> Self {
        let mut store = Self::new(templates);
        store.active_id = Some(seed.id.clone());
        store.conversations.push(Arc::new(seed));
        store
    }

    pub fn templates(&self) -> &SessionTemplates {
        &self.templates
    }

    /// All conversations, newest first.
    pub fn conversations(&self) -> &[Arc<Conversation>] {
        &self.conversations
    }

    pub fn get(&self, id: &ConversationId) -> Option<&Arc<Conversation>> {
        self.conversations.iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &ConversationId) -> bool {
        self.get(id).is_some()
    }

    pub fn active_id(&self) -> Option<&ConversationId> {
        self.active_id.as_ref()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Counter bumped by every state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn position(&self, id: &ConversationId) -> Option<usize> {
        self.conversations.iter().position(|c| &c.id == id)
    }

    fn fresh_id(&mut self) -> ConversationId {
        loop {
            let id = ConversationId::new(self.ids.next());
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Prepend a new conversation with the default title and greeting and
    /// make it active.
    pub fn create_conversation(&mut self) -> ConversationId {
        let id = self.fresh_id();
        let greeting = Message::ai(format!("{}-1", id), self.templates.greeting.clone());
        let conversation = Conversation::new(
            id.clone(),
            self.templates.default_title.clone(),
            vec![greeting],
        );

        self.conversations.insert(0, Arc::new(conversation));
        self.active_id = Some(id.clone());
        self.bump();
        tracing::debug!("Conversation created: {}", id);
        id
    }

    /// Make `id` active. Returns `false` and leaves the pointer alone when
    /// no such conversation exists.
    pub fn select_conversation(&mut self, id: &ConversationId) -> bool {
        if !self.contains(id) {
            tracing::warn!("Ignoring selection of unknown conversation {}", id);
            return false;
        }
        if self.active_id.as_ref() != Some(id) {
            self.active_id = Some(id.clone());
            self.bump();
        }
        tracing::debug!("Conversation selected: {}", id);
        true
    }

    /// Remove `id`, repairing the active pointer in the same step.
    pub fn delete_conversation(&mut self, id: &ConversationId) -> Deletion {
        let Some(index) = self.position(id) else {
            return Deletion::NotFound;
        };

        self.conversations.remove(index);
        self.bump();
        tracing::debug!("Conversation deleted: {}", id);

        if self.active_id.as_ref() != Some(id) {
            return Deletion::Removed;
        }

        match self.conversations.first() {
            Some(next) => {
                let next = next.id.clone();
                self.active_id = Some(next.clone());
                Deletion::RemovedActive { next }
            }
            None => {
                self.active_id = None;
                Deletion::RemovedLast
            }
        }
    }

    /// Replace the message sequence of `id` with `transform(messages)`.
    ///
    /// Only the target conversation's pointer changes. Returns `false` when
    /// the id is unknown.
    pub fn update_messages<F>(&mut self, id: &ConversationId, transform: F) -> bool
    where
        F: FnOnce(&[Message]) -> Vec<Message>,
    {
        let Some(index) = self.position(id) else {
            tracing::debug!("Message update for unknown conversation {} dropped", id);
            return false;
        };

        let current = &self.conversations[index];
        let updated = Conversation {
            messages: transform(&current.messages),
            ..Conversation::clone(current)
        };
        self.conversations[index] = Arc::new(updated);
        self.bump();
        true
    }

    /// Append one message to `id`.
    pub fn append_message(&mut self, id: &ConversationId, message: Message) -> bool {
        self.update_messages(id, move |messages| {
            let mut next = messages.to_vec();
            next.push(message);
            next
        })
    }

    /// Rename `id`. Writing the default title is refused, as is an unknown id.
    pub fn set_title(&mut self, id: &ConversationId, title: &str) -> bool {
        if title == self.templates.default_title {
            return false;
        }
        let Some(index) = self.position(id) else {
            return false;
        };

        let updated = Conversation {
            title: title.to_string(),
            ..Conversation::clone(&self.conversations[index])
        };
        self.conversations[index] = Arc::new(updated);
        self.bump();
        tracing::debug!("Conversation {} renamed", id);
        true
    }

    /// Record `persona` on `id` and append the announcement message.
    pub fn set_persona(&mut self, id: &ConversationId, persona: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let current = &self.conversations[index];
        let mut updated = Conversation::clone(current);
        updated.persona = Some(persona.to_string());
        let text = self
            .templates
            .persona_announcement
            .replace("{persona}", persona);
        updated.messages.push(Message::ai(updated.next_message_id(), text));

        self.conversations[index] = Arc::new(updated);
        self.bump();
        tracing::debug!("Persona set on {}: {}", id, persona);
        true
    }

    /// Filter applied by the history view; empty means everything.
    pub fn history_query(&self) -> &str {
        &self.history_query
    }

    pub fn set_history_query(&mut self, query: &str) -> bool {
        let query = query.trim();
        if self.history_query == query {
            return false;
        }
        self.history_query = query.to_string();
        self.bump();
        tracing::debug!("History query set to {:?}", self.history_query);
        true
    }
}

/// Conversations whose title or id contains `query`, ignoring case.
pub fn search_conversations<'a>(
    conversations: &'a [Arc<Conversation>],
    query: &str,
) -> Vec<&'a Arc<Conversation>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return conversations.iter().collect();
    }
    conversations
        .iter()
        .filter(|c| {
            c.title.to_lowercase().contains(&query)
                || c.id.as_str().to_lowercase().contains(&query)
        })
        .collect()
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionTemplates::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sender;
    use std::collections::HashSet;

    fn seed() -> Conversation {
        Conversation::new(
            ConversationId::new("1"),
            "SnakeEngine.AI",
            vec![Message::ai(
                "1-1",
                "Hello! I am SnakeEngine.AI. How can I help you today?",
            )],
        )
    }

    fn seeded_store() -> SessionStore {
        SessionStore::with_seed(SessionTemplates::default(), seed())
    }

    fn ids(store: &SessionStore) -> Vec<String> {
        store
            .conversations()
            .iter()
            .map(|c| c.id.to_string())
            .collect()
    }

    #[test]
    fn test_create_prepends_and_activates() {
        let mut store = seeded_store();
        let id = store.create_conversation();

        assert_eq!(store.len(), 2);
        assert_eq!(store.conversations()[0].id, id);
        assert_eq!(store.active_id(), Some(&id));

        let created = store.get(&id).unwrap();
        assert_eq!(created.title, "SnakeEngine.AI");
        assert_eq!(created.messages.len(), 1);
        assert_eq!(created.messages[0].sender, Sender::Ai);
        assert_eq!(created.messages[0].id, format!("{}-1", id));
    }

    #[test]
    fn test_created_ids_are_unique_and_reverse_ordered() {
        let mut store = SessionStore::default();
        let created: Vec<ConversationId> = (0..50).map(|_| store.create_conversation()).collect();

        let unique: HashSet<&ConversationId> = created.iter().collect();
        assert_eq!(unique.len(), created.len());

        let expected: Vec<String> = created.iter().rev().map(|id| id.to_string()).collect();
        assert_eq!(ids(&store), expected);
    }

    #[test]
    fn test_select_existing() {
        let mut store = seeded_store();
        store.create_conversation();

        assert!(store.select_conversation(&ConversationId::new("1")));
        assert_eq!(store.active_id(), Some(&ConversationId::new("1")));
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut store = seeded_store();
        let before = store.revision();

        assert!(!store.select_conversation(&ConversationId::new("missing")));
        assert_eq!(store.active_id(), Some(&ConversationId::new("1")));
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_delete_non_active_keeps_active() {
        let mut store = seeded_store();
        let new_id = store.create_conversation();

        let outcome = store.delete_conversation(&ConversationId::new("1"));
        assert_eq!(outcome, Deletion::Removed);
        assert_eq!(store.active_id(), Some(&new_id));
        assert_eq!(ids(&store), vec![new_id.to_string()]);
    }

    #[test]
    fn test_delete_active_moves_to_first_remaining() {
        let mut store = seeded_store();
        let second = store.create_conversation();
        let third = store.create_conversation();
        store.select_conversation(&second);

        let outcome = store.delete_conversation(&second);
        assert_eq!(
            outcome,
            Deletion::RemovedActive {
                next: third.clone()
            }
        );
        assert_eq!(store.active_id(), Some(&third));
    }

    #[test]
    fn test_delete_last_clears_active() {
        let mut store = seeded_store();

        let outcome = store.delete_conversation(&ConversationId::new("1"));
        assert_eq!(outcome, Deletion::RemovedLast);
        assert!(store.is_empty());
        assert_eq!(store.active_id(), None);
    }

    #[test]
    fn test_delete_unknown() {
        let mut store = seeded_store();
        let outcome = store.delete_conversation(&ConversationId::new("nope"));

        assert_eq!(outcome, Deletion::NotFound);
        assert!(!outcome.removed());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_append_preserves_other_conversations() {
        let mut store = seeded_store();
        let other = store.create_conversation();
        let untouched = Arc::clone(store.get(&other).unwrap());
        let seeded = ConversationId::new("1");

        assert!(store.append_message(&seeded, Message::user("1-2", "hi")));

        assert!(Arc::ptr_eq(store.get(&other).unwrap(), &untouched));
        assert_eq!(store.get(&seeded).unwrap().messages.len(), 2);
        assert_eq!(store.get(&seeded).unwrap().messages[1].text, "hi");
    }

    #[test]
    fn test_update_messages_unknown_is_noop() {
        let mut store = seeded_store();
        let before = store.revision();

        let changed = store.update_messages(&ConversationId::new("ghost"), |_| Vec::new());
        assert!(!changed);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_update_messages_applies_transform() {
        let mut store = seeded_store();
        let id = ConversationId::new("1");

        store.update_messages(&id, |messages| {
            messages
                .iter()
                .cloned()
                .chain([Message::user("1-2", "a"), Message::ai("1-3", "b")])
                .collect()
        });

        let texts: Vec<&str> = store
            .get(&id)
            .unwrap()
            .messages
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(&texts[1..], &["a", "b"]);
    }

    #[test]
    fn test_set_title_default_is_locked() {
        let mut store = seeded_store();
        let id = ConversationId::new("1");
        store.set_title(&id, "Trip ideas");
        let before = store.revision();

        assert!(!store.set_title(&id, "SnakeEngine.AI"));
        assert_eq!(store.get(&id).unwrap().title, "Trip ideas");
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_set_title_updates() {
        let mut store = seeded_store();
        let id = ConversationId::new("1");

        assert!(store.set_title(&id, "Groceries"));
        assert_eq!(store.get(&id).unwrap().title, "Groceries");
        assert!(!store.set_title(&ConversationId::new("x"), "Groceries"));
    }

    #[test]
    fn test_set_persona_records_and_announces() {
        let mut store = seeded_store();
        let id = ConversationId::new("1");

        assert!(store.set_persona(&id, "Pirate"));

        let conversation = store.get(&id).unwrap();
        assert_eq!(conversation.persona.as_deref(), Some("Pirate"));
        let last = conversation.last_message().unwrap();
        assert_eq!(last.sender, Sender::Ai);
        assert_eq!(last.text, "Persona set! I am now: Pirate");
        assert_eq!(last.id, "1-2");
    }

    #[test]
    fn test_set_persona_unknown_is_noop() {
        let mut store = seeded_store();
        assert!(!store.set_persona(&ConversationId::new("x"), "Pirate"));
    }

    #[test]
    fn test_search_matches_title_and_id() {
        let mut store = seeded_store();
        let other = store.create_conversation();
        store.set_title(&other, "Weekend trip");

        let all = store.conversations();
        assert_eq!(search_conversations(all, "").len(), 2);
        assert_eq!(search_conversations(all, "WEEKEND")[0].id, other);
        assert_eq!(search_conversations(all, " snake ").len(), 1);
        assert_eq!(search_conversations(all, other.as_str()).len(), 1);
        assert!(search_conversations(all, "zzz").is_empty());
    }

    #[test]
    fn test_history_query_is_trimmed_and_tracked() {
        let mut store = seeded_store();
        let before = store.revision();

        assert!(store.set_history_query("  trip "));
        assert_eq!(store.history_query(), "trip");
        assert!(!store.set_history_query("trip"));
        assert_eq!(store.revision(), before + 1);

        assert!(store.set_history_query(""));
        assert_eq!(store.history_query(), "");
    }
}
