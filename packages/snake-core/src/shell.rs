//! Application shell: the single owner of all top-level state.
//!
//! The shell composes the auth gate, the session store and the current view.
//! Every state change runs synchronously through `&mut self`, so there is
//! exactly one writer at any time.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::action::Action;
use crate::auth::AuthGate;
use crate::config::ShellConfig;
use crate::i18n::I18n;
use crate::router::ViewRouter;
use crate::session::{Deletion, NoopInvalidator, SessionInvalidator, SessionStore, SessionTemplates};
use crate::sidebar::SidebarProps;
use crate::types::{Conversation, ConversationId, Message, User};
use crate::view::View;
use crate::Result;

/// Id of the conversation present at startup.
pub const SEED_CONVERSATION_ID: &str = "1";

/// Props for the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthProps {
    pub title: String,
    pub prompt: String,
}

/// What the host should put on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen<R> {
    /// Nobody is logged in; only the authentication collaborator is shown
    Auth(AuthProps),
    /// Sidebar plus the active feature view
    App { sidebar: SidebarProps, main: R },
}

/// Serializable view of the whole shell state.
#[derive(Debug, Clone, Serialize)]
pub struct ShellSnapshot {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub current_view: View,
    pub active_conversation_id: Option<ConversationId>,
    pub conversations: Vec<Conversation>,
}

/// Memo of the active conversation lookup.
#[derive(Debug, Default)]
struct ActiveMemo {
    key: Option<(u64, Option<ConversationId>)>,
    value: Option<Arc<Conversation>>,
}

/// Top-level application state.
pub struct AppShell {
    config: ShellConfig,
    i18n: I18n,
    auth: AuthGate,
    store: SessionStore,
    current_view: View,
    invalidator: Box<dyn SessionInvalidator>,
    active_memo: RefCell<ActiveMemo>,
}

impl AppShell {
    /// Shell with the seed conversation, logged out, showing the configured
    /// initial view.
    pub fn new(config: ShellConfig, i18n: I18n) -> Self {
        let name = config.product_name.clone();
        let templates = SessionTemplates {
            default_title: name.clone(),
            greeting: i18n.format("chat.greeting", &[("name", name.as_str())]),
            persona_announcement: i18n.t("persona.announcement"),
        };
        let seed = Conversation::new(
            ConversationId::new(SEED_CONVERSATION_ID),
            name.clone(),
            vec![Message::ai(
                format!("{}-1", SEED_CONVERSATION_ID),
                i18n.format("chat.seed_greeting", &[("name", name.as_str())]),
            )],
        );

        tracing::debug!("Application shell initialized");
        Self {
            current_view: config.initial_view,
            store: SessionStore::with_seed(templates, seed),
            auth: AuthGate::new(),
            invalidator: Box::new(NoopInvalidator),
            active_memo: RefCell::new(ActiveMemo::default()),
            config,
            i18n,
        }
    }

    /// Replace the generative-session collaborator.
    pub fn with_invalidator<I>(mut self, invalidator: I) -> Self
    where
        I: SessionInvalidator + 'static,
    {
        self.invalidator = Box::new(invalidator);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn conversations(&self) -> &[Arc<Conversation>] {
        self.store.conversations()
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth.is_logged_in()
    }

    pub fn user(&self) -> Option<&User> {
        self.auth.user()
    }

    pub fn active_conversation_id(&self) -> Option<&ConversationId> {
        self.store.active_id()
    }

    /// The active conversation, or `None` when nothing is selected.
    ///
    /// Cached on the store revision and the active id.
    pub fn active_conversation(&self) -> Option<Arc<Conversation>> {
        let key = (self.store.revision(), self.store.active_id().cloned());
        let mut memo = self.active_memo.borrow_mut();
        if memo.key.as_ref() == Some(&key) {
            tracing::trace!("Active conversation served from memo");
            return memo.value.clone();
        }

        let value = key.1.as_ref().and_then(|id| self.store.get(id)).cloned();
        memo.key = Some(key);
        memo.value = value.clone();
        value
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Admit the configured user after the auth collaborator reports success.
    pub fn login(&mut self) -> bool {
        self.auth.on_login_success(self.config.demo_user.clone())
    }

    /// Drop the user; conversations stay in memory.
    pub fn logout(&mut self) -> bool {
        self.auth.logout()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Change the active view.
    pub fn set_view(&mut self, view: View) -> bool {
        if self.current_view == view {
            return false;
        }
        tracing::debug!("View changed: {} -> {}", self.current_view, view);
        self.current_view = view;
        true
    }

    /// Change the active view from a raw tag; unknown tags select chat.
    pub fn set_view_tag(&mut self, tag: &str) -> bool {
        self.set_view(View::parse_or_default(tag))
    }

    /// Show the history view filtered by `query`.
    pub fn search_history(&mut self, query: &str) -> bool {
        let filtered = self.store.set_history_query(query);
        let navigated = self.set_view(View::History);
        filtered || navigated
    }

    // ========================================================================
    // Conversations
    // ========================================================================

    /// Start a new conversation and show it.
    pub fn new_chat(&mut self) -> ConversationId {
        let id = self.store.create_conversation();
        self.set_view(View::Chat);
        id
    }

    /// Show `id` in the chat view. Unknown ids change nothing.
    pub fn select_conversation(&mut self, id: &ConversationId) -> bool {
        if !self.store.select_conversation(id) {
            return false;
        }
        self.set_view(View::Chat);
        true
    }

    /// Delete `id`; removing the last conversation resets the view to chat.
    pub fn delete_conversation(&mut self, id: &ConversationId) -> Deletion {
        let outcome = self.store.delete_conversation(id);
        if outcome == Deletion::RemovedLast {
            self.set_view(View::Chat);
        }
        outcome
    }

    /// Rewrite the messages of `id` with `transform`.
    pub fn update_messages<F>(&mut self, id: &ConversationId, transform: F) -> bool
    where
        F: FnOnce(&[Message]) -> Vec<Message>,
    {
        self.store.update_messages(id, transform)
    }

    pub fn append_message(&mut self, id: &ConversationId, message: Message) -> bool {
        self.store.append_message(id, message)
    }

    pub fn set_title(&mut self, id: &ConversationId, title: &str) -> bool {
        self.store.set_title(id, title)
    }

    /// Apply `persona` to the active conversation.
    ///
    /// Cached backend state for the conversation is invalidated and the chat
    /// view is shown. Does nothing without an active conversation.
    pub fn set_persona(&mut self, persona: &str) -> bool {
        let Some(id) = self.store.active_id().cloned() else {
            tracing::debug!("Persona change ignored, no active conversation");
            return false;
        };
        if !self.store.set_persona(&id, persona) {
            return false;
        }
        self.invalidator.invalidate_session(&id);
        self.set_view(View::Chat);
        true
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Apply one user action. Returns whether any state changed.
    ///
    /// While logged out only [`Action::LoginSucceeded`] is accepted.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if !self.is_logged_in() && !action.allowed_logged_out() {
            tracing::warn!("Ignoring {:?} while logged out", action);
            return false;
        }

        match action {
            Action::LoginSucceeded => self.login(),
            Action::Logout => self.logout(),
            Action::Navigate(view) => self.set_view(view),
            Action::NewChat => {
                self.new_chat();
                true
            }
            Action::SearchHistory(query) => self.search_history(&query),
            Action::SelectConversation(id) => self.select_conversation(&id),
            Action::DeleteConversation(id) => self.delete_conversation(&id).removed(),
            Action::AppendMessage {
                conversation_id,
                message,
            } => self.append_message(&conversation_id, message),
            Action::SetTitle {
                conversation_id,
                title,
            } => self.set_title(&conversation_id, &title),
            Action::SetPersona(persona) => self.set_persona(&persona),
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Props for the navigation sidebar, present only while logged in.
    pub fn sidebar(&self) -> Option<SidebarProps> {
        self.auth
            .user()
            .map(|user| SidebarProps::new(self.current_view, user.clone(), &self.i18n))
    }

    /// Props for the authentication collaborator.
    pub fn auth_props(&self) -> AuthProps {
        AuthProps {
            title: self
                .i18n
                .format("auth.title", &[("name", self.config.product_name.as_str())]),
            prompt: self.i18n.t("auth.prompt"),
        }
    }

    /// Compose the screen: the auth page while logged out, otherwise the
    /// sidebar plus the routed feature view.
    pub fn render<R>(&self, router: &ViewRouter<R>) -> Screen<R> {
        match self.sidebar() {
            Some(sidebar) => Screen::App {
                sidebar,
                main: router.route(self.current_view, &self.store),
            },
            None => Screen::Auth(self.auth_props()),
        }
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            logged_in: self.is_logged_in(),
            user: self.user().cloned(),
            current_view: self.current_view,
            active_conversation_id: self.store.active_id().cloned(),
            conversations: self
                .store
                .conversations()
                .iter()
                .map(|c| Conversation::clone(c))
                .collect(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

impl Default for AppShell {
    fn default() -> Self {
        Self::new(ShellConfig::default(), I18n::default())
    }
}

impl fmt::Debug for AppShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppShell")
            .field("auth", &self.auth)
            .field("current_view", &self.current_view)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
