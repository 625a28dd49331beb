//! View routing: from a [`View`] tag to the feature view that renders it.
//!
//! Feature views are opaque to the shell. Each one is registered once per
//! tag and receives a [`ViewProps`] bundle derived from the session store.
//! Views that change shell state do so by returning actions to the host,
//! which feeds them to [`AppShell::dispatch`](crate::AppShell::dispatch).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::session::{search_conversations, SessionStore};
use crate::types::{Conversation, ConversationId};
use crate::view::View;
use crate::{Error, Result};

/// Props for the chat view.
///
/// Messages are appended and titles set via
/// [`Action::AppendMessage`](crate::Action::AppendMessage) and
/// [`Action::SetTitle`](crate::Action::SetTitle).
#[derive(Debug, Clone, Copy)]
pub struct ChatProps<'a> {
    pub conversations: &'a [Arc<Conversation>],
    pub active_conversation_id: Option<&'a ConversationId>,
    pub active_conversation: Option<&'a Arc<Conversation>>,
}

/// Props for the conversation history view.
///
/// Selection, deletion and new chats go through
/// [`Action::SelectConversation`](crate::Action::SelectConversation),
/// [`Action::DeleteConversation`](crate::Action::DeleteConversation) and
/// [`Action::NewChat`](crate::Action::NewChat).
#[derive(Debug, Clone, Copy)]
pub struct HistoryProps<'a> {
    pub conversations: &'a [Arc<Conversation>],
    pub active_conversation_id: Option<&'a ConversationId>,
    /// Current search box contents, empty when not filtering
    pub query: &'a str,
}

impl<'a> HistoryProps<'a> {
    /// Conversations matching the search box, newest first.
    pub fn visible(&self) -> Vec<&'a Arc<Conversation>> {
        search_conversations(self.conversations, self.query)
    }
}

/// Props for the persona hub; personas are applied with
/// [`Action::SetPersona`](crate::Action::SetPersona).
#[derive(Debug, Clone, Copy)]
pub struct PersonaProps<'a> {
    pub active_conversation_id: Option<&'a ConversationId>,
    pub current_persona: Option<&'a str>,
}

/// Contextual props handed to a feature view.
#[derive(Debug, Clone, Copy)]
pub enum ViewProps<'a> {
    Chat(ChatProps<'a>),
    History(HistoryProps<'a>),
    Persona(PersonaProps<'a>),
    /// Self-contained view, no props beyond its own tag
    Standalone(View),
}

impl<'a> ViewProps<'a> {
    /// Derive the props `view` needs from the store.
    pub fn for_view(view: View, store: &'a SessionStore) -> Self {
        let active_conversation_id = store.active_id();
        let active_conversation = active_conversation_id.and_then(|id| store.get(id));

        match view {
            View::Chat => ViewProps::Chat(ChatProps {
                conversations: store.conversations(),
                active_conversation_id,
                active_conversation,
            }),
            View::History => ViewProps::History(HistoryProps {
                conversations: store.conversations(),
                active_conversation_id,
                query: store.history_query(),
            }),
            View::Persona => ViewProps::Persona(PersonaProps {
                active_conversation_id,
                current_persona: active_conversation.and_then(|c| c.persona.as_deref()),
            }),
            View::Dashboard
            | View::ImageGen
            | View::VideoGen
            | View::Templates
            | View::Search
            | View::Discover
            | View::Excel
            | View::Settings
            | View::Subscription
            | View::Help
            | View::Audio
            | View::Code
            | View::Writer
            | View::Community
            | View::Creators
            | View::Admin
            | View::Trending
            | View::Document
            | View::Music
            | View::Website
            | View::Presentation
            | View::Email
            | View::Live
            | View::Idea
            | View::Translator
            | View::Podcast
            | View::Social
            | View::Fitness
            | View::Travel
            | View::Game
            | View::Leaderboard
            | View::Challenges
            | View::Financial
            | View::Health
            | View::Stylist => ViewProps::Standalone(view),
        }
    }

    /// The view these props were derived for.
    pub fn view(&self) -> View {
        match self {
            ViewProps::Chat(_) => View::Chat,
            ViewProps::History(_) => View::History,
            ViewProps::Persona(_) => View::Persona,
            ViewProps::Standalone(view) => *view,
        }
    }
}

/// A feature panel the host knows how to render into `R`.
pub trait FeatureView<R> {
    fn render(&self, props: ViewProps<'_>) -> R;
}

impl<R, F> FeatureView<R> for F
where
    F: Fn(ViewProps<'_>) -> R,
{
    fn render(&self, props: ViewProps<'_>) -> R {
        self(props)
    }
}

/// Total mapping from every [`View`] to a registered feature view.
pub struct ViewRouter<R> {
    chat: Box<dyn FeatureView<R>>,
    views: HashMap<View, Box<dyn FeatureView<R>>>,
}

impl<R> ViewRouter<R> {
    pub fn builder() -> ViewRouterBuilder<R> {
        ViewRouterBuilder::new()
    }

    fn view_for(&self, view: View) -> &dyn FeatureView<R> {
        match self.views.get(&view) {
            Some(found) => &**found,
            None => &*self.chat,
        }
    }

    /// Render `view` with props derived from `store`.
    pub fn route(&self, view: View, store: &SessionStore) -> R {
        self.view_for(view).render(ViewProps::for_view(view, store))
    }

    /// Render a raw tag; unknown tags render the chat view.
    pub fn route_tag(&self, tag: &str, store: &SessionStore) -> R {
        self.route(View::parse_or_default(tag), store)
    }
}

impl<R> fmt::Debug for ViewRouter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRouter")
            .field("views", &(self.views.len() + 1))
            .finish()
    }
}

/// Collects one feature view per tag before building a [`ViewRouter`].
pub struct ViewRouterBuilder<R> {
    views: HashMap<View, Box<dyn FeatureView<R>>>,
}

impl<R> ViewRouterBuilder<R> {
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Register the view for `tag`, replacing any earlier registration.
    pub fn view<V>(mut self, tag: View, view: V) -> Self
    where
        V: FeatureView<R> + 'static,
    {
        if self.views.insert(tag, Box::new(view)).is_some() {
            tracing::debug!("View {} registered twice, keeping the latest", tag);
        }
        self
    }

    /// Register `make(tag)` for every tag that has no view yet.
    pub fn remaining<F, V>(mut self, mut make: F) -> Self
    where
        F: FnMut(View) -> V,
        V: FeatureView<R> + 'static,
    {
        for tag in View::all() {
            if !self.views.contains_key(&tag) {
                self.views.insert(tag, Box::new(make(tag)));
            }
        }
        self
    }

    /// Tags that still lack a view.
    pub fn missing(&self) -> Vec<View> {
        View::all().filter(|v| !self.views.contains_key(v)).collect()
    }

    /// Finish the router. Fails unless every tag has a view.
    pub fn build(mut self) -> Result<ViewRouter<R>> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(Error::UnroutedViews(missing));
        }
        match self.views.remove(&View::Chat) {
            Some(chat) => Ok(ViewRouter {
                chat,
                views: self.views,
            }),
            None => Err(Error::UnroutedViews(vec![View::Chat])),
        }
    }
}

impl<R> Default for ViewRouterBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
