//! Snake Core - State core of the SnakeEngine.AI application shell.
//!
//! This crate owns everything the shell decides, leaving rendering to the host:
//!
//! - **Session store**: conversation lifecycle with a validated active pointer
//! - **View router**: total mapping from view tags to feature views
//! - **Auth gate**: logged-in / logged-out switch in front of the feature surface
//! - **Application shell**: composition root that dispatches user actions
//!
//! # Example
//!
//! ```rust
//! use snake_core::{Action, AppShell, Screen, View, ViewProps, ViewRouter};
//!
//! let router = ViewRouter::builder()
//!     .remaining(|_| |props: ViewProps<'_>| props.view())
//!     .build()
//!     .unwrap();
//!
//! let mut shell = AppShell::default();
//! assert!(matches!(shell.render(&router), Screen::Auth(_)));
//!
//! shell.dispatch(Action::LoginSucceeded);
//! shell.dispatch(Action::NewChat);
//! assert_eq!(shell.conversations().len(), 2);
//! assert!(matches!(shell.render(&router), Screen::App { main: View::Chat, .. }));
//! ```

pub mod action;
pub mod auth;
pub mod config;
pub mod i18n;
pub mod router;
pub mod session;
pub mod shell;
pub mod sidebar;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use action::Action;
pub use auth::AuthGate;
pub use config::ShellConfig;
pub use i18n::I18n;
pub use router::{ChatProps, FeatureView, HistoryProps, PersonaProps, ViewProps, ViewRouter};
pub use session::{Deletion, NoopInvalidator, SessionInvalidator, SessionStore, SessionTemplates};
pub use shell::{AppShell, AuthProps, Screen, ShellSnapshot};
pub use sidebar::{NavItem, SidebarProps};
pub use types::{Conversation, ConversationId, Message, Sender, User};
pub use view::View;

/// Error types for snake-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("No feature view registered for: {0:?}")]
    UnroutedViews(Vec<View>),
}

/// Result type for snake-core operations.
pub type Result<T> = std::result::Result<T, Error>;
