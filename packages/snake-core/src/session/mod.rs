//! Conversation lifecycle: the session store, its id generator and the
//! invalidation hook into the generative backend.

mod ids;
mod invalidator;
mod store;

pub use ids::IdGenerator;
pub use invalidator::{NoopInvalidator, SessionInvalidator};
pub use store::{search_conversations, Deletion, SessionStore, SessionTemplates};
