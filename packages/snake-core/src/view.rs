//! Feature view identifiers.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// Feature panel shown in the main area of the shell.
///
/// The string form of each tag is its camelCase name (`imageGen`,
/// `videoGen`, ...). Anything outside this set resolves to [`View::Chat`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "camelCase", from = "String")]
#[strum(serialize_all = "camelCase")]
pub enum View {
    Dashboard,
    #[default]
    Chat,
    ImageGen,
    VideoGen,
    Templates,
    Search,
    Discover,
    Excel,
    Settings,
    Subscription,
    Help,
    Audio,
    Code,
    Writer,
    Community,
    Creators,
    Admin,
    Trending,
    History,
    Persona,
    Document,
    Music,
    Website,
    Presentation,
    Email,
    Live,
    Idea,
    Translator,
    Podcast,
    Social,
    Fitness,
    Travel,
    Game,
    Leaderboard,
    Challenges,
    Financial,
    Health,
    Stylist,
}

impl View {
    /// Resolve a raw tag, falling back to the chat view for unknown input.
    pub fn parse_or_default(tag: &str) -> Self {
        tag.trim().parse().unwrap_or_default()
    }

    /// Iterate every view in sidebar order.
    pub fn all() -> impl Iterator<Item = View> {
        View::iter()
    }

    /// The string tag of this view.
    pub fn tag(&self) -> &str {
        self.as_ref()
    }

    /// Catalog key for the human-readable label.
    pub fn label_key(&self) -> String {
        format!("view.{}", self.tag())
    }

}

impl From<String> for View {
    fn from(tag: String) -> Self {
        View::parse_or_default(&tag)
    }
}
