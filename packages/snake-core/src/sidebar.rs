//! Navigation sidebar contract.
//!
//! The sidebar itself is an external component; the shell hands it these
//! props and receives [`Action::Navigate`](crate::Action::Navigate),
//! [`Action::NewChat`](crate::Action::NewChat) and
//! [`Action::Logout`](crate::Action::Logout) back.

use serde::Serialize;

use crate::i18n::I18n;
use crate::types::User;
use crate::view::View;

/// A single navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub view: View,
    pub label: String,
    pub active: bool,
}

/// Everything the sidebar needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarProps {
    pub current_view: View,
    pub user: User,
    pub new_chat_label: String,
    pub logout_label: String,
    pub items: Vec<NavItem>,
}

impl SidebarProps {
    pub fn new(current_view: View, user: User, i18n: &I18n) -> Self {
        let items = View::all()
            .map(|view| NavItem {
                view,
                label: i18n.view_label(view),
                active: view == current_view,
            })
            .collect();

        Self {
            current_view,
            user,
            new_chat_label: i18n.t("sidebar.new_chat"),
            logout_label: i18n.t("sidebar.logout"),
            items,
        }
    }

    /// The highlighted entry.
    pub fn active_item(&self) -> Option<&NavItem> {
        self.items.iter().find(|item| item.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_active_item() {
        let props = SidebarProps::new(
            View::Travel,
            User::new("Demo User", "demo@snakeengine.ai"),
            &I18n::default(),
        );

        assert_eq!(props.items.iter().filter(|i| i.active).count(), 1);
        let active = props.active_item().unwrap();
        assert_eq!(active.view, View::Travel);
        assert_eq!(active.label, "Travel Planner");
    }

    #[test]
    fn test_lists_every_view_in_order() {
        let props = SidebarProps::new(
            View::Chat,
            User::new("Demo User", "demo@snakeengine.ai"),
            &I18n::default(),
        );

        let views: Vec<View> = props.items.iter().map(|i| i.view).collect();
        assert_eq!(views, View::all().collect::<Vec<_>>());
        assert_eq!(props.new_chat_label, "New Chat");
    }
}
