//! Overflow action menu.

use crate::Strings;

/// Navigation destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Settings screen.
    Settings,
    /// About screen.
    About,
}

/// A visible menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Destination on selection.
    pub route: Route,
    /// Entry text.
    pub label: String,
}

/// Open/closed overflow menu with a fixed set of navigation entries.
///
/// The settings entry is only offered in debug builds; the flag is injected
/// through [`crate::ScreenConfig::debug_menu`].
#[derive(Debug, Clone, Default)]
pub struct ActionMenu {
    open: bool,
    show_settings: bool,
}

impl ActionMenu {
    /// Create a closed menu.
    pub fn new(show_settings: bool) -> Self {
        Self { open: false, show_settings }
    }

    /// Flip open/closed.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Close without selecting.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Entries in display order.
    pub fn items(&self, strings: &Strings) -> Vec<MenuItem> {
        let mut items = Vec::with_capacity(2);
        if self.show_settings {
            items.push(MenuItem { route: Route::Settings, label: strings.settings.clone() });
        }
        items.push(MenuItem { route: Route::About, label: strings.about.clone() });
        items
    }

    /// Select an entry: closes the menu and returns the destination.
    ///
    /// Returns `None` for an entry that is not offered.
    pub fn select(&mut self, route: Route) -> Option<Route> {
        self.open = false;
        match route {
            Route::Settings if !self.show_settings => None,
            Route::Settings | Route::About => Some(route),
        }
    }
}
