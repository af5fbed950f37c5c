#![forbid(unsafe_code)]

//! Add-item menu listing the creatable property kinds.
//!
//! Headless: the menu holds its items and a selection, and turns key presses
//! into a [`MenuAction`]. The host draws it.

use bboard_core::event::{KeyCode, KeyEvent};
use bboard_core::property::PropertyKind;

/// One entry of the add-item menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub kind: PropertyKind,
}

/// Result of feeding a key to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Key not handled.
    None,
    /// Selection moved.
    Moved,
    /// The selected kind was chosen.
    Chosen(PropertyKind),
    /// The menu was dismissed.
    Dismissed,
}

/// Menu of property kinds in menu order.
#[derive(Debug, Clone)]
pub struct AddItemMenu {
    items: Vec<MenuItem>,
    selected: Option<usize>,
}

impl Default for AddItemMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl AddItemMenu {
    /// Menu offering every [`PropertyKind`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: PropertyKind::ALL
                .iter()
                .map(|&kind| MenuItem {
                    label: kind.label(),
                    kind,
                })
                .collect(),
            selected: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Kind of the selected item.
    #[must_use]
    pub fn selected_kind(&self) -> Option<PropertyKind> {
        self.selected.map(|i| self.items[i].kind)
    }

    /// Item whose label is `label`.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.label == label)
    }

    /// Move selection to the next item, clamping to the last.
    ///
    /// If nothing is selected, selects the first item.
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        });
    }

    /// Move selection to the previous item, clamping to 0.
    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    /// Handle keyboard navigation.
    ///
    /// - `Up`/`Down`: move the selection
    /// - `Enter`: choose the selected kind
    /// - `Escape`: dismiss
    pub fn handle_key(&mut self, key: &KeyEvent) -> MenuAction {
        if !key.is_press() {
            return MenuAction::None;
        }
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                MenuAction::Moved
            }
            KeyCode::Down => {
                self.select_next();
                MenuAction::Moved
            }
            KeyCode::Enter | KeyCode::KeypadEnter => match self.selected_kind() {
                Some(kind) => MenuAction::Chosen(kind),
                None => MenuAction::None,
            },
            KeyCode::Escape => {
                self.selected = None;
                MenuAction::Dismissed
            }
            _ => MenuAction::None,
        }
    }
}
