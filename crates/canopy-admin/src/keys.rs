//! Page-level keyboard shortcuts.

use canopy_core::EntityKind;

use crate::notify::Notifier;
use crate::shell::AdminShell;
use crate::tabs::AdminTab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
}

/// A key press with the modifiers that matter here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
}

impl KeyPress {
    #[must_use]
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    #[must_use]
    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
            meta: false,
        }
    }

    #[must_use]
    pub fn meta(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: false,
            meta: true,
        }
    }

    fn is_command(&self, c: char) -> bool {
        (self.ctrl || self.meta) && self.key == Key::Char(c)
    }
}

impl<N: Notifier> AdminShell<N> {
    /// Handles a page-level key press. Returns `true` when the press was
    /// consumed and the browser default should be suppressed.
    ///
    /// - Ctrl/Cmd+A selects every visible row on the active tab, except on
    ///   the pricing tab where it is left to the browser.
    /// - Escape drops the product selection and closes both the product
    ///   inline edit and the Add Product modal.
    pub fn key_pressed(&mut self, press: KeyPress) -> bool {
        if press.is_command('a') && self.active_tab() != AdminTab::Pricing {
            for &kind in self.active_tab().kinds() {
                self.select_all(kind);
            }
            return true;
        }
        if press.key == Key::Escape {
            self.clear_selection(EntityKind::Products);
            self.product_panel.cancel_edit();
            self.product_panel.close_modal();
        }
        false
    }
}
