//! Open/closed state of the header's dropdowns.
//!
//! Each menu has its own flag. Leaving the shop menu or the cart drawer with
//! the pointer schedules a close after that menu's delay; coming back before
//! it fires cancels it. Opening one menu closes the rest and cancels their
//! pending closes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use canopy_core::EventTarget;
use tokio::task::AbortHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    Shop,
    Cart,
    Concierge,
}

impl MenuKind {
    pub const ALL: [MenuKind; 3] = [MenuKind::Shop, MenuKind::Cart, MenuKind::Concierge];

    /// DOM id of the element that counts as "inside" this menu for
    /// outside-click dismissal. It wraps both the trigger and the panel.
    #[must_use]
    pub fn container_id(self) -> &'static str {
        match self {
            MenuKind::Shop => "shop-menu",
            MenuKind::Cart => "cart-drawer",
            MenuKind::Concierge => "concierge-panel",
        }
    }

    /// Whether hovering the trigger opens the menu. The cart and concierge
    /// open on click only.
    #[must_use]
    pub fn opens_on_hover(self) -> bool {
        matches!(self, MenuKind::Shop)
    }

    fn index(self) -> usize {
        match self {
            MenuKind::Shop => 0,
            MenuKind::Cart => 1,
            MenuKind::Concierge => 2,
        }
    }
}

/// How long each hover-dismissed menu lingers after the pointer leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseDelays {
    pub shop: Duration,
    pub cart: Duration,
}

impl Default for CloseDelays {
    fn default() -> Self {
        Self {
            shop: Duration::from_millis(1200),
            cart: Duration::from_millis(500),
        }
    }
}

impl CloseDelays {
    /// `None` for menus that only close on click.
    #[must_use]
    pub fn for_menu(self, kind: MenuKind) -> Option<Duration> {
        match kind {
            MenuKind::Shop => Some(self.shop),
            MenuKind::Cart => Some(self.cart),
            MenuKind::Concierge => None,
        }
    }
}

#[derive(Debug)]
struct PendingClose {
    generation: u64,
    handle: AbortHandle,
}

#[derive(Debug, Default)]
struct MenuState {
    open: [bool; 3],
    pending: [Option<PendingClose>; 3],
    generation: u64,
}

impl MenuState {
    fn cancel_close(&mut self, kind: MenuKind) {
        if let Some(pending) = self.pending[kind.index()].take() {
            pending.handle.abort();
        }
    }

    fn close(&mut self, kind: MenuKind) {
        self.cancel_close(kind);
        self.open[kind.index()] = false;
    }
}

/// Shared handle to the header menus. Clones refer to the same state.
#[derive(Debug, Clone)]
pub struct MenuController {
    state: Arc<Mutex<MenuState>>,
    delays: CloseDelays,
}

impl MenuController {
    #[must_use]
    pub fn new(delays: CloseDelays) -> Self {
        Self {
            state: Arc::new(Mutex::new(MenuState::default())),
            delays,
        }
    }

    fn lock(&self) -> MutexGuard<'_, MenuState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_open(&self, kind: MenuKind) -> bool {
        self.lock().open[kind.index()]
    }

    /// Menus currently open.
    #[must_use]
    pub fn open_menus(&self) -> Vec<MenuKind> {
        let state = self.lock();
        MenuKind::ALL
            .into_iter()
            .filter(|k| state.open[k.index()])
            .collect()
    }

    #[must_use]
    pub fn has_pending_close(&self, kind: MenuKind) -> bool {
        self.lock().pending[kind.index()].is_some()
    }

    /// Opens `kind` and closes every other menu, cancelling all pending
    /// closes including its own.
    pub fn open(&self, kind: MenuKind) {
        let mut state = self.lock();
        for other in MenuKind::ALL {
            if other == kind {
                state.cancel_close(other);
            } else {
                state.close(other);
            }
        }
        state.open[kind.index()] = true;
        tracing::trace!(menu = ?kind, "menu opened");
    }

    pub fn close(&self, kind: MenuKind) {
        self.lock().close(kind);
    }

    pub fn close_all(&self) {
        let mut state = self.lock();
        for kind in MenuKind::ALL {
            state.close(kind);
        }
    }

    /// Click on a menu's trigger.
    pub fn toggle(&self, kind: MenuKind) {
        if self.is_open(kind) {
            self.close(kind);
        } else {
            self.open(kind);
        }
    }

    /// Pointer entered a menu's trigger or panel.
    pub fn pointer_enter(&self, kind: MenuKind) {
        if kind.opens_on_hover() {
            self.open(kind);
        } else {
            self.lock().cancel_close(kind);
        }
    }

    /// Pointer left a menu's trigger or panel. An open shop menu or cart
    /// drawer closes after its delay unless the pointer returns first. The
    /// concierge panel ignores the pointer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn pointer_leave(&self, kind: MenuKind) {
        let Some(delay) = self.delays.for_menu(kind) else {
            return;
        };
        let mut state = self.lock();
        if !state.open[kind.index()] {
            return;
        }
        state.cancel_close(kind);
        state.generation += 1;
        let generation = state.generation;

        let shared = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
            // A newer schedule or a cancel may have raced the abort.
            let current = state.pending[kind.index()]
                .as_ref()
                .is_some_and(|p| p.generation == generation);
            if current {
                state.pending[kind.index()] = None;
                state.open[kind.index()] = false;
                tracing::trace!(menu = ?kind, "menu closed after hover delay");
            }
        });
        state.pending[kind.index()] = Some(PendingClose {
            generation,
            handle: task.abort_handle(),
        });
    }

    /// A click anywhere on the page. Open menus whose container is not on
    /// the click's path close.
    pub fn outside_click(&self, target: &EventTarget) {
        let mut state = self.lock();
        for kind in MenuKind::ALL {
            if state.open[kind.index()] && !target.is_within(kind.container_id()) {
                state.close(kind);
            }
        }
    }
}
