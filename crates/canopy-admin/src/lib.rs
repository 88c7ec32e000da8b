//! Back-office state for the dispensary admin page.
//!
//! [`AdminShell`] owns every collection fetched from the backend, the active
//! tab, the per-kind selection sets, and one [`PanelState`] per entity kind.
//! Each mutation goes straight to the REST API and is followed by a refetch
//! of everything; nothing is patched locally.

pub mod error;
pub mod keys;
pub mod notify;
pub mod panels;
pub mod selection;
pub mod shell;
pub mod tabs;

pub use error::AdminError;
pub use keys::{Key, KeyPress};
pub use notify::{Notifier, RecordingNotifier};
pub use panels::{InlineEdit, Outcome, PanelState};
pub use selection::SelectionModel;
pub use shell::AdminShell;
pub use tabs::AdminTab;
