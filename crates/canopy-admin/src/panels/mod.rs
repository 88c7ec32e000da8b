//! CRUD panels, one per entity kind.
//!
//! A panel holds the "Add" modal draft and at most one inline edit. Every
//! submit validates locally first; an invalid draft raises an alert and
//! makes no request. A valid one is sent, and on success the whole admin
//! page is refetched.

mod bundles;
mod pricing;
mod products;
mod settings;
mod specials;

use std::future::Future;

use canopy_client::{CanopyClient, ClientError};
use canopy_core::{EntityId, EntityKind, ValidationError};

use crate::notify::Notifier;
use crate::shell::AdminShell;

/// What happened to a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request succeeded and collections were refetched.
    Applied,
    /// Local validation failed; an alert was shown and nothing was sent.
    Invalid,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// The request failed; an alert was shown.
    Failed,
    /// A request for this panel is already in flight.
    Busy,
    /// Nothing to act on: no open form, unknown ID, or empty selection.
    Skipped,
    /// The action has no backend endpoint for this tab.
    Unsupported,
}

/// A row being edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineEdit<D> {
    pub id: EntityId,
    pub draft: D,
}

/// Modal and inline-edit state for one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState<D> {
    modal: Option<D>,
    editing: Option<InlineEdit<D>>,
}

impl<D> Default for PanelState<D> {
    fn default() -> Self {
        Self {
            modal: None,
            editing: None,
        }
    }
}

impl<D: Default> PanelState<D> {
    /// Opens the "Add" modal with an empty form. Reopening keeps whatever
    /// the user already typed.
    pub fn open_modal(&mut self) -> &mut D {
        self.modal.get_or_insert_with(D::default)
    }
}

impl<D> PanelState<D> {
    #[must_use]
    pub fn modal(&self) -> Option<&D> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut D> {
        self.modal.as_mut()
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    #[must_use]
    pub fn editing(&self) -> Option<&InlineEdit<D>> {
        self.editing.as_ref()
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut D> {
        self.editing.as_mut().map(|e| &mut e.draft)
    }

    #[must_use]
    pub fn is_editing(&self, id: EntityId) -> bool {
        self.editing.as_ref().is_some_and(|e| e.id == id)
    }

    /// Swaps row `id` into its editable form. Any other row being edited
    /// reverts to display without saving.
    pub(crate) fn begin_edit(&mut self, id: EntityId, draft: D) {
        self.editing = Some(InlineEdit { id, draft });
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Drops the inline edit if it belongs to `id`.
    pub(crate) fn forget(&mut self, id: EntityId) {
        if self.is_editing(id) {
            self.editing = None;
        }
    }
}

impl<N: Notifier> AdminShell<N> {
    /// Alerts about a rejected draft.
    pub(crate) fn reject(&self, kind: EntityKind, err: &ValidationError) -> Outcome {
        tracing::debug!(%kind, error = %err, "admin form rejected");
        self.notifier()
            .alert(&format!("Please check the {}: {err}", kind.noun()));
        Outcome::Invalid
    }

    /// Asks before deleting. Returns `false` if the user declined.
    pub(crate) fn confirm_delete(&self, kind: EntityKind, label: &str) -> bool {
        self.notifier().confirm(&format!(
            "Are you sure you want to delete the {} \"{label}\"? This cannot be undone.",
            kind.noun()
        ))
    }

    /// Runs one request for `kind` under its `saving` flag.
    ///
    /// On success every collection is refetched once; product mutations also
    /// clear the product selection. On failure the error is alerted with
    /// `context` as prefix. Nothing is retried.
    pub(crate) async fn run_mutation<F, Fut>(
        &mut self,
        kind: EntityKind,
        context: &str,
        op: F,
    ) -> Outcome
    where
        F: FnOnce(CanopyClient) -> Fut,
        Fut: Future<Output = Result<(), ClientError>>,
    {
        if !self.begin_saving(kind) {
            return Outcome::Busy;
        }
        let result = op(self.client().clone()).await;
        self.end_saving(kind);

        match result {
            Ok(()) => {
                tracing::info!(%kind, context, "admin mutation applied");
                self.after_mutation(kind).await;
                Outcome::Applied
            }
            Err(err) => {
                tracing::warn!(%kind, context, error = %err, "admin mutation failed");
                self.notifier()
                    .alert(&format!("{context}: {}", err.user_message()));
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_modal_keeps_existing_draft() {
        let mut panel: PanelState<String> = PanelState::default();
        panel.open_modal().push_str("half typed");
        assert_eq!(panel.open_modal(), "half typed");
        panel.close_modal();
        assert!(panel.modal().is_none());
    }

    #[test]
    fn only_one_row_is_edited_at_a_time() {
        let mut panel: PanelState<String> = PanelState::default();
        panel.begin_edit(1, "one".to_string());
        panel.begin_edit(2, "two".to_string());
        assert!(!panel.is_editing(1));
        assert!(panel.is_editing(2));
        panel.forget(1);
        assert!(panel.is_editing(2));
        panel.forget(2);
        assert!(panel.editing().is_none());
    }
}
