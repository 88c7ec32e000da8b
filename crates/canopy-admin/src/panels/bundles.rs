use canopy_core::{BundleDraft, EntityId, EntityKind};

use super::{Outcome, PanelState};
use crate::notify::Notifier;
use crate::shell::AdminShell;

// Bundles have no update endpoint, so there is no inline edit here.
impl<N: Notifier> AdminShell<N> {
    #[must_use]
    pub fn bundle_panel(&self) -> &PanelState<BundleDraft> {
        &self.bundle_panel
    }

    pub fn bundle_panel_mut(&mut self) -> &mut PanelState<BundleDraft> {
        &mut self.bundle_panel
    }

    pub async fn submit_new_bundle(&mut self) -> Outcome {
        if self.is_saving(EntityKind::Bundles) {
            return Outcome::Busy;
        }
        let Some(draft) = self.bundle_panel.modal() else {
            return Outcome::Skipped;
        };
        let payload = match draft.validate() {
            Ok(payload) => payload,
            Err(err) => return self.reject(EntityKind::Bundles, &err),
        };

        let outcome = self
            .run_mutation(EntityKind::Bundles, "Failed to create bundle", |client| async move {
                client.create_bundle(&payload).await
            })
            .await;
        if outcome == Outcome::Applied {
            self.bundle_panel.close_modal();
        }
        outcome
    }

    pub async fn delete_bundle(&mut self, id: EntityId) -> Outcome {
        let Some(name) = self
            .bundles
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.name.clone())
        else {
            return Outcome::Skipped;
        };
        if !self.confirm_delete(EntityKind::Bundles, &name) {
            return Outcome::Cancelled;
        }

        self.run_mutation(EntityKind::Bundles, "Failed to delete bundle", |client| async move {
            client.delete_bundle(id).await
        })
        .await
    }
}
