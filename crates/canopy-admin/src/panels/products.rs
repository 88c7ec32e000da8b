use canopy_core::{EntityId, EntityKind, ProductDraft};

use super::{Outcome, PanelState};
use crate::notify::Notifier;
use crate::shell::AdminShell;

impl<N: Notifier> AdminShell<N> {
    #[must_use]
    pub fn product_panel(&self) -> &PanelState<ProductDraft> {
        &self.product_panel
    }

    pub fn product_panel_mut(&mut self) -> &mut PanelState<ProductDraft> {
        &mut self.product_panel
    }

    /// Puts product `id` into inline-edit mode, seeded from its current
    /// values. Returns `false` for an unknown ID.
    pub fn start_edit_product(&mut self, id: EntityId) -> bool {
        let Some(product) = self.products.iter().find(|p| p.id == id) else {
            return false;
        };
        let draft = ProductDraft::from(product);
        self.product_panel.begin_edit(id, draft);
        true
    }

    /// Submits the "Add Product" modal. The modal closes only on success.
    pub async fn submit_new_product(&mut self) -> Outcome {
        if self.is_saving(EntityKind::Products) {
            return Outcome::Busy;
        }
        let Some(draft) = self.product_panel.modal() else {
            return Outcome::Skipped;
        };
        let payload = match draft.validate() {
            Ok(payload) => payload,
            Err(err) => return self.reject(EntityKind::Products, &err),
        };

        let outcome = self
            .run_mutation(EntityKind::Products, "Failed to create product", |client| async move {
                client.create_product(&payload).await
            })
            .await;
        if outcome == Outcome::Applied {
            self.product_panel.close_modal();
        }
        outcome
    }

    /// Saves the row being edited inline. It reverts to display mode only
    /// on success.
    pub async fn save_product_edit(&mut self) -> Outcome {
        if self.is_saving(EntityKind::Products) {
            return Outcome::Busy;
        }
        let Some(edit) = self.product_panel.editing() else {
            return Outcome::Skipped;
        };
        let id = edit.id;
        let payload = match edit.draft.validate() {
            Ok(payload) => payload,
            Err(err) => return self.reject(EntityKind::Products, &err),
        };

        let outcome = self
            .run_mutation(EntityKind::Products, "Failed to update product", |client| async move {
                client.update_product(id, &payload).await
            })
            .await;
        if outcome == Outcome::Applied {
            self.product_panel.forget(id);
        }
        outcome
    }

    pub async fn delete_product(&mut self, id: EntityId) -> Outcome {
        let Some(name) = self
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
        else {
            return Outcome::Skipped;
        };
        if !self.confirm_delete(EntityKind::Products, &name) {
            return Outcome::Cancelled;
        }

        let outcome = self
            .run_mutation(EntityKind::Products, "Failed to delete product", |client| async move {
                client.delete_product(id).await
            })
            .await;
        if outcome == Outcome::Applied {
            self.product_panel.forget(id);
        }
        outcome
    }
}
