use canopy_core::{EntityId, EntityKind, PricingEntity, Special, SpecialDraft};

use super::{Outcome, PanelState};
use crate::notify::Notifier;
use crate::shell::AdminShell;

impl<N: Notifier> AdminShell<N> {
    #[must_use]
    pub fn special_panel(&self) -> &PanelState<SpecialDraft> {
        &self.special_panel
    }

    pub fn special_panel_mut(&mut self) -> &mut PanelState<SpecialDraft> {
        &mut self.special_panel
    }

    pub fn start_edit_special(&mut self, id: EntityId) -> bool {
        let Some(special) = self
            .pricing
            .pricing_rules
            .iter()
            .find(|r| r.id == id)
            .and_then(Special::from_rule)
        else {
            return false;
        };
        self.special_panel.begin_edit(id, SpecialDraft::from(&special));
        true
    }

    pub async fn submit_new_special(&mut self) -> Outcome {
        if self.is_saving(EntityKind::Specials) {
            return Outcome::Busy;
        }
        let Some(draft) = self.special_panel.modal() else {
            return Outcome::Skipped;
        };
        let payload = match draft.validate() {
            Ok(payload) => payload,
            Err(err) => return self.reject(EntityKind::Specials, &err),
        };

        let outcome = self
            .run_mutation(EntityKind::Specials, "Failed to create special", |client| async move {
                client.create_pricing_rule(&payload).await
            })
            .await;
        if outcome == Outcome::Applied {
            self.special_panel.close_modal();
        }
        outcome
    }

    /// Saves an inline special edit. The form does not expose priority,
    /// start date, or description, so those keep the stored rule's values.
    pub async fn save_special_edit(&mut self) -> Outcome {
        if self.is_saving(EntityKind::Specials) {
            return Outcome::Busy;
        }
        let Some(edit) = self.special_panel.editing() else {
            return Outcome::Skipped;
        };
        let id = edit.id;
        let mut payload = match edit.draft.validate() {
            Ok(payload) => payload,
            Err(err) => return self.reject(EntityKind::Specials, &err),
        };
        if let Some(stored) = self.pricing.pricing_rules.iter().find(|r| r.id == id) {
            payload.priority = stored.priority;
            payload.valid_from = stored.valid_from;
            payload.description.clone_from(&stored.description);
        }

        let outcome = self
            .run_mutation(EntityKind::Specials, "Failed to update special", |client| async move {
                client.update_pricing_rule(id, &payload).await
            })
            .await;
        if outcome == Outcome::Applied {
            self.special_panel.forget(id);
        }
        outcome
    }

    /// The status badge: flips a special between active and inactive with a
    /// `PUT` carrying only `is_active`.
    pub async fn toggle_special_active(&mut self, id: EntityId) -> Outcome {
        let Some(is_active) = self
            .pricing
            .pricing_rules
            .iter()
            .find(|r| r.id == id && r.rule_type.is_special_kind())
            .map(|r| r.is_active)
        else {
            return Outcome::Skipped;
        };

        self.run_mutation(EntityKind::Specials, "Failed to toggle special", move |client| async move {
            client.set_pricing_rule_active(id, !is_active).await
        })
        .await
    }

    pub async fn delete_special(&mut self, id: EntityId) -> Outcome {
        let Some(name) = self
            .pricing
            .pricing_rules
            .iter()
            .find(|r| r.id == id && r.rule_type.is_special_kind())
            .map(|r| r.name.clone())
        else {
            return Outcome::Skipped;
        };
        if !self.confirm_delete(EntityKind::Specials, &name) {
            return Outcome::Cancelled;
        }

        let outcome = self
            .run_mutation(EntityKind::Specials, "Failed to delete special", |client| async move {
                client.delete_pricing(PricingEntity::PricingRule, id).await
            })
            .await;
        if outcome == Outcome::Applied {
            self.special_panel.forget(id);
        }
        outcome
    }
}
