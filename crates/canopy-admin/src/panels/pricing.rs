use canopy_core::{
    BasePricingDraft, EntityId, EntityKind, PricingEntity, PricingRuleDraft,
};

use super::{Outcome, PanelState};
use crate::notify::Notifier;
use crate::shell::AdminShell;

impl<N: Notifier> AdminShell<N> {
    #[must_use]
    pub fn rule_panel(&self) -> &PanelState<PricingRuleDraft> {
        &self.rule_panel
    }

    pub fn rule_panel_mut(&mut self) -> &mut PanelState<PricingRuleDraft> {
        &mut self.rule_panel
    }

    #[must_use]
    pub fn tier_panel(&self) -> &PanelState<BasePricingDraft> {
        &self.tier_panel
    }

    pub fn tier_panel_mut(&mut self) -> &mut PanelState<BasePricingDraft> {
        &mut self.tier_panel
    }

    // --- pricing rules ---------------------------------------------------

    pub fn start_edit_rule(&mut self, id: EntityId) -> bool {
        let Some(rule) = self.pricing.pricing_rules.iter().find(|r| r.id == id) else {
            return false;
        };
        let draft = PricingRuleDraft::from(rule);
        self.rule_panel.begin_edit(id, draft);
        true
    }

    pub async fn submit_new_rule(&mut self) -> Outcome {
        if self.is_saving(EntityKind::PricingRules) {
            return Outcome::Busy;
        }
        let Some(draft) = self.rule_panel.modal() else {
            return Outcome::Skipped;
        };
        let payload = match draft.validate() {
            Ok(payload) => payload,
            Err(err) => return self.reject(EntityKind::PricingRules, &err),
        };

        let outcome = self
            .run_mutation(
                EntityKind::PricingRules,
                "Failed to create pricing rule",
                |client| async move { client.create_pricing_rule(&payload).await },
            )
            .await;
        if outcome == Outcome::Applied {
            self.rule_panel.close_modal();
        }
        outcome
    }

    pub async fn save_rule_edit(&mut self) -> Outcome {
        if self.is_saving(EntityKind::PricingRules) {
            return Outcome::Busy;
        }
        let Some(edit) = self.rule_panel.editing() else {
            return Outcome::Skipped;
        };
        let id = edit.id;
        let payload = match edit.draft.validate() {
            Ok(payload) => payload,
            Err(err) => return self.reject(EntityKind::PricingRules, &err),
        };

        let outcome = self
            .run_mutation(
                EntityKind::PricingRules,
                "Failed to update pricing rule",
                |client| async move { client.update_pricing_rule(id, &payload).await },
            )
            .await;
        if outcome == Outcome::Applied {
            self.rule_panel.forget(id);
        }
        outcome
    }

    pub async fn delete_rule(&mut self, id: EntityId) -> Outcome {
        let Some(name) = self
            .pricing
            .pricing_rules
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.clone())
        else {
            return Outcome::Skipped;
        };
        if !self.confirm_delete(EntityKind::PricingRules, &name) {
            return Outcome::Cancelled;
        }

        let outcome = self
            .run_mutation(
                EntityKind::PricingRules,
                "Failed to delete pricing rule",
                |client| async move {
                    client.delete_pricing(PricingEntity::PricingRule, id).await
                },
            )
            .await;
        if outcome == Outcome::Applied {
            self.rule_panel.forget(id);
        }
        outcome
    }

    // --- base pricing tiers ----------------------------------------------

    pub fn start_edit_tier(&mut self, id: EntityId) -> bool {
        let Some(tier) = self.pricing.base_pricing.iter().find(|t| t.id == id) else {
            return false;
        };
        let draft = BasePricingDraft::from(tier);
        self.tier_panel.begin_edit(id, draft);
        true
    }

    pub async fn submit_new_tier(&mut self) -> Outcome {
        if self.is_saving(EntityKind::BasePricing) {
            return Outcome::Busy;
        }
        let Some(draft) = self.tier_panel.modal() else {
            return Outcome::Skipped;
        };
        let payload = match draft.validate() {
            Ok(payload) => payload,
            Err(err) => return self.reject(EntityKind::BasePricing, &err),
        };

        let outcome = self
            .run_mutation(
                EntityKind::BasePricing,
                "Failed to create base pricing",
                |client| async move { client.create_base_pricing(&payload).await },
            )
            .await;
        if outcome == Outcome::Applied {
            self.tier_panel.close_modal();
        }
        outcome
    }

    pub async fn save_tier_edit(&mut self) -> Outcome {
        if self.is_saving(EntityKind::BasePricing) {
            return Outcome::Busy;
        }
        let Some(edit) = self.tier_panel.editing() else {
            return Outcome::Skipped;
        };
        let id = edit.id;
        let payload = match edit.draft.validate() {
            Ok(payload) => payload,
            Err(err) => return self.reject(EntityKind::BasePricing, &err),
        };

        let outcome = self
            .run_mutation(
                EntityKind::BasePricing,
                "Failed to update base pricing",
                |client| async move { client.update_base_pricing(id, &payload).await },
            )
            .await;
        if outcome == Outcome::Applied {
            self.tier_panel.forget(id);
        }
        outcome
    }

    pub async fn delete_tier(&mut self, id: EntityId) -> Outcome {
        let Some(label) = self
            .pricing
            .base_pricing
            .iter()
            .find(|t| t.id == id)
            .map(|t| format!("{} {}", t.category.label(), t.weight_or_quantity))
        else {
            return Outcome::Skipped;
        };
        if !self.confirm_delete(EntityKind::BasePricing, &label) {
            return Outcome::Cancelled;
        }

        let outcome = self
            .run_mutation(
                EntityKind::BasePricing,
                "Failed to delete base pricing",
                |client| async move {
                    client.delete_pricing(PricingEntity::BasePricing, id).await
                },
            )
            .await;
        if outcome == Outcome::Applied {
            self.tier_panel.forget(id);
        }
        outcome
    }
}
