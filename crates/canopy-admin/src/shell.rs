use std::collections::{BTreeSet, HashSet};

use canopy_client::{BulkAction, BulkRequest, CanopyClient, ClientError, ProductBulkUpdate};
use canopy_core::{
    BasePricing, BasePricingDraft, Bundle, BundleDraft, EntityId, EntityKind, EventTarget,
    MenuSettings, PricingCatalog, PricingRule, PricingRuleDraft, Product, ProductCategory,
    ProductDraft, ProductFilters, Special, SpecialDraft,
};

use crate::error::AdminError;
use crate::notify::Notifier;
use crate::panels::{Outcome, PanelState};
use crate::selection::SelectionModel;
use crate::tabs::AdminTab;

/// The admin page: fetched collections, tab and selection state, and the
/// per-kind CRUD panels.
pub struct AdminShell<N> {
    client: CanopyClient,
    notifier: N,
    pub(crate) products: Vec<Product>,
    pub(crate) settings: MenuSettings,
    pub(crate) pricing: PricingCatalog,
    pub(crate) bundles: Vec<Bundle>,
    active_tab: AdminTab,
    selection: SelectionModel,
    product_filters: ProductFilters,
    pub(crate) product_panel: PanelState<ProductDraft>,
    pub(crate) rule_panel: PanelState<PricingRuleDraft>,
    pub(crate) tier_panel: PanelState<BasePricingDraft>,
    pub(crate) special_panel: PanelState<SpecialDraft>,
    pub(crate) bundle_panel: PanelState<BundleDraft>,
    saving: HashSet<EntityKind>,
    pub(crate) settings_saving: bool,
}

impl<N: Notifier> AdminShell<N> {
    /// An empty shell. Call [`AdminShell::refresh_all`] to populate it.
    pub fn new(client: CanopyClient, notifier: N) -> Self {
        Self {
            client,
            notifier,
            products: Vec::new(),
            settings: MenuSettings::default(),
            pricing: PricingCatalog::default(),
            bundles: Vec::new(),
            active_tab: AdminTab::default(),
            selection: SelectionModel::new(),
            product_filters: ProductFilters::default(),
            product_panel: PanelState::default(),
            rule_panel: PanelState::default(),
            tier_panel: PanelState::default(),
            special_panel: PanelState::default(),
            bundle_panel: PanelState::default(),
            saving: HashSet::new(),
            settings_saving: false,
        }
    }

    /// Builds a shell and performs the initial fetch.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Load`] if any collection fails to load.
    pub async fn load(client: CanopyClient, notifier: N) -> Result<Self, AdminError> {
        let mut shell = Self::new(client, notifier);
        shell.refresh_all().await?;
        Ok(shell)
    }

    /// Refetches every collection, one request per endpoint, concurrently.
    ///
    /// Collections are replaced only if all four requests succeed. Selected
    /// IDs that no longer exist are dropped.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] encountered.
    pub async fn refresh_all(&mut self) -> Result<(), ClientError> {
        let (products, settings, pricing, bundles) = futures::try_join!(
            self.client.list_products(),
            self.client.get_menu_settings(),
            self.client.get_pricing(),
            self.client.list_bundles(),
        )?;

        tracing::debug!(
            products = products.len(),
            pricing_rules = pricing.pricing_rules.len(),
            base_pricing = pricing.base_pricing.len(),
            bundles = bundles.len(),
            "admin collections refreshed"
        );

        self.products = products;
        self.settings = settings;
        self.pricing = pricing;
        self.bundles = bundles;

        for kind in EntityKind::ALL {
            let existing: BTreeSet<EntityId> = self.all_ids(kind).into_iter().collect();
            self.selection.retain_existing(kind, &existing);
        }
        Ok(())
    }

    /// Refetch after a successful mutation. A failed refetch is alerted but
    /// does not undo the mutation.
    pub(crate) async fn after_mutation(&mut self, kind: EntityKind) {
        if let Err(err) = self.refresh_all().await {
            tracing::warn!(error = %err, "refresh after mutation failed");
            self.notifier
                .alert(&format!("Failed to refresh data: {}", err.user_message()));
        }
        if kind == EntityKind::Products {
            self.selection.clear(EntityKind::Products);
        }
    }

    pub(crate) fn client(&self) -> &CanopyClient {
        &self.client
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Marks `kind` as saving. Returns `false` if it already was.
    pub(crate) fn begin_saving(&mut self, kind: EntityKind) -> bool {
        self.saving.insert(kind)
    }

    pub(crate) fn end_saving(&mut self, kind: EntityKind) {
        self.saving.remove(&kind);
    }

    /// Whether a request for `kind` is in flight. Controls for that panel
    /// should be disabled while this is `true`.
    #[must_use]
    pub fn is_saving(&self, kind: EntityKind) -> bool {
        self.saving.contains(&kind)
    }

    // --- collections -----------------------------------------------------

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products passing the current filters, in display order.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.product_filters.apply(&self.products)
    }

    #[must_use]
    pub fn product_filters(&self) -> &ProductFilters {
        &self.product_filters
    }

    pub fn set_product_filters(&mut self, filters: ProductFilters) {
        self.product_filters = filters;
    }

    #[must_use]
    pub fn pricing_rules(&self) -> &[PricingRule] {
        &self.pricing.pricing_rules
    }

    /// Rules ordered for the pricing table: highest priority first, then
    /// by name.
    #[must_use]
    pub fn pricing_rules_by_priority(&self) -> Vec<&PricingRule> {
        let mut rules: Vec<&PricingRule> = self.pricing.pricing_rules.iter().collect();
        rules.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));
        rules
    }

    #[must_use]
    pub fn base_pricing(&self) -> &[BasePricing] {
        &self.pricing.base_pricing
    }

    /// Base pricing grouped by category, each group in canonical tier order.
    #[must_use]
    pub fn base_pricing_by_category(&self) -> Vec<(ProductCategory, Vec<BasePricing>)> {
        canopy_core::tiers_by_category(&self.pricing.base_pricing)
    }

    #[must_use]
    pub fn specials(&self) -> Vec<Special> {
        self.pricing.specials()
    }

    #[must_use]
    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    #[must_use]
    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    fn all_ids(&self, kind: EntityKind) -> Vec<EntityId> {
        match kind {
            EntityKind::Products => self.products.iter().map(|p| p.id).collect(),
            EntityKind::PricingRules => self.pricing.pricing_rules.iter().map(|r| r.id).collect(),
            EntityKind::BasePricing => self.pricing.base_pricing.iter().map(|t| t.id).collect(),
            EntityKind::Specials => self.pricing.specials().iter().map(|s| s.id).collect(),
            EntityKind::Bundles => self.bundles.iter().map(|b| b.id).collect(),
        }
    }

    /// IDs currently shown in the table for `kind`. Only products are
    /// filterable; other tables show everything.
    #[must_use]
    pub fn visible_ids(&self, kind: EntityKind) -> Vec<EntityId> {
        match kind {
            EntityKind::Products => self.product_filters.visible_ids(&self.products),
            other => self.all_ids(other),
        }
    }

    // --- tabs and selection ----------------------------------------------

    #[must_use]
    pub fn active_tab(&self) -> AdminTab {
        self.active_tab
    }

    /// Switches tab. Every selection set is cleared, including when the tab
    /// does not actually change.
    pub fn set_tab(&mut self, tab: AdminTab) {
        self.active_tab = tab;
        self.selection.clear_all();
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Checkbox toggle. Returns whether `id` is selected afterwards.
    pub fn toggle_selection(&mut self, kind: EntityKind, id: EntityId) -> bool {
        self.selection.toggle(kind, id)
    }

    /// A click anywhere on a table row. Toggles selection unless the click
    /// began on a button, input, or something inside one, so inline editing
    /// keeps working. Returns whether selection changed.
    pub fn row_clicked(&mut self, kind: EntityKind, id: EntityId, target: &EventTarget) -> bool {
        if target.is_within_interactive() {
            return false;
        }
        self.selection.toggle(kind, id);
        true
    }

    /// Selects exactly the rows currently visible for `kind`.
    pub fn select_all(&mut self, kind: EntityKind) {
        let visible = self.visible_ids(kind);
        self.selection.select_all(kind, visible);
    }

    pub fn clear_selection(&mut self, kind: EntityKind) {
        self.selection.clear(kind);
    }

    // --- bulk actions ----------------------------------------------------

    /// Applies `action` to the active tab's selection as a single batched
    /// request.
    ///
    /// Only the Products tab has a bulk endpoint; other tabs are reported as
    /// unsupported without a request. `update` supplies the changed fields
    /// for [`BulkAction::Update`] and is ignored otherwise. Deletes ask for
    /// confirmation first.
    pub async fn bulk_action(&mut self, action: BulkAction, update: ProductBulkUpdate) -> Outcome {
        if self.active_tab != AdminTab::Products {
            tracing::debug!(tab = %self.active_tab, %action, "bulk action not wired for tab");
            self.notifier.alert(&format!(
                "Bulk {action} is not available on the {} tab yet.",
                self.active_tab
            ));
            return Outcome::Unsupported;
        }
        if self.is_saving(EntityKind::Products) {
            return Outcome::Busy;
        }

        let ids = self.selection.ids(EntityKind::Products);
        if ids.is_empty() {
            self.notifier.alert("Select at least one product first.");
            return Outcome::Skipped;
        }
        if action == BulkAction::Update && update.is_empty() {
            self.notifier
                .alert("Choose at least one field to update for the selected products.");
            return Outcome::Invalid;
        }
        if action == BulkAction::Delete
            && !self.notifier.confirm(&format!(
                "Are you sure you want to delete {} selected product(s)? This cannot be undone.",
                ids.len()
            ))
        {
            return Outcome::Cancelled;
        }

        let mut request = BulkRequest::new(action, ids);
        if action == BulkAction::Update {
            request = request.with_data(update.into_data());
        }
        let context = format!("Failed to {action} selected products");
        self.run_mutation(EntityKind::Products, &context, move |client| async move {
            client.bulk_products(&request).await
        })
        .await
    }
}
