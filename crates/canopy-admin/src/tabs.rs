use canopy_core::EntityKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AdminTab {
    #[default]
    Products,
    Pricing,
    Specials,
    Bundles,
    Settings,
}

impl AdminTab {
    pub const ALL: [AdminTab; 5] = [
        AdminTab::Products,
        AdminTab::Pricing,
        AdminTab::Specials,
        AdminTab::Bundles,
        AdminTab::Settings,
    ];

    /// Entity kinds whose tables appear on this tab.
    #[must_use]
    pub fn kinds(self) -> &'static [EntityKind] {
        match self {
            AdminTab::Products => &[EntityKind::Products],
            AdminTab::Pricing => &[EntityKind::PricingRules, EntityKind::BasePricing],
            AdminTab::Specials => &[EntityKind::Specials],
            AdminTab::Bundles => &[EntityKind::Bundles],
            AdminTab::Settings => &[],
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AdminTab::Products => "Products",
            AdminTab::Pricing => "Pricing",
            AdminTab::Specials => "Specials",
            AdminTab::Bundles => "Bundles",
            AdminTab::Settings => "Menu Settings",
        }
    }
}

impl std::fmt::Display for AdminTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
