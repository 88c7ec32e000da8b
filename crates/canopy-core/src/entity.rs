use serde::{Deserialize, Serialize};

/// Identifier assigned by the backend. IDs are unique within one collection
/// only; a product and a bundle may share a number.
pub type EntityId = i64;

/// The five record kinds the back-office manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Products,
    PricingRules,
    BasePricing,
    Specials,
    Bundles,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Products,
        EntityKind::PricingRules,
        EntityKind::BasePricing,
        EntityKind::Specials,
        EntityKind::Bundles,
    ];

    /// Singular noun used in user-facing messages.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            EntityKind::Products => "product",
            EntityKind::PricingRules => "pricing rule",
            EntityKind::BasePricing => "base pricing tier",
            EntityKind::Specials => "special",
            EntityKind::Bundles => "bundle",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Products => write!(f, "products"),
            EntityKind::PricingRules => write!(f, "pricing_rules"),
            EntityKind::BasePricing => write!(f, "base_pricing"),
            EntityKind::Specials => write!(f, "specials"),
            EntityKind::Bundles => write!(f, "bundles"),
        }
    }
}
