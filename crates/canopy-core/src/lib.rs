pub mod app_config;
pub mod bundles;
pub mod config;
pub mod entity;
pub mod filters;
pub mod preview;
pub mod pricing;
pub mod products;
pub mod settings;
pub mod target;
pub mod tiers;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use bundles::{
    Bundle, BundleConditions, BundleDraft, BundleItem, BundleProductDetail, CategoryRequirement,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use entity::{EntityId, EntityKind};
pub use filters::{Nose, ProductFilters, SortOrder, StrainType, Vibe};
pub use pricing::{
    BasePricing, BasePricingDraft, PricingCatalog, PricingEntity, PricingRule, PricingRuleDraft,
    RuleType, Special, SpecialDraft,
};
pub use products::{
    format_display_price, parse_display_price, ApplicableFields, Product, ProductCategory,
    ProductDraft,
};
pub use settings::MenuSettings;
pub use target::{Element, ElementKind, EventTarget};
pub use tiers::{compare_tiers, sort_tiers, tiers_by_category, TIER_ORDER};

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// A form submission rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is not a valid number: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown product category: {0}")]
    UnknownCategory(String),

    #[error("unknown rule type: {0}")]
    UnknownRuleType(String),

    #[error("unknown {filter} value: {value}")]
    UnknownFilterValue { filter: &'static str, value: String },
}
