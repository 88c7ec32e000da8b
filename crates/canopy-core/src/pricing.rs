use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entity::EntityId;
use crate::products::ProductCategory;
use crate::{CoreError, ValidationError};

/// Discount descriptor kinds shared by the Pricing and Specials tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    PercentageDiscount,
    FixedDiscount,
    FixedPrice,
    Special,
    Bundle,
}

impl RuleType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::PercentageDiscount => "percentage_discount",
            RuleType::FixedDiscount => "fixed_discount",
            RuleType::FixedPrice => "fixed_price",
            RuleType::Special => "special",
            RuleType::Bundle => "bundle",
        }
    }

    /// Whether rules of this type are listed on the Specials tab.
    #[must_use]
    pub fn is_special_kind(self) -> bool {
        matches!(
            self,
            RuleType::Special
                | RuleType::Bundle
                | RuleType::PercentageDiscount
                | RuleType::FixedDiscount
        )
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "percentage_discount" => Ok(RuleType::PercentageDiscount),
            "fixed_discount" => Ok(RuleType::FixedDiscount),
            "fixed_price" => Ok(RuleType::FixedPrice),
            "special" => Ok(RuleType::Special),
            "bundle" => Ok(RuleType::Bundle),
            other => Err(CoreError::UnknownRuleType(other.to_string())),
        }
    }
}

/// Which record family a `/api/pricing` call addresses. Sent as `?type=`
/// on delete and as the body `type` on base-pricing writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingEntity {
    PricingRule,
    BasePricing,
}

impl PricingEntity {
    #[must_use]
    pub fn as_query_value(self) -> &'static str {
        match self {
            PricingEntity::PricingRule => "pricing_rule",
            PricingEntity::BasePricing => "base_pricing",
        }
    }
}

fn default_true() -> bool {
    true
}

/// Accepts `"2025-06-01"` as well as full timestamps such as
/// `"2025-06-01T00:00:00.000Z"`; only the calendar date is kept.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            let day = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

/// A flat discount descriptor. Evaluation against a cart happens server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    /// `None` applies to every category.
    #[serde(default)]
    pub category: Option<ProductCategory>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, deserialize_with = "lenient_date")]
    pub valid_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub valid_until: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PricingRule {
    /// Whether `today` falls inside the rule's validity window. Open ends
    /// are unbounded.
    #[must_use]
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        self.valid_from.is_none_or(|from| from <= today)
            && self.valid_until.is_none_or(|until| today <= until)
    }
}

/// A row of the base price table: one tier label within one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasePricing {
    pub id: EntityId,
    pub category: ProductCategory,
    pub weight_or_quantity: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Response body of `GET /api/pricing`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingCatalog {
    #[serde(default)]
    pub pricing_rules: Vec<PricingRule>,
    #[serde(default)]
    pub base_pricing: Vec<BasePricing>,
}

impl PricingCatalog {
    /// Rules surfaced on the Specials tab.
    #[must_use]
    pub fn specials(&self) -> Vec<Special> {
        self.pricing_rules.iter().filter_map(Special::from_rule).collect()
    }
}

/// Marketing-facing view over a [`PricingRule`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Special {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub special_type: RuleType,
    pub category: Option<ProductCategory>,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub is_active: bool,
    pub valid_until: Option<NaiveDate>,
}

impl Special {
    #[must_use]
    pub fn from_rule(rule: &PricingRule) -> Option<Self> {
        rule.rule_type.is_special_kind().then(|| Self {
            id: rule.id,
            name: rule.name.clone(),
            special_type: rule.rule_type,
            category: rule.category,
            value: rule.value,
            is_active: rule.is_active,
            valid_until: rule.valid_until,
        })
    }
}

/// Body of `POST /api/pricing` and `PUT /api/pricing/:id` for rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRulePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub category: Option<ProductCategory>,
    pub priority: i32,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The `data` of a base-pricing `POST`/`PUT /api/pricing`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasePricingPayload {
    pub category: ProductCategory,
    pub weight_or_quantity: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingRuleDraft {
    pub name: String,
    pub rule_type: RuleType,
    pub value: String,
    pub category: Option<ProductCategory>,
    pub priority: i32,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub is_active: bool,
    pub description: String,
}

impl Default for PricingRuleDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            rule_type: RuleType::PercentageDiscount,
            value: String::new(),
            category: None,
            priority: 0,
            valid_from: None,
            valid_until: None,
            is_active: true,
            description: String::new(),
        }
    }
}

impl From<&PricingRule> for PricingRuleDraft {
    fn from(r: &PricingRule) -> Self {
        Self {
            name: r.name.clone(),
            rule_type: r.rule_type,
            value: r.value.normalize().to_string(),
            category: r.category,
            priority: r.priority,
            valid_from: r.valid_from,
            valid_until: r.valid_until,
            is_active: r.is_active,
            description: r.description.clone().unwrap_or_default(),
        }
    }
}

impl PricingRuleDraft {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name or value is missing, the
    /// value is not a non-negative number, a percentage exceeds 100, or the
    /// validity window ends before it starts.
    pub fn validate(&self) -> Result<PricingRulePayload, ValidationError> {
        let name = required(&self.name, "name")?;
        let value = parse_amount(&self.value, "value")?;
        check_rule_value(self.rule_type, value)?;
        check_window(self.valid_from, self.valid_until)?;

        let description = self.description.trim();
        Ok(PricingRulePayload {
            name,
            rule_type: self.rule_type,
            value,
            category: self.category,
            priority: self.priority,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            is_active: self.is_active,
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

/// Form state for the Specials tab. Specials are stored as pricing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialDraft {
    pub name: String,
    pub special_type: RuleType,
    pub value: String,
    pub category: Option<ProductCategory>,
    pub is_active: bool,
    pub valid_until: Option<NaiveDate>,
}

impl Default for SpecialDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            special_type: RuleType::Special,
            value: String::new(),
            category: None,
            is_active: true,
            valid_until: None,
        }
    }
}

impl From<&Special> for SpecialDraft {
    fn from(s: &Special) -> Self {
        Self {
            name: s.name.clone(),
            special_type: s.special_type,
            value: s.value.normalize().to_string(),
            category: s.category,
            is_active: s.is_active,
            valid_until: s.valid_until,
        }
    }
}

impl SpecialDraft {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name or value is missing or
    /// invalid, or the type is not one the Specials tab offers.
    pub fn validate(&self) -> Result<PricingRulePayload, ValidationError> {
        let name = required(&self.name, "name")?;
        let value = parse_amount(&self.value, "value")?;
        if !self.special_type.is_special_kind() {
            return Err(ValidationError::Invalid(format!(
                "{} is not a special type",
                self.special_type
            )));
        }
        check_rule_value(self.special_type, value)?;

        Ok(PricingRulePayload {
            name,
            rule_type: self.special_type,
            value,
            category: self.category,
            priority: 0,
            valid_from: None,
            valid_until: self.valid_until,
            is_active: self.is_active,
            description: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePricingDraft {
    pub category: ProductCategory,
    pub weight_or_quantity: String,
    pub base_price: String,
    pub is_active: bool,
}

impl Default for BasePricingDraft {
    fn default() -> Self {
        Self {
            category: ProductCategory::Flower,
            weight_or_quantity: String::new(),
            base_price: String::new(),
            is_active: true,
        }
    }
}

impl From<&BasePricing> for BasePricingDraft {
    fn from(t: &BasePricing) -> Self {
        Self {
            category: t.category,
            weight_or_quantity: t.weight_or_quantity.clone(),
            base_price: t.base_price.normalize().to_string(),
            is_active: t.is_active,
        }
    }
}

impl BasePricingDraft {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the tier label or price is missing
    /// or the price is not a non-negative number.
    pub fn validate(&self) -> Result<BasePricingPayload, ValidationError> {
        let weight_or_quantity = required(&self.weight_or_quantity, "weight or quantity")?;
        let base_price = parse_amount(&self.base_price, "base price")?;
        Ok(BasePricingPayload {
            category: self.category,
            weight_or_quantity,
            base_price,
            is_active: self.is_active,
        })
    }
}

pub(crate) fn required(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Parses a non-negative amount; a leading `$` or trailing `%` is tolerated.
pub(crate) fn parse_amount(raw: &str, field: &'static str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    let cleaned = trimmed.trim_start_matches('$').trim_end_matches('%').trim();
    let invalid = || ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    };
    let value = Decimal::from_str(cleaned).map_err(|_| invalid())?;
    if value.is_sign_negative() {
        return Err(invalid());
    }
    Ok(value)
}

fn check_rule_value(rule_type: RuleType, value: Decimal) -> Result<(), ValidationError> {
    if rule_type == RuleType::PercentageDiscount && value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::Invalid(
            "percentage discount cannot exceed 100".to_string(),
        ));
    }
    Ok(())
}

fn check_window(from: Option<NaiveDate>, until: Option<NaiveDate>) -> Result<(), ValidationError> {
    if let (Some(from), Some(until)) = (from, until) {
        if until < from {
            return Err(ValidationError::Invalid(
                "valid until must not be before valid from".to_string(),
            ));
        }
    }
    Ok(())
}
