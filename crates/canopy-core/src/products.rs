use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::{CoreError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Flower,
    Vapes,
    Edibles,
}

impl ProductCategory {
    /// Display order used by the shop menu and the tier tables.
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Flower,
        ProductCategory::Vapes,
        ProductCategory::Edibles,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Flower => "flower",
            ProductCategory::Vapes => "vapes",
            ProductCategory::Edibles => "edibles",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::Flower => "Flower",
            ProductCategory::Vapes => "Vapes",
            ProductCategory::Edibles => "Edibles",
        }
    }

    /// Which optional product attributes make sense for this category.
    #[must_use]
    pub fn applicable_fields(self) -> ApplicableFields {
        match self {
            ProductCategory::Flower | ProductCategory::Vapes => ApplicableFields {
                thca: true,
                dosage: false,
                terpenes: true,
            },
            ProductCategory::Edibles => ApplicableFields {
                thca: false,
                dosage: true,
                terpenes: false,
            },
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flower" => Ok(ProductCategory::Flower),
            "vapes" | "vape" => Ok(ProductCategory::Vapes),
            "edibles" | "edible" => Ok(ProductCategory::Edibles),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}

/// Optional attributes a product form shows for a given category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicableFields {
    pub thca: bool,
    pub dosage: bool,
    pub terpenes: bool,
}

/// A menu item as returned by `GET /api/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub category: ProductCategory,
    /// Strain or form factor, e.g. `"hybrid"` or `"gummies"`.
    #[serde(rename = "type", default)]
    pub product_type: String,
    /// Display price exactly as the menu shows it, e.g. `"$45"`.
    #[serde(default)]
    pub price: String,
    /// THCa percentage label, e.g. `"27%"`. Flower and vapes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thca: Option<String>,
    /// Per-unit dose label, e.g. `"10mg"`. Edibles only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terpenes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<String>,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Parsed numeric price, if the display string holds one.
    #[must_use]
    pub fn price_value(&self) -> Option<Decimal> {
        parse_display_price(&self.price)
    }
}

/// Editable form state for creating or updating a product.
///
/// Every field mirrors a form control, so list-valued attributes are held as
/// the comma-separated text the user types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: ProductCategory,
    pub product_type: String,
    pub price: String,
    pub thca: String,
    pub dosage: String,
    pub terpenes: String,
    pub effects: String,
    pub in_stock: bool,
    pub sort_order: i32,
    pub description: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: ProductCategory::Flower,
            product_type: String::new(),
            price: String::new(),
            thca: String::new(),
            dosage: String::new(),
            terpenes: String::new(),
            effects: String::new(),
            in_stock: true,
            sort_order: 0,
            description: String::new(),
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            category: p.category,
            product_type: p.product_type.clone(),
            price: p.price.clone(),
            thca: p.thca.clone().unwrap_or_default(),
            dosage: p.dosage.clone().unwrap_or_default(),
            terpenes: p.terpenes.join(", "),
            effects: p.effects.join(", "),
            in_stock: p.in_stock,
            sort_order: p.sort_order,
            description: p.description.clone().unwrap_or_default(),
        }
    }
}

impl ProductDraft {
    /// Checks required fields and builds the request body.
    ///
    /// Attributes that do not apply to the selected category are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when the name is blank and
    /// [`ValidationError::InvalidNumber`] when a non-blank price does not parse.
    pub fn validate(&self) -> Result<ProductPayload, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        let price = if self.price.trim().is_empty() {
            String::new()
        } else {
            let value =
                parse_display_price(&self.price).ok_or_else(|| ValidationError::InvalidNumber {
                    field: "price",
                    value: self.price.clone(),
                })?;
            format_display_price(value)
        };

        let fields = self.category.applicable_fields();
        Ok(ProductPayload {
            name: name.to_string(),
            category: self.category,
            product_type: self.product_type.trim().to_string(),
            price,
            thca: fields.thca.then(|| non_blank(&self.thca)).flatten(),
            dosage: fields.dosage.then(|| non_blank(&self.dosage)).flatten(),
            terpenes: if fields.terpenes {
                split_list(&self.terpenes)
            } else {
                Vec::new()
            },
            effects: split_list(&self.effects),
            in_stock: self.in_stock,
            sort_order: self.sort_order,
            description: non_blank(&self.description),
        })
    }
}

/// Body of `POST /api/products` and `PUT /api/products/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub category: ProductCategory,
    #[serde(rename = "type")]
    pub product_type: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub terpenes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<String>,
    pub in_stock: bool,
    pub sort_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parse a menu price label such as `"$45"`, `"$1,200"` or `"12.50"`.
#[must_use]
pub fn parse_display_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let value = Decimal::from_str(cleaned.trim()).ok()?;
    (!value.is_sign_negative()).then_some(value)
}

/// Format a price the way the menu shows it: whole dollars without cents,
/// anything else with two decimal places.
#[must_use]
pub fn format_display_price(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    if rounded.fract().is_zero() {
        format!("${}", rounded.trunc())
    } else {
        format!("${rounded:.2}")
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flower_draft() -> ProductDraft {
        ProductDraft {
            name: "  Blue Dream ".to_string(),
            category: ProductCategory::Flower,
            product_type: "hybrid".to_string(),
            price: "45".to_string(),
            thca: "24%".to_string(),
            dosage: "10mg".to_string(),
            terpenes: "myrcene, pinene,,".to_string(),
            effects: "relaxed, happy".to_string(),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn validate_rejects_blank_name() {
        let draft = ProductDraft {
            name: "   ".to_string(),
            ..ProductDraft::default()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::MissingField("name")
        );
    }

    #[test]
    fn validate_trims_and_drops_fields_outside_category() {
        let payload = flower_draft().validate().expect("draft should be valid");
        assert_eq!(payload.name, "Blue Dream");
        assert_eq!(payload.price, "$45");
        assert_eq!(payload.thca.as_deref(), Some("24%"));
        assert!(payload.dosage.is_none(), "flower has no dosage");
        assert_eq!(payload.terpenes, vec!["myrcene", "pinene"]);
        assert_eq!(payload.effects, vec!["relaxed", "happy"]);
    }

    #[test]
    fn validate_keeps_dosage_for_edibles() {
        let draft = ProductDraft {
            category: ProductCategory::Edibles,
            ..flower_draft()
        };
        let payload = draft.validate().unwrap();
        assert_eq!(payload.dosage.as_deref(), Some("10mg"));
        assert!(payload.thca.is_none());
        assert!(payload.terpenes.is_empty());
    }

    #[test]
    fn validate_rejects_unparseable_price() {
        let draft = ProductDraft {
            price: "forty".to_string(),
            ..flower_draft()
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidNumber { field: "price", .. })
        ));
    }

    #[test]
    fn payload_serializes_type_field_and_skips_empty_lists() {
        let draft = ProductDraft {
            name: "Sour Gummies".to_string(),
            category: ProductCategory::Edibles,
            product_type: "gummies".to_string(),
            ..ProductDraft::default()
        };
        let json = serde_json::to_value(draft.validate().unwrap()).unwrap();
        assert_eq!(json["type"], "gummies");
        assert_eq!(json["category"], "edibles");
        assert!(json.get("terpenes").is_none());
        assert!(json.get("thca").is_none());
    }

    #[test]
    fn product_deserializes_with_missing_optional_fields() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Live Resin Cart",
            "category": "vapes",
            "type": "cartridge",
            "price": "$40",
            "in_stock": true,
            "sort_order": 3
        }))
        .unwrap();
        assert_eq!(product.category, ProductCategory::Vapes);
        assert!(product.terpenes.is_empty());
        assert_eq!(product.price_value(), Some(Decimal::new(40, 0)));
    }

    #[test]
    fn draft_from_product_joins_lists() {
        let product = Product {
            id: 1,
            name: "Gelato".to_string(),
            category: ProductCategory::Flower,
            product_type: "hybrid".to_string(),
            price: "$50".to_string(),
            thca: Some("28%".to_string()),
            dosage: None,
            terpenes: vec!["limonene".to_string(), "caryophyllene".to_string()],
            effects: vec![],
            in_stock: false,
            sort_order: 2,
            description: None,
        };
        let draft = ProductDraft::from(&product);
        assert_eq!(draft.terpenes, "limonene, caryophyllene");
        assert_eq!(draft.thca, "28%");
        assert!(!draft.in_stock);
    }

    #[test]
    fn parse_display_price_handles_common_shapes() {
        assert_eq!(parse_display_price("$45"), Some(Decimal::new(45, 0)));
        assert_eq!(parse_display_price(" $12.50 "), Some(Decimal::new(1250, 2)));
        assert_eq!(parse_display_price("$1,200"), Some(Decimal::new(1200, 0)));
        assert_eq!(parse_display_price("$"), None);
        assert_eq!(parse_display_price("-5"), None);
        assert_eq!(parse_display_price("ask"), None);
    }

    #[test]
    fn format_display_price_drops_zero_cents() {
        assert_eq!(format_display_price(Decimal::new(4500, 2)), "$45");
        assert_eq!(format_display_price(Decimal::new(1250, 2)), "$12.50");
        assert_eq!(format_display_price(Decimal::new(9999, 3)), "$10");
    }

    #[test]
    fn category_parses_singular_and_plural() {
        assert_eq!("Vape".parse::<ProductCategory>().unwrap(), ProductCategory::Vapes);
        assert_eq!(
            "edibles".parse::<ProductCategory>().unwrap(),
            ProductCategory::Edibles
        );
        assert!("tinctures".parse::<ProductCategory>().is_err());
    }
}
