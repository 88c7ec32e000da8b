use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::pricing::{parse_amount, required};
use crate::products::ProductCategory;
use crate::ValidationError;

/// One explicit product in a `specific` bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleItem {
    pub product_id: EntityId,
    pub quantity: u32,
}

/// Product summary the backend attaches to `specific` bundles for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleProductDetail {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default = "one")]
    pub quantity: u32,
}

/// "Any `quantity` items from `category`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRequirement {
    pub category: ProductCategory,
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

/// How a bundle is composed. The two modes are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "bundle_type", rename_all = "snake_case")]
pub enum BundleConditions {
    Specific {
        #[serde(default)]
        specific_products: Vec<BundleItem>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        product_details: Vec<BundleProductDetail>,
    },
    Category {
        #[serde(default)]
        category_requirements: Vec<CategoryRequirement>,
    },
}

fn saturating_total(quantities: impl Iterator<Item = u32>) -> u32 {
    quantities.fold(0, u32::saturating_add)
}

impl BundleConditions {
    /// Total number of units a customer must add to satisfy the bundle.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        match self {
            BundleConditions::Specific {
                specific_products, ..
            } => saturating_total(specific_products.iter().map(|i| i.quantity)),
            BundleConditions::Category {
                category_requirements,
            } => saturating_total(category_requirements.iter().map(|r| r.quantity)),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            BundleConditions::Specific {
                specific_products, ..
            } => specific_products.is_empty(),
            BundleConditions::Category {
                category_requirements,
            } => category_requirements.is_empty(),
        }
    }
}

/// A composite offer priced as a single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Bundle price.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub conditions: BundleConditions,
}

/// Body of `POST /api/bundles`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundlePayload {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub conditions: BundleConditions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BundleDraft {
    pub name: String,
    pub description: String,
    pub value: String,
    pub conditions: BundleConditions,
}

impl Default for BundleDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            value: String::new(),
            conditions: BundleConditions::Specific {
                specific_products: Vec::new(),
                product_details: Vec::new(),
            },
        }
    }
}

impl BundleDraft {
    /// Switches composition mode. The other mode's entries are discarded.
    pub fn set_category_mode(&mut self, category_mode: bool) {
        self.conditions = if category_mode {
            BundleConditions::Category {
                category_requirements: Vec::new(),
            }
        } else {
            BundleConditions::Specific {
                specific_products: Vec::new(),
                product_details: Vec::new(),
            }
        };
    }

    /// Adds a product line, merging quantities when the product is already
    /// listed. Ignored in category mode.
    pub fn add_product(&mut self, product_id: EntityId, quantity: u32) {
        if let BundleConditions::Specific {
            specific_products, ..
        } = &mut self.conditions
        {
            match specific_products
                .iter_mut()
                .find(|i| i.product_id == product_id)
            {
                Some(item) => item.quantity = item.quantity.saturating_add(quantity),
                None => specific_products.push(BundleItem {
                    product_id,
                    quantity,
                }),
            }
        }
    }

    /// Adds a category requirement, merging quantities per category.
    /// Ignored in specific-product mode.
    pub fn add_category_requirement(&mut self, category: ProductCategory, quantity: u32) {
        if let BundleConditions::Category {
            category_requirements,
        } = &mut self.conditions
        {
            match category_requirements
                .iter_mut()
                .find(|r| r.category == category)
            {
                Some(req) => req.quantity = req.quantity.saturating_add(quantity),
                None => category_requirements.push(CategoryRequirement { category, quantity }),
            }
        }
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name or price is missing or
    /// invalid, or the bundle lists no products or category requirements.
    pub fn validate(&self) -> Result<BundlePayload, ValidationError> {
        let name = required(&self.name, "name")?;
        let value = parse_amount(&self.value, "value")?;
        if self.conditions.is_empty() {
            return Err(ValidationError::Invalid(
                "a bundle needs at least one product or category requirement".to_string(),
            ));
        }
        if self.conditions.unit_count() == 0 {
            return Err(ValidationError::Invalid(
                "bundle quantities must be positive".to_string(),
            ));
        }
        Ok(BundlePayload {
            name,
            description: self.description.trim().to_string(),
            value,
            conditions: self.conditions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_deserialize_by_bundle_type() {
        let bundle: Bundle = serde_json::from_value(serde_json::json!({
            "id": 9,
            "name": "Starter Pack",
            "description": "Two eighths and a cart",
            "value": 80,
            "conditions": {
                "bundle_type": "category",
                "category_requirements": [
                    { "category": "flower", "quantity": 2 },
                    { "category": "vapes", "quantity": 1 }
                ]
            }
        }))
        .unwrap();
        assert!(matches!(bundle.conditions, BundleConditions::Category { .. }));
        assert_eq!(bundle.conditions.unit_count(), 3);
    }

    #[test]
    fn specific_bundle_reads_product_details() {
        let bundle: Bundle = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Date Night",
            "value": 55.5,
            "conditions": {
                "bundle_type": "specific",
                "specific_products": [{ "product_id": 1, "quantity": 2 }],
                "product_details": [{ "id": 1, "name": "Gelato", "price": "$30" }]
            }
        }))
        .unwrap();
        match &bundle.conditions {
            BundleConditions::Specific {
                specific_products,
                product_details,
            } => {
                assert_eq!(specific_products[0].quantity, 2);
                assert_eq!(product_details[0].quantity, 1);
            }
            BundleConditions::Category { .. } => panic!("expected specific bundle"),
        }
        assert_eq!(bundle.description, "");
    }

    #[test]
    fn draft_merges_repeated_products() {
        let mut draft = BundleDraft::default();
        draft.add_product(5, 1);
        draft.add_product(5, 2);
        draft.add_product(6, 1);
        draft.add_category_requirement(ProductCategory::Flower, 1);
        assert_eq!(draft.conditions.unit_count(), 4);
    }

    #[test]
    fn merged_quantities_saturate_instead_of_overflowing() {
        let mut draft = BundleDraft::default();
        draft.add_product(5, u32::MAX);
        draft.add_product(5, 3);
        draft.add_product(6, 2);
        assert_eq!(draft.conditions.unit_count(), u32::MAX);
    }

    #[test]
    fn switching_mode_discards_entries() {
        let mut draft = BundleDraft::default();
        draft.add_product(5, 1);
        draft.set_category_mode(true);
        assert_eq!(draft.conditions.unit_count(), 0);
        draft.add_category_requirement(ProductCategory::Edibles, 2);
        draft.add_category_requirement(ProductCategory::Edibles, 1);
        assert_eq!(draft.conditions.unit_count(), 3);
    }

    #[test]
    fn validate_requires_composition() {
        let draft = BundleDraft {
            name: "Empty".to_string(),
            value: "10".to_string(),
            ..BundleDraft::default()
        };
        assert!(matches!(draft.validate(), Err(ValidationError::Invalid(_))));
    }

    #[test]
    fn validate_builds_tagged_payload() {
        let mut draft = BundleDraft {
            name: " Sampler ".to_string(),
            value: "$60".to_string(),
            ..BundleDraft::default()
        };
        draft.set_category_mode(true);
        draft.add_category_requirement(ProductCategory::Edibles, 3);
        let json = serde_json::to_value(draft.validate().unwrap()).unwrap();
        assert_eq!(json["name"], "Sampler");
        assert_eq!(json["value"], serde_json::json!(60.0));
        assert_eq!(json["conditions"]["bundle_type"], "category");
        assert_eq!(
            json["conditions"]["category_requirements"][0]["quantity"],
            3
        );
    }
}
