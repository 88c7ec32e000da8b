use serde::{Deserialize, Serialize};

use crate::products::ProductCategory;

/// Storefront menu configuration served by `/api/menu-settings`.
///
/// Fields this client does not know about are carried in `extra` so a save
/// never drops settings written by a newer backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSettings {
    #[serde(default = "default_category_order")]
    pub category_order: Vec<ProductCategory>,
    #[serde(default)]
    pub show_out_of_stock: bool,
    #[serde(default)]
    pub featured_category: Option<ProductCategory>,
    #[serde(default)]
    pub announcement: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_category_order() -> Vec<ProductCategory> {
    ProductCategory::ALL.to_vec()
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            category_order: default_category_order(),
            show_out_of_stock: false,
            featured_category: None,
            announcement: None,
            extra: serde_json::Map::new(),
        }
    }
}

impl MenuSettings {
    /// Categories in configured order, with any category the backend left
    /// out appended in default order.
    #[must_use]
    pub fn ordered_categories(&self) -> Vec<ProductCategory> {
        let mut order: Vec<ProductCategory> = Vec::with_capacity(ProductCategory::ALL.len());
        for category in self
            .category_order
            .iter()
            .chain(ProductCategory::ALL.iter())
        {
            if !order.contains(category) {
                order.push(*category);
            }
        }
        order
    }
}
