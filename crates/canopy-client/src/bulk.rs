use canopy_core::{EntityId, ProductCategory};
use serde::Serialize;

/// Actions accepted by `POST /api/products/bulk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Update,
    Clone,
    Delete,
}

impl BulkAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BulkAction::Update => "update",
            BulkAction::Clone => "clone",
            BulkAction::Delete => "delete",
        }
    }
}

impl std::fmt::Display for BulkAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BulkAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "update" => Ok(BulkAction::Update),
            "clone" => Ok(BulkAction::Clone),
            "delete" => Ok(BulkAction::Delete),
            other => Err(format!("unknown bulk action: {other}")),
        }
    }
}

/// Body of `POST /api/products/bulk`: `{action, productIds, ...data}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkRequest {
    pub action: BulkAction,
    #[serde(rename = "productIds")]
    pub product_ids: Vec<EntityId>,
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl BulkRequest {
    #[must_use]
    pub fn new(action: BulkAction, product_ids: Vec<EntityId>) -> Self {
        Self {
            action,
            product_ids,
            data: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: serde_json::Map<String, serde_json::Value>) -> Self {
        self.data = data;
        self
    }
}

/// Field changes applied to every selected product by a bulk `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductBulkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl ProductBulkUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.in_stock.is_none() && self.category.is_none() && self.price.is_none()
    }

    /// The request data for a bulk `update`: the changed fields nested
    /// under `updates`, ready to be flattened into a [`BulkRequest`].
    #[must_use]
    pub fn into_data(self) -> serde_json::Map<String, serde_json::Value> {
        let fields = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        let mut data = serde_json::Map::new();
        data.insert("updates".to_string(), serde_json::Value::Object(fields));
        data
    }
}
