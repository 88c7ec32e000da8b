use canopy_core::EntityId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("{0} has no purchasable price")]
    Unpriced(String),

    #[error("product {product_id} ({weight}) is not in the cart")]
    NotInCart { product_id: EntityId, weight: String },
}
