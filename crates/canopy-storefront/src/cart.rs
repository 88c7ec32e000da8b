//! Shopping cart shared by the product pages and the header drawer.

use canopy_core::{EntityId, Product};
use rust_decimal::Decimal;

use crate::error::CartError;

/// One line in the cart: a product at a particular weight or pack size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: EntityId,
    pub title: String,
    /// Tier label, e.g. `"3.5g"` or `"2 packs"`.
    pub weight: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    /// Builds a line from a menu product. The product's display price is
    /// used as the unit price.
    ///
    /// # Errors
    ///
    /// [`CartError::ZeroQuantity`] for a zero quantity and
    /// [`CartError::Unpriced`] when the price label does not parse.
    pub fn from_product(product: &Product, weight: &str, quantity: u32) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        let unit_price = product
            .price_value()
            .ok_or_else(|| CartError::Unpriced(product.name.clone()))?;
        Ok(Self {
            product_id: product.id,
            title: product.name.clone(),
            weight: weight.trim().to_string(),
            unit_price,
            quantity,
        })
    }

    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    fn same_line(&self, product_id: EntityId, weight: &str) -> bool {
        self.product_id == product_id && self.weight == weight.trim()
    }
}

/// A drawer row, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerLine {
    pub product_id: EntityId,
    pub title: String,
    /// `"3.5g • $45.00"`.
    pub detail: String,
    pub quantity: u32,
    pub line_total: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `item`. A line for the same product and weight absorbs the
    /// quantity instead of appearing twice.
    ///
    /// # Errors
    ///
    /// [`CartError::ZeroQuantity`] if `item.quantity` is zero.
    pub fn add(&mut self, item: CartItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        match self
            .items
            .iter_mut()
            .find(|line| line.same_line(item.product_id, &item.weight))
        {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => {
                tracing::debug!(product_id = item.product_id, weight = %item.weight, "cart line added");
                self.items.push(item);
            }
        }
        Ok(())
    }

    /// Sets a line's quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// [`CartError::NotInCart`] when no such line exists.
    pub fn set_quantity(
        &mut self,
        product_id: EntityId,
        weight: &str,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(product_id, weight);
        }
        let line = self
            .items
            .iter_mut()
            .find(|line| line.same_line(product_id, weight))
            .ok_or_else(|| CartError::NotInCart {
                product_id,
                weight: weight.to_string(),
            })?;
        line.quantity = quantity;
        Ok(())
    }

    /// # Errors
    ///
    /// [`CartError::NotInCart`] when no such line exists.
    pub fn remove(&mut self, product_id: EntityId, weight: &str) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|line| !line.same_line(product_id, weight));
        if self.items.len() == before {
            return Err(CartError::NotInCart {
                product_id,
                weight: weight.to_string(),
            });
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total units across all lines; this is the header badge number.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |total, line| total.saturating_add(line.quantity))
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Subtotal with two decimals, e.g. `"$57.50"`.
    #[must_use]
    pub fn subtotal_label(&self) -> String {
        format!("${:.2}", self.subtotal().round_dp(2))
    }

    #[must_use]
    pub fn drawer_lines(&self) -> Vec<DrawerLine> {
        self.items
            .iter()
            .map(|line| DrawerLine {
                product_id: line.product_id,
                title: line.title.clone(),
                detail: format!("{} • ${:.2}", line.weight, line.unit_price.round_dp(2)),
                quantity: line.quantity,
                line_total: format!("${:.2}", line.line_total().round_dp(2)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: EntityId, weight: &str, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id,
            title: format!("Product {product_id}"),
            weight: weight.to_string(),
            unit_price: Decimal::new(cents, 2),
            quantity,
        }
    }

    #[test]
    fn add_merges_same_product_and_weight() {
        let mut cart = Cart::new();
        cart.add(item(1, "3.5g", 4500, 1)).unwrap();
        cart.add(item(1, "3.5g", 4500, 2)).unwrap();
        cart.add(item(1, "7g", 8000, 1)).unwrap();
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn huge_quantities_saturate() {
        let mut cart = Cart::new();
        cart.add(item(1, "1g", 1000, u32::MAX)).unwrap();
        cart.add(item(1, "1g", 1000, 1)).unwrap();
        cart.add(item(2, "1g", 1000, 5)).unwrap();
        assert_eq!(cart.items()[0].quantity, u32::MAX);
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn zero_quantity_is_rejected_on_add_and_removes_on_set() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(item(1, "1g", 1000, 0)), Err(CartError::ZeroQuantity));
        cart.add(item(1, "1g", 1000, 2)).unwrap();
        cart.set_quantity(1, "1g", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_on_missing_line_errors() {
        let mut cart = Cart::new();
        cart.add(item(1, "1g", 1000, 1)).unwrap();
        assert!(matches!(
            cart.set_quantity(1, "28g", 2),
            Err(CartError::NotInCart { product_id: 1, .. })
        ));
        assert!(cart.remove(2, "1g").is_err());
    }

    #[test]
    fn subtotal_and_drawer_lines() {
        let mut cart = Cart::new();
        cart.add(item(1, "3.5g", 4500, 1)).unwrap();
        cart.add(item(2, "1 pack", 1250, 2)).unwrap();
        assert_eq!(cart.subtotal(), Decimal::new(7000, 2));
        assert_eq!(cart.subtotal_label(), "$70.00");

        let lines = cart.drawer_lines();
        assert_eq!(lines[1].detail, "1 pack • $12.50");
        assert_eq!(lines[1].line_total, "$25.00");

        cart.clear();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal_label(), "$0.00");
    }

    #[test]
    fn from_product_parses_display_price() {
        let product = priced_product("$45");
        let line = CartItem::from_product(&product, " 3.5g ", 1).unwrap();
        assert_eq!(line.unit_price, Decimal::new(45, 0));
        assert_eq!(line.weight, "3.5g");

        let unpriced = priced_product("call for price");
        assert!(matches!(
            CartItem::from_product(&unpriced, "1g", 1),
            Err(CartError::Unpriced(_))
        ));
    }

    fn priced_product(price: &str) -> Product {
        Product {
            id: 9,
            name: "Blue Dream".to_string(),
            category: canopy_core::ProductCategory::Flower,
            product_type: "sativa".to_string(),
            price: price.to_string(),
            thca: None,
            dosage: None,
            terpenes: Vec::new(),
            effects: Vec::new(),
            in_stock: true,
            sort_order: 0,
            description: None,
        }
    }
}
