//! Price previews shown next to pricing and bundle forms.
//!
//! These figures are for the admin's orientation only. The backend's pricing
//! engine decides what a live cart is charged and may stack or prioritise
//! rules differently.

use rust_decimal::Decimal;

use crate::bundles::{Bundle, BundleConditions};
use crate::pricing::RuleType;
use crate::products::Product;

/// Price after applying one rule to `base`, never below zero.
///
/// `special` and `bundle` rules carry a promotional price in `value` and are
/// previewed like `fixed_price`.
#[must_use]
pub fn discounted_price(base: Decimal, rule_type: RuleType, value: Decimal) -> Decimal {
    let price = match rule_type {
        RuleType::PercentageDiscount => {
            let pct = value.min(Decimal::ONE_HUNDRED);
            base - base * pct / Decimal::ONE_HUNDRED
        }
        RuleType::FixedDiscount => base - value,
        RuleType::FixedPrice | RuleType::Special | RuleType::Bundle => value,
    };
    price.max(Decimal::ZERO).round_dp(2)
}

/// Percentage saved going from `original` to `discounted`, to one decimal.
/// Returns zero when there is nothing to compare against.
#[must_use]
pub fn savings_percent(original: Decimal, discounted: Decimal) -> Decimal {
    if original <= Decimal::ZERO || discounted >= original {
        return Decimal::ZERO;
    }
    ((original - discounted) / original * Decimal::ONE_HUNDRED).round_dp(1)
}

/// Gross margin of selling at `price` with unit `cost`, as a percentage.
#[must_use]
pub fn margin_percent(price: Decimal, cost: Decimal) -> Decimal {
    if price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    ((price - cost) / price * Decimal::ONE_HUNDRED).round_dp(1)
}

/// Sum of component prices for a `specific` bundle, looked up in `products`.
///
/// Returns `None` for category bundles, or when any component is missing or
/// unpriced.
#[must_use]
pub fn bundle_component_total(bundle: &Bundle, products: &[Product]) -> Option<Decimal> {
    let BundleConditions::Specific {
        specific_products, ..
    } = &bundle.conditions
    else {
        return None;
    };
    specific_products.iter().try_fold(Decimal::ZERO, |acc, item| {
        let product = products.iter().find(|p| p.id == item.product_id)?;
        Some(acc + product.price_value()? * Decimal::from(item.quantity))
    })
}

/// Savings a customer sees buying the bundle instead of its parts.
#[must_use]
pub fn bundle_savings(bundle: &Bundle, products: &[Product]) -> Option<(Decimal, Decimal)> {
    let total = bundle_component_total(bundle, products)?;
    let saved = (total - bundle.value).max(Decimal::ZERO);
    Some((saved, savings_percent(total, bundle.value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundles::BundleItem;
    use crate::products::ProductCategory;

    fn d(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    #[test]
    fn percentage_discount_is_capped_at_full_price() {
        assert_eq!(
            discounted_price(d(40), RuleType::PercentageDiscount, d(25)),
            d(30)
        );
        assert_eq!(
            discounted_price(d(40), RuleType::PercentageDiscount, d(150)),
            d(0)
        );
    }

    #[test]
    fn fixed_discount_never_goes_negative() {
        assert_eq!(discounted_price(d(10), RuleType::FixedDiscount, d(4)), d(6));
        assert_eq!(discounted_price(d(10), RuleType::FixedDiscount, d(15)), d(0));
    }

    #[test]
    fn fixed_price_replaces_base() {
        assert_eq!(discounted_price(d(50), RuleType::FixedPrice, d(35)), d(35));
    }

    #[test]
    fn savings_and_margin_round_to_one_place() {
        assert_eq!(savings_percent(d(30), d(20)), Decimal::new(333, 1));
        assert_eq!(savings_percent(d(0), d(20)), Decimal::ZERO);
        assert_eq!(savings_percent(d(20), d(25)), Decimal::ZERO);
        assert_eq!(margin_percent(d(40), d(10)), Decimal::new(750, 1));
        assert_eq!(margin_percent(d(0), d(10)), Decimal::ZERO);
    }

    #[test]
    fn bundle_savings_uses_component_prices() {
        let products = vec![Product {
            id: 1,
            name: "Gelato".to_string(),
            category: ProductCategory::Flower,
            product_type: "hybrid".to_string(),
            price: "$30".to_string(),
            thca: None,
            dosage: None,
            terpenes: vec![],
            effects: vec![],
            in_stock: true,
            sort_order: 0,
            description: None,
        }];
        let bundle = Bundle {
            id: 1,
            name: "Double Gelato".to_string(),
            description: String::new(),
            value: d(50),
            conditions: BundleConditions::Specific {
                specific_products: vec![BundleItem {
                    product_id: 1,
                    quantity: 2,
                }],
                product_details: vec![],
            },
        };
        let (saved, pct) = bundle_savings(&bundle, &products).unwrap();
        assert_eq!(saved, d(10));
        assert_eq!(pct, Decimal::new(167, 1));

        assert!(bundle_component_total(&bundle, &[]).is_none());
    }
}
