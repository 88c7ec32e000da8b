//! Display ordering for base-pricing tiers.
//!
//! Tier labels are free text. Two canonical labels compare by their place in
//! the menu; any pair involving another label compares as text.

use std::cmp::Ordering;

use crate::pricing::BasePricing;
use crate::products::ProductCategory;

/// Canonical tier labels in display order. Matched exactly.
pub const TIER_ORDER: &[&str] = &[
    "1g", "3.5g", "7g", "14g", "28g", "1 cart", "2 carts", "3 carts", "1 pack", "2 packs",
    "3 packs", "1 roll", "3 rolls", "5 rolls",
];

fn rank(label: &str) -> Option<usize> {
    TIER_ORDER.iter().position(|t| *t == label)
}

/// Orders two tier labels.
///
/// When both labels are in [`TIER_ORDER`] they compare by position.
/// Otherwise they compare as text, ignoring case first.
#[must_use]
pub fn compare_tiers(a: &str, b: &str) -> Ordering {
    match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
    }
}

/// Sorts tiers in place by their weight or quantity label.
///
/// [`compare_tiers`] is not transitive once canonical and free-text labels
/// mix, so this is a stable insertion sort rather than `slice::sort_by`.
pub fn sort_tiers(tiers: &mut [BasePricing]) {
    for i in 1..tiers.len() {
        let mut j = i;
        while j > 0
            && compare_tiers(&tiers[j - 1].weight_or_quantity, &tiers[j].weight_or_quantity)
                == Ordering::Greater
        {
            tiers.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Groups active tiers by category in menu order, each group sorted for
/// display. Inactive tiers and categories with no active tiers are omitted.
#[must_use]
pub fn tiers_by_category(tiers: &[BasePricing]) -> Vec<(ProductCategory, Vec<BasePricing>)> {
    ProductCategory::ALL
        .iter()
        .filter_map(|&category| {
            let mut group: Vec<BasePricing> = tiers
                .iter()
                .filter(|t| t.category == category && t.is_active)
                .cloned()
                .collect();
            if group.is_empty() {
                return None;
            }
            sort_tiers(&mut group);
            Some((category, group))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn tier(id: i64, category: ProductCategory, label: &str) -> BasePricing {
        BasePricing {
            id,
            category,
            weight_or_quantity: label.to_string(),
            base_price: Decimal::new(10, 0),
            is_active: true,
        }
    }

    fn labels(tiers: &[BasePricing]) -> Vec<&str> {
        tiers.iter().map(|t| t.weight_or_quantity.as_str()).collect()
    }

    #[test]
    fn flower_weights_sort_by_canonical_order() {
        let mut tiers = vec![
            tier(1, ProductCategory::Flower, "28g"),
            tier(2, ProductCategory::Flower, "1g"),
            tier(3, ProductCategory::Flower, "14g"),
        ];
        sort_tiers(&mut tiers);
        assert_eq!(labels(&tiers), vec!["1g", "14g", "28g"]);
    }

    #[test]
    fn canonical_order_beats_lexical_order() {
        // Lexically "14g" < "3.5g" < "7g"; the menu order differs.
        let mut tiers = vec![
            tier(1, ProductCategory::Flower, "7g"),
            tier(2, ProductCategory::Flower, "14g"),
            tier(3, ProductCategory::Flower, "3.5g"),
        ];
        sort_tiers(&mut tiers);
        assert_eq!(labels(&tiers), vec!["3.5g", "7g", "14g"]);
    }

    #[test]
    fn a_free_text_label_compares_as_text_against_anything() {
        // "10g" is not canonical, so "14g" vs "10g" is a text comparison.
        let mut tiers = vec![
            tier(1, ProductCategory::Flower, "14g"),
            tier(2, ProductCategory::Flower, "10g"),
        ];
        sort_tiers(&mut tiers);
        assert_eq!(labels(&tiers), vec!["10g", "14g"]);
        assert_eq!(compare_tiers("14g", "10g"), Ordering::Greater);
    }

    #[test]
    fn mixed_pack_labels_sort_by_text_outside_the_table() {
        let mut tiers = vec![
            tier(1, ProductCategory::Edibles, "single"),
            tier(2, ProductCategory::Edibles, "2 packs"),
            tier(3, ProductCategory::Edibles, "bulk"),
            tier(4, ProductCategory::Edibles, "1 pack"),
        ];
        sort_tiers(&mut tiers);
        assert_eq!(labels(&tiers), vec!["1 pack", "2 packs", "bulk", "single"]);
    }

    #[test]
    fn preroll_counts_are_canonical() {
        assert_eq!(compare_tiers("5 rolls", "3 rolls"), Ordering::Greater);
        assert_eq!(compare_tiers("3 packs", "1 roll"), Ordering::Less);
    }

    #[test]
    fn canonical_match_is_exact() {
        // "7G" is not "7g", so this is "7g" vs "14g" as text.
        assert_eq!(compare_tiers("7G", "14g"), Ordering::Greater);
        assert_eq!(compare_tiers("7g", "14g"), Ordering::Less);
        assert_eq!(compare_tiers(" 1g", "1g"), Ordering::Less);
    }

    #[test]
    fn inconsistent_mix_sorts_without_panicking() {
        let mut tiers = vec![
            tier(1, ProductCategory::Flower, "2oz"),
            tier(2, ProductCategory::Flower, "28g"),
            tier(3, ProductCategory::Flower, "3.5g"),
        ];
        sort_tiers(&mut tiers);
        assert_eq!(tiers.len(), 3);
    }

    #[test]
    fn grouping_follows_category_order_and_skips_empty() {
        let mut retired = tier(4, ProductCategory::Vapes, "1 cart");
        retired.is_active = false;
        let tiers = vec![
            tier(1, ProductCategory::Edibles, "1 pack"),
            tier(2, ProductCategory::Flower, "7g"),
            tier(3, ProductCategory::Flower, "1g"),
            retired,
        ];
        let groups = tiers_by_category(&tiers);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, ProductCategory::Flower);
        assert_eq!(labels(&groups[0].1), vec!["1g", "7g"]);
        assert_eq!(groups[1].0, ProductCategory::Edibles);
    }
}
