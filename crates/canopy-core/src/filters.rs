//! Product filter state shared by the storefront filter bar and the admin
//! product table.
//!
//! The filter bar is a set of controlled inputs whose values live in the page
//! query string, so [`ProductFilters`] converts to and from that form. Every
//! control defaults to "all"; only strain, vibe, and nose count as applied
//! filters for the badge and "Clear all".

use std::cmp::Ordering;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::Decimal;

use crate::entity::EntityId;
use crate::products::{Product, ProductCategory};
use crate::CoreError;

/// Query-component encoding that leaves the URL-safe punctuation alone.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn unknown(filter: &'static str, value: &str) -> CoreError {
    CoreError::UnknownFilterValue {
        filter,
        value: value.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Curated `sort_order`, ties broken by name.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Highest THCa first.
    Thc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Featured => "featured",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::Thc => "thc",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Featured => "Featured",
            SortOrder::PriceLow => "Price: Low to High",
            SortOrder::PriceHigh => "Price: High to Low",
            SortOrder::Thc => "THC: High to Low",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(SortOrder::Featured),
            "price-low" => Ok(SortOrder::PriceLow),
            "price-high" => Ok(SortOrder::PriceHigh),
            "thc" => Ok(SortOrder::Thc),
            other => Err(unknown("sort", other)),
        }
    }
}

/// Strain family, matched against a product's `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrainType {
    Indica,
    Sativa,
    Hybrid,
}

impl StrainType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StrainType::Indica => "indica",
            StrainType::Sativa => "sativa",
            StrainType::Hybrid => "hybrid",
        }
    }

    fn matches(self, product: &Product) -> bool {
        product.product_type.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl FromStr for StrainType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indica" => Ok(StrainType::Indica),
            "sativa" => Ok(StrainType::Sativa),
            "hybrid" => Ok(StrainType::Hybrid),
            other => Err(unknown("strain", other)),
        }
    }
}

/// The feel a customer is shopping for, matched against a product's effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vibe {
    Relax,
    Energize,
    Balance,
}

impl Vibe {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Vibe::Relax => "relax",
            Vibe::Energize => "energize",
            Vibe::Balance => "balance",
        }
    }

    /// Stems that mark an effect as belonging to this vibe.
    fn stems(self) -> &'static [&'static str] {
        match self {
            Vibe::Relax => &["relax", "calm", "sleep", "sedat"],
            Vibe::Energize => &["energ", "uplift", "focus", "creativ"],
            Vibe::Balance => &["balanc", "happy", "euphori"],
        }
    }

    fn matches(self, product: &Product) -> bool {
        product.effects.iter().any(|effect| {
            let effect = effect.to_lowercase();
            self.stems().iter().any(|stem| effect.contains(stem))
        })
    }
}

impl FromStr for Vibe {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relax" => Ok(Vibe::Relax),
            "energize" => Ok(Vibe::Energize),
            "balance" => Ok(Vibe::Balance),
            other => Err(unknown("vibe", other)),
        }
    }
}

/// Flavour profile. Matched as a word fragment in the name, description,
/// or terpene notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nose {
    Candy,
    Gas,
    Cake,
    Funk,
    Sherb,
}

impl Nose {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Nose::Candy => "candy",
            Nose::Gas => "gas",
            Nose::Cake => "cake",
            Nose::Funk => "funk",
            Nose::Sherb => "sherb",
        }
    }

    fn matches(self, product: &Product) -> bool {
        let needle = self.as_str();
        std::iter::once(product.name.as_str())
            .chain(product.description.as_deref())
            .chain(product.terpenes.iter().map(String::as_str))
            .any(|text| text.to_lowercase().contains(needle))
    }
}

impl FromStr for Nose {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candy" => Ok(Nose::Candy),
            "gas" => Ok(Nose::Gas),
            "cake" => Ok(Nose::Cake),
            "funk" => Ok(Nose::Funk),
            "sherb" => Ok(Nose::Sherb),
            other => Err(unknown("nose", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    /// Menu section; the admin product table scopes by this.
    pub category: Option<ProductCategory>,
    /// Free-text search over name, description, and effects.
    pub search: String,
    pub strain: Option<StrainType>,
    pub vibe: Option<Vibe>,
    pub nose: Option<Nose>,
    pub sort: SortOrder,
}

impl ProductFilters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number shown on the "Filter" badge: strain, vibe, and nose each count
    /// once when set.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        usize::from(self.strain.is_some())
            + usize::from(self.vibe.is_some())
            + usize::from(self.nose.is_some())
    }

    /// "Clear all": resets strain, vibe, and nose. Search, category, and
    /// sort are separate controls and stay as they are.
    pub fn clear(&mut self) {
        self.strain = None;
        self.vibe = None;
        self.nose = None;
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|c| c != product.category) {
            return false;
        }
        if self.strain.is_some_and(|s| !s.matches(product)) {
            return false;
        }
        if self.vibe.is_some_and(|v| !v.matches(product)) {
            return false;
        }
        if self.nose.is_some_and(|n| !n.matches(product)) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        product.name.to_lowercase().contains(&needle)
            || product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || product
                .effects
                .iter()
                .any(|e| e.to_lowercase().contains(&needle))
    }

    /// Matching products in display order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut visible: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        let sort = self.sort;
        visible.sort_by(|a, b| compare_products(sort, a, b));
        visible
    }

    /// IDs of the matching products, in display order.
    #[must_use]
    pub fn visible_ids(&self, products: &[Product]) -> Vec<EntityId> {
        self.apply(products).into_iter().map(|p| p.id).collect()
    }

    /// Encodes non-default filters as a query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str()));
        }
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("q", search));
        }
        if let Some(strain) = self.strain {
            pairs.push(("strain", strain.as_str()));
        }
        if let Some(vibe) = self.vibe {
            pairs.push(("vibe", vibe.as_str()));
        }
        if let Some(nose) = self.nose {
            pairs.push(("nose", nose.as_str()));
        }
        if self.sort != SortOrder::Featured {
            pairs.push(("sort", self.sort.as_str()));
        }
        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Decodes a query string. Unknown keys and unparseable values are
    /// ignored, and `all` reads as unset, matching how the filter bar treats
    /// a hand-edited URL.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut filters = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, raw)) = pair.split_once('=') else {
                continue;
            };
            let plus_decoded = raw.replace('+', " ");
            let value = percent_decode_str(&plus_decoded).decode_utf8_lossy();
            let value = value.trim();
            if value.is_empty() || value == "all" {
                continue;
            }
            match key {
                "category" => filters.category = value.parse().ok(),
                "q" => filters.search = value.to_string(),
                "strain" => filters.strain = value.parse().ok(),
                "vibe" => filters.vibe = value.parse().ok(),
                "nose" => filters.nose = value.parse().ok(),
                "sort" => filters.sort = value.parse().unwrap_or_default(),
                _ => {}
            }
        }
        filters
    }
}

/// THCa percentage from a label such as `"24%"` or `"24.5 %"`.
fn thca_value(product: &Product) -> Option<Decimal> {
    let raw = product.thca.as_deref()?.trim().trim_end_matches('%').trim();
    Decimal::from_str(raw).ok()
}

/// Highest first; products without a value sink to the bottom.
fn by_value_desc(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_products(sort: SortOrder, a: &Product, b: &Product) -> Ordering {
    let by_name = || a.name.to_lowercase().cmp(&b.name.to_lowercase());
    match sort {
        SortOrder::Featured => a.sort_order.cmp(&b.sort_order).then_with(by_name),
        SortOrder::PriceHigh => by_value_desc(a.price_value(), b.price_value()).then_with(by_name),
        SortOrder::PriceLow => match (a.price_value(), b.price_value()) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(by_name),
            // Unpriced products always sink to the bottom.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => by_name(),
        },
        SortOrder::Thc => by_value_desc(thca_value(a), thca_value(b)).then_with(by_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, category: ProductCategory, price: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            category,
            product_type: "hybrid".to_string(),
            price: price.to_string(),
            thca: None,
            dosage: None,
            terpenes: vec!["myrcene".to_string()],
            effects: vec!["Relaxed".to_string()],
            in_stock: true,
            sort_order: i32::try_from(id).unwrap_or_default(),
            description: None,
        }
    }

    fn catalog() -> Vec<Product> {
        let mut gelato = product(1, "Gelato", ProductCategory::Flower, "$30");
        gelato.thca = Some("22%".to_string());
        gelato.description = Some("Sweet sherbet nose".to_string());

        let mut blue_dream = product(2, "Blue Dream", ProductCategory::Flower, "$45");
        blue_dream.product_type = "Sativa".to_string();
        blue_dream.thca = Some("27.5%".to_string());
        blue_dream.effects = vec!["Uplifted".to_string(), "Happy".to_string()];

        let mut gummies = product(3, "Mango Gummies", ProductCategory::Edibles, "$20");
        gummies.product_type = "gummies".to_string();
        gummies.effects = vec!["Energetic".to_string()];
        gummies.description = Some("Tropical candy flavor".to_string());

        let mut cart = product(4, "Mystery Cart", ProductCategory::Vapes, "");
        cart.product_type = "indica".to_string();
        cart.thca = Some("88%".to_string());
        cart.terpenes = vec!["Diesel gas".to_string()];
        cart.effects = vec!["Sleepy".to_string()];

        vec![blue_dream, gelato, gummies, cart]
    }

    #[test]
    fn empty_filters_show_everything_in_featured_order() {
        let filters = ProductFilters::default();
        assert!(filters.is_empty());
        assert_eq!(filters.active_filter_count(), 0);
        assert_eq!(filters.visible_ids(&catalog()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn strain_matches_product_type_case_insensitively() {
        let filters = ProductFilters {
            strain: Some(StrainType::Sativa),
            ..ProductFilters::default()
        };
        assert_eq!(filters.visible_ids(&catalog()), vec![2]);

        let filters = ProductFilters {
            strain: Some(StrainType::Hybrid),
            ..ProductFilters::default()
        };
        assert_eq!(filters.visible_ids(&catalog()), vec![1]);
    }

    #[test]
    fn vibe_matches_effect_stems() {
        let relax = ProductFilters {
            vibe: Some(Vibe::Relax),
            ..ProductFilters::default()
        };
        assert_eq!(relax.visible_ids(&catalog()), vec![1, 4]);

        let energize = ProductFilters {
            vibe: Some(Vibe::Energize),
            ..ProductFilters::default()
        };
        assert_eq!(energize.visible_ids(&catalog()), vec![2, 3]);
    }

    #[test]
    fn nose_looks_at_name_description_and_terpenes() {
        let ids = |nose| {
            ProductFilters {
                nose: Some(nose),
                ..ProductFilters::default()
            }
            .visible_ids(&catalog())
        };
        assert_eq!(ids(Nose::Sherb), vec![1]);
        assert_eq!(ids(Nose::Candy), vec![3]);
        assert_eq!(ids(Nose::Gas), vec![4]);
        assert!(ids(Nose::Funk).is_empty());
    }

    #[test]
    fn category_and_strain_filters_combine() {
        let filters = ProductFilters {
            category: Some(ProductCategory::Flower),
            strain: Some(StrainType::Indica),
            ..ProductFilters::default()
        };
        assert!(filters.visible_ids(&catalog()).is_empty());

        let filters = ProductFilters {
            category: Some(ProductCategory::Flower),
            ..ProductFilters::default()
        };
        assert_eq!(filters.visible_ids(&catalog()), vec![1, 2]);
    }

    #[test]
    fn search_covers_name_description_and_effects() {
        let search = |q: &str| {
            ProductFilters {
                search: q.to_string(),
                ..ProductFilters::default()
            }
            .visible_ids(&catalog())
        };
        assert_eq!(search("ENERGETIC"), vec![3]);
        assert_eq!(search("tropical"), vec![3]);
        assert_eq!(search("blue"), vec![2]);
        // Type and terpenes are not searched.
        assert!(search("myrcene").is_empty());
    }

    #[test]
    fn price_sorts_put_unpriced_last() {
        let filters = ProductFilters {
            sort: SortOrder::PriceLow,
            ..ProductFilters::default()
        };
        assert_eq!(filters.visible_ids(&catalog()), vec![3, 1, 2, 4]);

        let filters = ProductFilters {
            sort: SortOrder::PriceHigh,
            ..ProductFilters::default()
        };
        assert_eq!(filters.visible_ids(&catalog()), vec![2, 1, 3, 4]);
    }

    #[test]
    fn thc_sort_is_highest_first_with_unlabelled_last() {
        let filters = ProductFilters {
            sort: SortOrder::Thc,
            ..ProductFilters::default()
        };
        assert_eq!(filters.visible_ids(&catalog()), vec![4, 2, 1, 3]);
    }

    #[test]
    fn active_count_and_clear_cover_only_strain_vibe_and_nose() {
        let mut filters = ProductFilters {
            category: Some(ProductCategory::Vapes),
            search: "cart".to_string(),
            strain: Some(StrainType::Indica),
            vibe: Some(Vibe::Relax),
            nose: None,
            sort: SortOrder::Thc,
        };
        assert_eq!(filters.active_filter_count(), 2);

        filters.clear();
        assert_eq!(filters.active_filter_count(), 0);
        assert_eq!(filters.category, Some(ProductCategory::Vapes));
        assert_eq!(filters.search, "cart");
        assert_eq!(filters.sort, SortOrder::Thc);
    }

    #[test]
    fn query_string_encodes_only_non_defaults() {
        let filters = ProductFilters {
            category: Some(ProductCategory::Vapes),
            search: "live resin".to_string(),
            vibe: Some(Vibe::Balance),
            sort: SortOrder::PriceLow,
            ..ProductFilters::default()
        };
        assert_eq!(
            filters.to_query_string(),
            "category=vapes&q=live%20resin&vibe=balance&sort=price-low"
        );
        assert_eq!(ProductFilters::default().to_query_string(), "");
    }

    #[test]
    fn from_query_string_reads_form_encoding_and_skips_junk() {
        let filters = ProductFilters::from_query_string(
            "?q=blue+dream&sort=price-high&category=tinctures&strain=all&nose=gas&x",
        );
        assert_eq!(filters.search, "blue dream");
        assert_eq!(filters.sort, SortOrder::PriceHigh);
        assert!(filters.category.is_none());
        assert!(filters.strain.is_none());
        assert_eq!(filters.nose, Some(Nose::Gas));
    }

    #[test]
    fn query_string_survives_decode() {
        let filters = ProductFilters {
            category: Some(ProductCategory::Edibles),
            search: "50% off & more".to_string(),
            strain: Some(StrainType::Hybrid),
            vibe: Some(Vibe::Energize),
            nose: Some(Nose::Cake),
            sort: SortOrder::Thc,
        };
        assert_eq!(
            ProductFilters::from_query_string(&filters.to_query_string()),
            filters
        );
    }

    #[test]
    fn filter_values_reject_unknown_text() {
        assert!(matches!(
            "spicy".parse::<Nose>(),
            Err(CoreError::UnknownFilterValue { filter: "nose", .. })
        ));
        assert!("price_asc".parse::<SortOrder>().is_err());
    }
}
