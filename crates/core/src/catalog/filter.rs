//! Catalog filter/sort engine.
//!
//! [`filter_and_sort`] is a pure function of the product list and the
//! current [`FilterState`]; it is cheap enough to rerun on every keystroke.
//! Filters compose with logical AND and sorting only touches the filtered
//! subset.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::product::Product;
use crate::types::price::parse_decimal;

/// Error returned when a sort mode string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort mode '{0}' (expected featured, price-asc, price-desc or name)")]
pub struct SortModeError(pub String);

/// Product ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep the order the API returned.
    #[default]
    Featured,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Alphabetical by title.
    Name,
}

impl SortMode {
    /// All modes, in menu order.
    pub const ALL: [Self; 4] = [Self::Featured, Self::PriceAsc, Self::PriceDesc, Self::Name];

    /// The wire/menu identifier for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Name => "name",
        }
    }

    /// Parse a mode, falling back to [`SortMode::Featured`] for anything
    /// unrecognized.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured => Ordering::Equal,
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::Name => compare_titles(&a.title, &b.title),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = SortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SortModeError(s.to_string()))
    }
}

/// Case-insensitive title order, ties broken by the raw titles so the
/// ordering is total.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// User-selected catalog filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text query matched against title and description.
    pub query: String,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Exact top-level category.
    pub category: Option<String>,
    /// Exact subcategory.
    pub sub_category: Option<String>,
    pub sort: SortMode,
}

impl FilterState {
    /// Interpret raw min-price input. Blank or non-numeric input means no
    /// minimum.
    #[must_use]
    pub fn min_price_from_input(input: &str) -> Option<Decimal> {
        parse_decimal(input)
    }

    /// Set the minimum price from raw text input.
    pub fn set_min_price_input(&mut self, input: &str) {
        self.min_price = Self::min_price_from_input(input);
    }

    /// Select a top-level category. The subcategory belongs to the previous
    /// category, so it is reset.
    pub fn select_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.is_empty());
        self.sub_category = None;
    }

    /// Whether any narrowing filter (not the sort) is active.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.query.trim().is_empty()
            || self.min_price.is_some()
            || active(self.category.as_deref()).is_some()
            || active(self.sub_category.as_deref()).is_some()
    }

    /// Reset every filter, keeping the sort mode.
    pub fn clear_filters(&mut self) {
        *self = Self {
            sort: self.sort,
            ..Self::default()
        };
    }

    /// Whether a single product passes every active filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.query.trim().to_lowercase();
        self.matches_with_needle(product, &needle)
    }

    fn matches_with_needle(&self, product: &Product, needle: &str) -> bool {
        let text_ok = needle.is_empty()
            || product.title.to_lowercase().contains(needle)
            || product.description.to_lowercase().contains(needle);

        let price_ok = self
            .min_price
            .is_none_or(|min| product.price.amount() >= min);

        let category_ok =
            active(self.category.as_deref()).is_none_or(|c| product.category == c);

        let sub_ok = active(self.sub_category.as_deref())
            .is_none_or(|s| product.sub_category.as_deref().unwrap_or_default() == s);

        text_ok && price_ok && category_ok && sub_ok
    }
}

/// Empty strings behave like an unset filter.
fn active(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Apply `state` to `products`: filter, then sort the survivors.
///
/// Never fails and never invents entries. With [`SortMode::Featured`] the
/// relative input order is preserved; the other modes sort stably.
#[must_use]
pub fn filter_and_sort(products: &[Product], state: &FilterState) -> Vec<Product> {
    let needle = state.query.trim().to_lowercase();

    let mut list: Vec<Product> = products
        .iter()
        .filter(|p| state.matches_with_needle(p, &needle))
        .cloned()
        .collect();

    if state.sort != SortMode::Featured {
        list.sort_by(|a, b| state.sort.compare(a, b));
    }

    list
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};
    use proptest::prelude::*;

    fn product(id: &str, title: &str, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            description: String::new(),
            price: Price::from_rupees(price),
            category: String::new(),
            sub_category: None,
            image_url: None,
            image_urls: Vec::new(),
        }
    }

    fn ids(list: &[Product]) -> Vec<&str> {
        list.iter().map(|p| p.id.as_str()).collect()
    }

    fn sample() -> Vec<Product> {
        vec![product("1", "A", 100), product("2", "B", 50)]
    }

    #[test]
    fn test_min_price_filters_cheaper_products() {
        let mut state = FilterState::default();
        state.set_min_price_input("60");
        assert_eq!(ids(&filter_and_sort(&sample(), &state)), vec!["1"]);
    }

    #[test]
    fn test_price_asc_sorts_unfiltered_list() {
        let state = FilterState {
            sort: SortMode::PriceAsc,
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_and_sort(&sample(), &state)), vec!["2", "1"]);
    }

    #[test]
    fn test_malformed_min_price_is_ignored() {
        let mut state = FilterState::default();
        state.set_min_price_input("");
        assert_eq!(state.min_price, None);
        state.set_min_price_input("cheap");
        assert_eq!(state.min_price, None);
        assert_eq!(filter_and_sort(&sample(), &state).len(), 2);
    }

    #[test]
    fn test_query_matches_title_or_description_case_insensitively() {
        let mut list = sample();
        list[1].description = "Foam WEDGE panel".to_string();

        let state = FilterState {
            query: "  wedge ".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_and_sort(&list, &state)), vec!["2"]);

        let state = FilterState {
            query: "a".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_and_sort(&list, &state)), vec!["1", "2"]);
    }

    #[test]
    fn test_category_and_subcategory_are_exact() {
        let mut list = sample();
        list[0].category = "Acoustic".to_string();
        list[0].sub_category = Some("Panels".to_string());
        list[1].category = "Acoustic".to_string();

        let mut state = FilterState::default();
        state.select_category(Some("Acoustic".to_string()));
        assert_eq!(ids(&filter_and_sort(&list, &state)), vec!["1", "2"]);

        state.sub_category = Some("Panels".to_string());
        assert_eq!(ids(&filter_and_sort(&list, &state)), vec!["1"]);

        state.select_category(Some("acoustic".to_string()));
        assert!(filter_and_sort(&list, &state).is_empty());
        assert_eq!(state.sub_category, None);
    }

    #[test]
    fn test_empty_strings_behave_like_unset_filters() {
        let state = FilterState {
            category: Some(String::new()),
            sub_category: Some(String::new()),
            ..FilterState::default()
        };
        assert!(!state.is_filtered());
        assert_eq!(filter_and_sort(&sample(), &state).len(), 2);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let list = vec![
            product("1", "zebra", 1),
            product("2", "Apple", 1),
            product("3", "banana", 1),
        ];
        let state = FilterState {
            sort: SortMode::Name,
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_and_sort(&list, &state)), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_clear_filters_keeps_sort() {
        let mut state = FilterState {
            query: "x".to_string(),
            min_price: Some(Decimal::ONE),
            category: Some("Acoustic".to_string()),
            sub_category: Some("Panels".to_string()),
            sort: SortMode::PriceDesc,
        };
        assert!(state.is_filtered());
        state.clear_filters();
        assert!(!state.is_filtered());
        assert_eq!(state.sort, SortMode::PriceDesc);
    }

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!("price-asc".parse::<SortMode>().unwrap(), SortMode::PriceAsc);
        assert_eq!("NAME".parse::<SortMode>().unwrap(), SortMode::Name);
        assert!("cheapest".parse::<SortMode>().is_err());
        assert_eq!(SortMode::parse_lenient("cheapest"), SortMode::Featured);
        assert_eq!(SortMode::PriceDesc.to_string(), "price-desc");
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(("[a-dA-D]{0,4}", 0u64..500), 0..20).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (title, price))| product(&i.to_string(), &title, price))
                .collect()
        })
    }

    fn arb_state() -> impl Strategy<Value = FilterState> {
        (
            "[a-d]{0,2}",
            prop::option::of(0u64..500),
            prop::sample::select(SortMode::ALL.to_vec()),
        )
            .prop_map(|(query, min, sort)| FilterState {
                query,
                min_price: min.map(Decimal::from),
                sort,
                ..FilterState::default()
            })
    }

    proptest! {
        #[test]
        fn result_is_subset_of_input(products in arb_products(), state in arb_state()) {
            let result = filter_and_sort(&products, &state);
            for p in &result {
                prop_assert!(products.contains(p));
                prop_assert!(state.matches(p));
            }
            let expected = products.iter().filter(|p| state.matches(p)).count();
            prop_assert_eq!(result.len(), expected);
        }

        #[test]
        fn featured_preserves_relative_order(products in arb_products(), state in arb_state()) {
            let mut state = state;
            state.sort = SortMode::Featured;
            let result = filter_and_sort(&products, &state);
            let positions: Vec<usize> = result
                .iter()
                .map(|p| products.iter().position(|q| q.id == p.id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn price_sorts_are_monotonic(products in arb_products(), state in arb_state()) {
            let mut state = state;
            state.sort = SortMode::PriceAsc;
            let asc = filter_and_sort(&products, &state);
            prop_assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));

            state.sort = SortMode::PriceDesc;
            let desc = filter_and_sort(&products, &state);
            prop_assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));
        }
    }
}
