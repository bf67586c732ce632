//! `fire products` and `fire categories`.

use chrono::Utc;
use fire_productions_core::cart::buy_now_link;
use fire_productions_core::storage::{ReturnPoint, ReturnSource};
use fire_productions_core::{FilterState, KeyValueStore, ProductId, SortMode, filter_and_sort};
use tracing::{debug, warn};

use crate::ApiClient;
use crate::config::CliConfig;
use crate::error::Result;
use crate::output::{render_categories, render_product, render_products};

/// Catalog filters as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub query: Option<String>,
    /// Raw minimum price; non-numeric input means no minimum.
    pub min_price: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub sort: SortMode,
}

impl ProductQuery {
    #[must_use]
    pub fn filter_state(&self) -> FilterState {
        let mut state = FilterState {
            query: self.query.clone().unwrap_or_default(),
            sort: self.sort,
            ..FilterState::default()
        };
        if let Some(input) = &self.min_price {
            state.set_min_price_input(input);
        }
        state.select_category(self.category.clone());
        state.sub_category = self.sub_category.clone().filter(|s| !s.is_empty());
        state
    }
}

/// Filtered, sorted product listing. A product opened with `show` since the
/// last listing is marked.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub async fn list<S: KeyValueStore>(
    api: &ApiClient,
    store: &mut S,
    query: &ProductQuery,
) -> Result<String> {
    let products = api.list_products().await?;
    let state = query.filter_state();
    let visible = filter_and_sort(&products, &state);
    debug!(total = products.len(), shown = visible.len(), "Filtered catalog");

    let returned = take_return_point(store, ReturnSource::Products);
    let highlight = returned.as_ref().and_then(|p| p.product_id.as_ref());

    Ok(render_products(&visible, &state, highlight))
}

/// Product details with a buy-now link for `qty` units.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or has no such product.
pub async fn show<S: KeyValueStore>(
    api: &ApiClient,
    store: &mut S,
    config: &CliConfig,
    id: &str,
    qty: u32,
) -> Result<String> {
    let product = api.get_product(&ProductId::new(id)).await?;

    let mut point = ReturnPoint::new(ReturnSource::Products);
    point.product_id = Some(product.id.clone());
    if let Err(e) = point.remember(store, Utc::now()) {
        warn!(error = %e, "Failed to record return point");
    }

    let link = buy_now_link(&config.whatsapp_number, &product, qty);
    Ok(render_product(&product, &link))
}

/// The category taxonomy.
///
/// # Errors
///
/// Returns an error if the categories cannot be fetched.
pub async fn categories(api: &ApiClient) -> Result<String> {
    let tree = api.list_categories().await?;
    Ok(render_categories(&tree))
}

/// Consume the stored return point if it was recorded for `source`.
pub(crate) fn take_return_point<S: KeyValueStore>(
    store: &mut S,
    source: ReturnSource,
) -> Option<ReturnPoint> {
    match ReturnPoint::take(store) {
        Ok(point) => point.filter(|p| p.source == source),
        Err(e) => {
            warn!(error = %e, "Failed to read return point");
            None
        }
    }
}
