//! Cart ledger.
//!
//! The cart is a list of [`CartEntry`] rows keyed by product ID. Quantities
//! are always at least one while a row exists: any update that would drop a
//! row below one removes it instead. The total is derived from the rows on
//! every read and never stored.
//!
//! [`Cart`] is the in-memory ledger; [`CartStore`] wraps it with a
//! [`KeyValueStore`](crate::storage::KeyValueStore) and persists after every
//! mutation.

pub mod order;
mod store;

pub use order::{BUY_NOW_MAX_QTY, buy_now_link, buy_now_message, whatsapp_link};
pub use store::CartStore;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// One cart row.
///
/// Title, price and taxonomy are snapshots taken when the product was first
/// added; later catalog changes do not affect rows already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: Price,
    pub qty: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub description: String,
}

impl CartEntry {
    /// Snapshot `product` into a new row.
    #[must_use]
    pub fn from_product(product: &Product, qty: u32) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            qty: qty.max(1),
            category: product.category.clone(),
            sub_category: product.sub_category.clone().unwrap_or_default(),
            description: product.description.clone(),
        }
    }

    /// `price × qty` for this row.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// Whether the cart holds anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartState {
    Empty,
    HasItems,
}

/// In-memory cart ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
    open: bool,
}

impl Cart {
    /// An empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored rows.
    ///
    /// Rows with a zero quantity are dropped and duplicate IDs are merged
    /// into the first occurrence, so the ledger invariants hold no matter
    /// what was persisted.
    #[must_use]
    pub fn from_entries(rows: impl IntoIterator<Item = CartEntry>) -> Self {
        let mut cart = Self::new();
        for row in rows {
            if row.qty == 0 {
                continue;
            }
            match cart.position(&row.id) {
                Some(i) => {
                    if let Some(existing) = cart.entries.get_mut(i) {
                        existing.qty = existing.qty.saturating_add(row.qty);
                    }
                }
                None => cart.entries.push(row),
            }
        }
        cart
    }

    /// Current rows in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Look up the row for `id`.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Ledger state.
    #[must_use]
    pub fn state(&self) -> CartState {
        if self.entries.is_empty() {
            CartState::Empty
        } else {
            CartState::HasItems
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the cart display is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn open(&mut self) {
        self.open = true;
    }

    pub const fn close(&mut self) {
        self.open = false;
    }

    /// Add `qty` units of `product` (at least one), merging into an
    /// existing row with the same ID. Opens the cart display.
    pub fn add_item(&mut self, product: &Product, qty: u32) {
        let qty = qty.max(1);
        match self.entries.iter_mut().find(|e| e.id == product.id) {
            Some(entry) => entry.qty = entry.qty.saturating_add(qty),
            None => self.entries.push(CartEntry::from_product(product, qty)),
        }
        self.open = true;
    }

    /// Change the quantity of `id` by `delta`.
    ///
    /// A resulting quantity below one removes the row. Unknown IDs are
    /// ignored.
    pub fn update_qty(&mut self, id: &ProductId, delta: i64) {
        let Some(i) = self.position(id) else {
            return;
        };
        let Some(entry) = self.entries.get_mut(i) else {
            return;
        };

        let next = i64::from(entry.qty).saturating_add(delta);
        if next < 1 {
            self.entries.remove(i);
        } else {
            entry.qty = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    /// Remove the row for `id`. Unknown IDs are ignored.
    pub fn remove_item(&mut self, id: &ProductId) {
        self.entries.retain(|e| &e.id != id);
    }

    /// Remove every row.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of `price × qty` over all rows.
    #[must_use]
    pub fn total(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Total number of units (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.qty)).sum()
    }

    /// The WhatsApp order message for the current rows.
    #[must_use]
    pub fn build_order_message(&self) -> String {
        order::build_order_message(&self.entries, self.total())
    }

    /// A WhatsApp deep link carrying the order message.
    #[must_use]
    pub fn order_link(&self, number: &str) -> String {
        whatsapp_link(number, &self.build_order_message())
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }
}
