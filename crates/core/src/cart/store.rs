//! Persisted cart.

use tracing::{debug, warn};

use super::{Cart, CartEntry};
use crate::catalog::Product;
use crate::storage::{KeyValueStore, StorageError, keys};
use crate::types::ProductId;

/// A [`Cart`] bound to a key-value store.
///
/// The rows are written to the `"cart"` key as a JSON array after every
/// mutation. Storage failures are logged and swallowed: the in-memory
/// ledger stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    store: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart persisted in `store`.
    ///
    /// A missing key, undecodable JSON or a non-array value all load as an
    /// empty cart; individual malformed rows are skipped.
    pub fn load(store: S) -> Self {
        let cart = match store.get(keys::CART) {
            Ok(Some(raw)) => decode_rows(&raw),
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                Cart::new()
            }
        };
        debug!(rows = cart.entries().len(), "Loaded cart");
        Self { cart, store }
    }

    /// The current ledger.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// See [`Cart::add_item`].
    pub fn add_item(&mut self, product: &Product, qty: u32) {
        self.cart.add_item(product, qty);
        self.persist();
    }

    /// See [`Cart::update_qty`].
    pub fn update_qty(&mut self, id: &ProductId, delta: i64) {
        self.cart.update_qty(id, delta);
        self.persist();
    }

    /// See [`Cart::remove_item`].
    pub fn remove_item(&mut self, id: &ProductId) {
        self.cart.remove_item(id);
        self.persist();
    }

    /// See [`Cart::clear`].
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    pub const fn open(&mut self) {
        self.cart.open();
    }

    pub const fn close(&mut self) {
        self.cart.close();
    }

    /// Write the rows to the store, reporting failures to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be encoded or written.
    pub fn try_persist(&mut self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(self.cart.entries())?;
        self.store.set(keys::CART, &encoded)
    }

    fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

fn decode_rows(raw: &str) -> Cart {
    let rows: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "Persisted cart is not a JSON array, starting empty");
            return Cart::new();
        }
    };

    Cart::from_entries(rows.into_iter().filter_map(|row| {
        serde_json::from_value::<CartEntry>(row)
            .map_err(|e| debug!(error = %e, "Skipping malformed cart row"))
            .ok()
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::Price;

    fn product(id: &str, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Item {id}"),
            description: String::new(),
            price: Price::from_rupees(price),
            category: "Acoustic".to_string(),
            sub_category: Some("Panels".to_string()),
            image_url: None,
            image_urls: Vec::new(),
        }
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("read-only".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("read-only".to_string()))
        }
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut store = MemoryStore::new();
        {
            let mut cart = CartStore::load(&mut store);
            cart.add_item(&product("x", 10), 2);
        }

        let raw = store.get(keys::CART).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "id": "x",
                "title": "Item x",
                "price": 10,
                "qty": 2,
                "category": "Acoustic",
                "subCategory": "Panels",
                "description": ""
            }])
        );

        let reloaded = CartStore::load(&mut store);
        assert_eq!(reloaded.cart().entries().len(), 1);
        assert_eq!(reloaded.cart().total(), Price::from_rupees(20));
    }

    #[test]
    fn test_clear_persists_empty_array() {
        let mut store = MemoryStore::new();
        let mut cart = CartStore::load(&mut store);
        cart.add_item(&product("x", 10), 1);
        cart.clear();
        drop(cart);
        assert_eq!(store.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_corrupt_cart_loads_empty() {
        let store: MemoryStore = [(keys::CART, "{not json")].into_iter().collect();
        assert!(CartStore::load(store).cart().is_empty());

        let store: MemoryStore = [(keys::CART, r#"{"id":"x"}"#)].into_iter().collect();
        assert!(CartStore::load(store).cart().is_empty());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let store: MemoryStore = [(
            keys::CART,
            r#"[{"id":"a","price":"15","qty":2},{"title":"no id","qty":1},{"id":"b","qty":-1},{"id":"c","qty":0}]"#,
        )]
        .into_iter()
        .collect();

        let cart = CartStore::load(store);
        let entries = cart.cart().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_str(), "a");
        assert_eq!(cart.cart().total(), Price::from_rupees(30));
    }

    #[test]
    fn test_write_failures_do_not_break_the_ledger() {
        let mut cart = CartStore::load(ReadOnlyStore);
        cart.add_item(&product("x", 10), 1);
        cart.update_qty(&ProductId::new("x"), 1);
        assert_eq!(cart.cart().entries()[0].qty, 2);
        assert!(cart.try_persist().is_err());
    }

    #[test]
    fn test_loaded_cart_starts_closed() {
        let mut store = MemoryStore::new();
        CartStore::load(&mut store).add_item(&product("x", 10), 1);
        let mut cart = CartStore::load(&mut store);
        assert!(!cart.cart().is_open());
        cart.open();
        assert!(cart.cart().is_open());
        cart.close();
        assert!(!cart.cart().is_open());
    }
}
