//! `fire cart`.

use fire_productions_core::{CartStore, KeyValueStore, ProductId};
use tracing::info;

use crate::ApiClient;
use crate::error::{CliError, Result};
use crate::output::render_cart;

/// Current cart contents.
pub fn show<S: KeyValueStore>(store: S) -> String {
    render_cart(CartStore::load(store).cart())
}

/// Add `qty` of product `id`, fetching its current title and price.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or has no such product.
pub async fn add<S: KeyValueStore>(
    api: &ApiClient,
    store: S,
    id: &str,
    qty: u32,
) -> Result<String> {
    let product = api.get_product(&ProductId::new(id)).await?;

    let mut cart = CartStore::load(store);
    cart.add_item(&product, qty);
    info!(id = %product.id, qty, "Added to cart");

    Ok(format!(
        "Added {} to your cart.\n\n{}",
        product.title,
        render_cart(cart.cart())
    ))
}

/// Change the quantity of `id` by `delta`. Dropping below one removes it.
///
/// # Errors
///
/// Returns `CliError::NotInCart` if `id` is not in the cart.
pub fn change_qty<S: KeyValueStore>(store: S, id: &str, delta: i64) -> Result<String> {
    let id = ProductId::new(id);
    let mut cart = CartStore::load(store);
    if cart.cart().get(&id).is_none() {
        return Err(CliError::NotInCart(id.into_inner()));
    }
    cart.update_qty(&id, delta);
    Ok(render_cart(cart.cart()))
}

/// Remove `id` entirely.
///
/// # Errors
///
/// Returns `CliError::NotInCart` if `id` is not in the cart.
pub fn remove<S: KeyValueStore>(store: S, id: &str) -> Result<String> {
    let id = ProductId::new(id);
    let mut cart = CartStore::load(store);
    if cart.cart().get(&id).is_none() {
        return Err(CliError::NotInCart(id.into_inner()));
    }
    cart.remove_item(&id);
    Ok(render_cart(cart.cart()))
}

pub fn clear<S: KeyValueStore>(store: S) -> String {
    let mut cart = CartStore::load(store);
    cart.clear();
    render_cart(cart.cart())
}

/// The order message and its `WhatsApp` link.
///
/// # Errors
///
/// Returns `CliError::EmptyCart` if there is nothing to order.
pub fn order<S: KeyValueStore>(store: S, whatsapp_number: &str) -> Result<String> {
    let cart = CartStore::load(store);
    if cart.cart().is_empty() {
        return Err(CliError::EmptyCart);
    }
    Ok(format!(
        "{}\n\nSend your order: {}\n",
        cart.cart().build_order_message(),
        cart.cart().order_link(whatsapp_number)
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fire_productions_core::storage::keys;
    use fire_productions_core::MemoryStore;

    use super::*;

    fn seeded() -> MemoryStore {
        [(
            keys::CART,
            r#"[{"id":"p1","title":"Bass Trap","price":2500,"qty":2,"category":"Acoustic","subCategory":"Traps","description":""}]"#,
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_change_qty_persists_and_removes_at_zero() {
        let mut store = seeded();

        let out = change_qty(&mut store, "p1", 1).unwrap();
        assert!(out.contains("total LKR 7,500"));

        change_qty(&mut store, "p1", -3).unwrap();
        assert_eq!(store.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_unknown_id_is_reported() {
        let mut store = seeded();
        assert!(matches!(
            change_qty(&mut store, "nope", 1),
            Err(CliError::NotInCart(id)) if id == "nope"
        ));
        assert!(matches!(remove(&mut store, "nope"), Err(CliError::NotInCart(_))));
    }

    #[test]
    fn test_order_requires_items() {
        assert!(matches!(
            order(MemoryStore::new(), "94743678001"),
            Err(CliError::EmptyCart)
        ));

        let out = order(seeded(), "94743678001").unwrap();
        assert!(out.starts_with("Hello, I would like to order:\n"));
        assert!(out.contains("Total: LKR 5,000"));
        assert!(out.contains("https://wa.me/94743678001?text=Hello%2C%20I%20would%20like"));
    }

    #[test]
    fn test_clear_and_show() {
        let mut store = seeded();
        assert!(show(&mut store).contains("Bass Trap"));
        assert_eq!(clear(&mut store), "Your cart is empty.\n");
        assert_eq!(show(&mut store), "Your cart is empty.\n");
    }
}
