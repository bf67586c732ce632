//! WhatsApp order hand-off.
//!
//! Orders are not placed through a checkout; the cart is rendered into a
//! plain-text message and handed to WhatsApp through a `wa.me` deep link.

use crate::catalog::Product;
use crate::types::Price;

use super::CartEntry;

/// Separator between the parts of one order line.
const PART_SEPARATOR: &str = " — ";

/// Largest quantity the single-product "buy now" flow accepts.
pub const BUY_NOW_MAX_QTY: u32 = 99;

/// Render the order message for `entries`.
///
/// One line per row: `• title xQty — category / sub — description — LKR
/// subtotal`, with empty taxonomy and description parts omitted, followed
/// by the total line.
#[must_use]
pub fn build_order_message(entries: &[CartEntry], total: Price) -> String {
    let lines: Vec<String> = entries.iter().map(order_line).collect();
    format!(
        "Hello, I would like to order:\n{}\nTotal: {}",
        lines.join("\n"),
        total.display()
    )
}

fn order_line(entry: &CartEntry) -> String {
    let taxonomy = [entry.category.as_str(), entry.sub_category.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" / ");
    let description = entry.description.trim();

    let mut parts = vec![format!("• {} x{}", entry.title, entry.qty)];
    if !taxonomy.is_empty() {
        parts.push(taxonomy);
    }
    if !description.is_empty() {
        parts.push(description.to_string());
    }
    parts.push(entry.line_total().display());
    parts.join(PART_SEPARATOR)
}

/// Message for ordering a single product straight from its preview.
///
/// `qty` is clamped to `1..=BUY_NOW_MAX_QTY`.
#[must_use]
pub fn buy_now_message(product: &Product, qty: u32) -> String {
    let qty = qty.clamp(1, BUY_NOW_MAX_QTY);
    format!(
        "Hello, I'm interested in {}{PART_SEPARATOR}{} (Qty {qty})",
        product.title,
        product.price.display()
    )
}

/// Deep link for [`buy_now_message`].
#[must_use]
pub fn buy_now_link(number: &str, product: &Product, qty: u32) -> String {
    whatsapp_link(number, &buy_now_message(product, qty))
}

/// `https://wa.me/{number}?text={encoded}`.
#[must_use]
pub fn whatsapp_link(number: &str, text: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::types::ProductId;

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

    #[test]
    fn test_order_message_layout() {
        let mut panel = product("1", "Bass Trap", 12_500);
        panel.category = "Acoustic".to_string();
        panel.sub_category = Some("Panels".to_string());
        panel.description = " Corner absorber ".to_string();

        let mut cart = Cart::new();
        cart.add_item(&panel, 2);
        cart.add_item(&product("2", "Cable", 800), 1);

        assert_eq!(
            cart.build_order_message(),
            "Hello, I would like to order:\n\
             • Bass Trap x2 — Acoustic / Panels — Corner absorber — LKR 25,000\n\
             • Cable x1 — LKR 800\n\
             Total: LKR 25,800"
        );
    }

    #[test]
    fn test_order_message_for_empty_cart() {
        assert_eq!(
            Cart::new().build_order_message(),
            "Hello, I would like to order:\n\nTotal: LKR 0"
        );
    }

    #[test]
    fn test_whatsapp_link_encodes_text() {
        assert_eq!(
            whatsapp_link("94743678001", "Hi there & x2"),
            "https://wa.me/94743678001?text=Hi%20there%20%26%20x2"
        );
    }

    #[test]
    fn test_buy_now_message_clamps_quantity() {
        let p = product("1", "Mic Stand", 4_000);
        assert_eq!(
            buy_now_message(&p, 0),
            "Hello, I'm interested in Mic Stand — LKR 4,000 (Qty 1)"
        );
        assert!(buy_now_message(&p, 500).ends_with("(Qty 99)"));
        assert!(buy_now_link("1", &p, 1).starts_with("https://wa.me/1?text=Hello%2C"));
    }
}
