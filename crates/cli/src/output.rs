//! Plain-text rendering for terminal output.
//!
//! Every function returns a `String`; printing happens in the command
//! handlers only.

use std::fmt::Write as _;

use fire_productions_core::portfolio::ServiceGroup;
use fire_productions_core::{
    Cart, CategoryTree, FilterState, Product, ProductId, Service, Work, WorkId,
};

/// Marker for the row the visitor last opened.
fn marker(selected: bool) -> &'static str {
    if selected { ">" } else { " " }
}

/// One line per product: id, title, price and category label. The row for
/// `highlight` is marked.
#[must_use]
pub fn render_products(
    products: &[Product],
    state: &FilterState,
    highlight: Option<&ProductId>,
) -> String {
    let mut out = String::new();
    if products.is_empty() {
        out.push_str("No products match your filters.\n");
        if state.is_filtered() {
            out.push_str("Try clearing the search or category.\n");
        }
        return out;
    }

    for product in products {
        let _ = writeln!(
            out,
            "{} {:<26} {:<36} {:>14}  {}",
            marker(highlight == Some(&product.id)),
            product.id,
            product.title,
            product.price,
            product.category_label()
        );
    }
    let _ = writeln!(out, "\n{} product(s), sorted by {}", products.len(), state.sort);
    out
}

#[must_use]
pub fn render_product(product: &Product, buy_now_link: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.title);
    let _ = writeln!(out, "{}", product.category_label());
    let _ = writeln!(out, "{}", product.price);
    if !product.description.trim().is_empty() {
        let _ = writeln!(out, "\n{}", product.description.trim());
    }
    for url in &product.image_urls {
        let _ = writeln!(out, "image: {url}");
    }
    let _ = writeln!(out, "\nBuy now: {buy_now_link}");
    out
}

/// Top-level categories with their subcategories indented beneath.
#[must_use]
pub fn render_categories(tree: &CategoryTree) -> String {
    let mut out = String::new();
    for category in tree.top_level() {
        let _ = writeln!(out, "{}", category.name);
        for child in tree.children_of(&category.name) {
            let _ = writeln!(out, "  - {}", child.name);
        }
    }
    if out.is_empty() {
        out.push_str("No categories.\n");
    }
    out
}

#[must_use]
pub fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for entry in cart.entries() {
        let _ = writeln!(
            out,
            "{:<26} {:<36} x{:<3} {:>14}",
            entry.id,
            entry.title,
            entry.qty,
            entry.line_total()
        );
    }
    let _ = writeln!(
        out,
        "\n{} item(s), total {}",
        cart.item_count(),
        cart.total()
    );
    out
}

#[must_use]
pub fn render_works<'a>(
    works: impl IntoIterator<Item = &'a Work>,
    highlight: Option<&WorkId>,
) -> String {
    let mut out = String::new();
    for work in works {
        let tags = if work.tags.is_empty() {
            work.category.clone()
        } else {
            work.tags.join(", ")
        };
        let _ = writeln!(
            out,
            "{} {:<26} {:<40} [{tags}]",
            marker(highlight == Some(&work.id)),
            work.id,
            work.title
        );
        if let Some(link) = &work.link {
            let _ = writeln!(out, "{:<28} {link}", "");
        }
    }
    if out.is_empty() {
        out.push_str("No works yet.\n");
    }
    out
}

#[must_use]
pub fn render_work(work: &Work) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", work.title);
    if !work.category.is_empty() {
        let _ = writeln!(out, "{}", work.category);
    }
    if !work.description.trim().is_empty() {
        let _ = writeln!(out, "\n{}", work.description.trim());
    }
    for url in &work.image_urls {
        let _ = writeln!(out, "image: {url}");
    }
    if let Some(link) = &work.link {
        let _ = writeln!(out, "link: {link}");
    }
    out
}

/// Services in display order with their most recent works.
#[must_use]
pub fn render_service_groups(groups: &[ServiceGroup<'_>]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "{} ({})", group.service.name, group.service.tag());
        if group.works.is_empty() {
            out.push_str("  (no works yet)\n");
        }
        for work in &group.works {
            let _ = writeln!(out, "  - {}", work.title);
        }
    }
    out
}

#[must_use]
pub fn render_services(services: &[Service]) -> String {
    let mut out = String::new();
    for service in services {
        let _ = writeln!(out, "{:<28} tag: {}", service.name, service.tag());
        if !service.description.trim().is_empty() {
            let _ = writeln!(out, "  {}", service.description.trim());
        }
    }
    if out.is_empty() {
        out.push_str("No services.\n");
    }
    out
}
