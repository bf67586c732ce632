//! Catalog and portfolio maintenance commands.
//!
//! # Usage
//!
//! ```bash
//! # Check the token
//! fire admin validate
//!
//! # Add a subcategory under an existing category
//! fire admin categories create Panels --parent 66a0c1
//!
//! # Change a product's price
//! fire admin products update 66b0c1 --price 14500
//! ```
//!
//! # Environment Variables
//!
//! - `FIRE_ADMIN_TOKEN` - Admin token sent as `x-admin-token`

use fire_productions_core::storage::keys;
use fire_productions_core::{CategoryId, KeyValueStore, ProductId, ServiceId, WorkId};
use tracing::warn;

use crate::admin::{AdminClient, NewCategory, ProductFields, ServiceFields, WorkFields};
use crate::error::Result;
use crate::output::{render_services, render_work};

/// Check the configured token against the server.
///
/// # Errors
///
/// Returns an error if the token is refused or the server is unreachable.
pub async fn validate(admin: &AdminClient) -> Result<String> {
    admin.validate().await?;
    Ok("Admin token accepted.\n".to_string())
}

// =============================================================================
// Products
// =============================================================================

/// # Errors
///
/// Returns an error if a required field is blank or the server refuses.
pub async fn create_product(admin: &AdminClient, fields: &ProductFields) -> Result<String> {
    let product = admin.create_product(fields).await?;
    Ok(format!(
        "Created product {}: {} ({})\n",
        product.id, product.title, product.price
    ))
}

/// # Errors
///
/// Returns an error if no field is given or the server refuses.
pub async fn update_product(admin: &AdminClient, id: &str, fields: &ProductFields) -> Result<String> {
    let product = admin.update_product(&ProductId::new(id), fields).await?;
    Ok(format!(
        "Updated product {}: {} ({})\n",
        product.id, product.title, product.price
    ))
}

/// # Errors
///
/// Returns an error if the product does not exist or the server refuses.
pub async fn delete_product(admin: &AdminClient, id: &str) -> Result<String> {
    admin.delete_product(&ProductId::new(id)).await?;
    Ok(format!("Deleted product {id}\n"))
}

// =============================================================================
// Works
// =============================================================================

/// # Errors
///
/// Returns an error if a required field is blank or the server refuses.
pub async fn create_work<S: KeyValueStore>(
    admin: &AdminClient,
    store: &mut S,
    fields: &WorkFields,
) -> Result<String> {
    let work = admin.create_work(fields).await?;
    invalidate(store, keys::WORKS_CACHE);
    Ok(format!("Created work {}\n{}", work.id, render_work(&work)))
}

/// # Errors
///
/// Returns an error if no field is given or the server refuses.
pub async fn update_work<S: KeyValueStore>(
    admin: &AdminClient,
    store: &mut S,
    id: &str,
    fields: &WorkFields,
) -> Result<String> {
    let work = admin.update_work(&WorkId::new(id), fields).await?;
    invalidate(store, keys::WORKS_CACHE);
    Ok(format!("Updated work {}\n{}", work.id, render_work(&work)))
}

/// # Errors
///
/// Returns an error if the work does not exist or the server refuses.
pub async fn delete_work<S: KeyValueStore>(
    admin: &AdminClient,
    store: &mut S,
    id: &str,
) -> Result<String> {
    admin.delete_work(&WorkId::new(id)).await?;
    invalidate(store, keys::WORKS_CACHE);
    Ok(format!("Deleted work {id}\n"))
}

// =============================================================================
// Services
// =============================================================================

/// # Errors
///
/// Returns an error if a required field is blank or the name is taken.
pub async fn create_service<S: KeyValueStore>(
    admin: &AdminClient,
    store: &mut S,
    fields: &ServiceFields,
) -> Result<String> {
    let service = admin.create_service(fields).await?;
    invalidate(store, keys::SERVICES_CACHE);
    Ok(format!(
        "Created service {}\n{}",
        service.id,
        render_services(std::slice::from_ref(&service))
    ))
}

/// # Errors
///
/// Returns an error if no field is given or the server refuses.
pub async fn update_service<S: KeyValueStore>(
    admin: &AdminClient,
    store: &mut S,
    id: &str,
    fields: &ServiceFields,
) -> Result<String> {
    let service = admin.update_service(&ServiceId::new(id), fields).await?;
    invalidate(store, keys::SERVICES_CACHE);
    Ok(format!(
        "Updated service {}\n{}",
        service.id,
        render_services(std::slice::from_ref(&service))
    ))
}

/// # Errors
///
/// Returns an error if the service does not exist or the server refuses.
pub async fn delete_service<S: KeyValueStore>(
    admin: &AdminClient,
    store: &mut S,
    id: &str,
) -> Result<String> {
    admin.delete_service(&ServiceId::new(id)).await?;
    invalidate(store, keys::SERVICES_CACHE);
    Ok(format!("Deleted service {id}\n"))
}

// =============================================================================
// Categories
// =============================================================================

/// Create a category, or a subcategory of `parent`.
///
/// # Errors
///
/// Returns an error if the name is blank or already taken.
pub async fn create_category(
    admin: &AdminClient,
    name: &str,
    parent: Option<&str>,
) -> Result<String> {
    let category = NewCategory::new(name, parent.map(CategoryId::new))?;
    let created = admin.create_category(&category).await?;
    Ok(match &created.parent {
        Some(parent) => format!(
            "Created subcategory {} ({}) under {parent}\n",
            created.name, created.id
        ),
        None => format!("Created category {} ({})\n", created.name, created.id),
    })
}

/// Delete a category together with its subcategories.
///
/// # Errors
///
/// Returns an error if the category does not exist or the server refuses.
pub async fn delete_category(admin: &AdminClient, id: &str) -> Result<String> {
    admin.delete_category(&CategoryId::new(id)).await?;
    Ok(format!("Deleted category {id} and its subcategories\n"))
}

/// Drop a cached listing after a change so the next read refetches.
fn invalidate<S: KeyValueStore>(store: &mut S, key: &str) {
    if let Err(e) = store.remove(key) {
        warn!(key, error = %e, "Failed to drop cached listing");
    }
}
