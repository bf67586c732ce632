//! Integration tests for Fire Productions.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline tests (catalog pipeline, persisted cart, listing caches)
//! cargo test -p fire-productions-integration-tests
//!
//! # Live API tests against a running backend
//! FIRE_API_URL=http://localhost:5000/api \
//!     cargo test -p fire-productions-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `catalog_pipeline` - Raw API JSON through ingestion and filter/sort
//! - `cart_persistence` - Cart ledger persisted in the JSON state file
//! - `portfolio_cache` - Works/services grouping and the timed cache
//! - `live_api` - `ApiClient` against a real server (ignored by default)

use fire_productions_core::{ImageResolver, Product, RawProduct};
use serde_json::{Value, json};

/// API base used by the fixtures.
pub const FIXTURE_API_BASE: &str = "https://api.fire.lk/api";

/// Product listing in the shapes the API actually returns: `_id` or `id`,
/// numeric or string prices, and every image field variant.
#[must_use]
pub fn products_json() -> Value {
    json!([
        {
            "_id": "p1",
            "title": "Bass Trap",
            "description": "Corner absorber for low end",
            "price": 12500,
            "category": "Acoustic",
            "subCategory": "Traps",
            "imageUrls": ["/uploads/trap-1.jpg", "", "https://cdn.fire.lk/trap-2.jpg"]
        },
        {
            "id": 2,
            "title": "acoustic panel",
            "description": "Broadband panel",
            "price": "4500",
            "category": "Acoustic",
            "subCategory": "Panels",
            "imageUrl": "uploads/panel.jpg"
        },
        {
            "_id": "p3",
            "title": "XLR Cable",
            "price": "n/a",
            "category": "Audio",
            "image": "/uploads/xlr.jpg"
        },
        {
            "_id": "p4",
            "title": "Studio Monitor",
            "description": "Active near-field monitor",
            "price": 98000.5,
            "category": "Audio",
            "subCategory": "Speakers",
            "url": "https://cdn.fire.lk/monitor.png"
        }
    ])
}

/// [`products_json`] run through the ingestion boundary.
///
/// # Errors
///
/// Returns an error if the fixture no longer deserializes.
pub fn products() -> Result<Vec<Product>, serde_json::Error> {
    let raw: Vec<RawProduct> = serde_json::from_value(products_json())?;
    Ok(Product::from_raw_list(
        raw,
        &ImageResolver::from_api_base(FIXTURE_API_BASE),
    ))
}

/// Work listing, newest first.
#[must_use]
pub fn works_json() -> Value {
    json!([
        {"_id": "w1", "title": "Home Studio Build", "category": "Acoustic", "imageUrl": "/uploads/w1.jpg"},
        {"_id": "w2", "title": "Single Release", "tags": ["Music"]},
        {"_id": "w3", "title": "Short Film", "category": "Films", "tags": ["Music"]},
        {"_id": "w4", "title": "Church Hall Treatment", "category": "Acoustic"},
        {"_id": "w5", "title": "Podcast Room", "category": "Acoustic"},
        {"_id": "w6", "title": "Auditorium", "category": "Acoustic"}
    ])
}

/// Service listing as stored by the admin (unordered).
#[must_use]
pub fn services_json() -> Value {
    json!([
        {"_id": "s3", "name": "Film Production", "order": 3},
        {"_id": "s1", "name": "Acoustic Treatment", "category": "Acoustic", "order": 1},
        {"_id": "s4", "name": "Live Entertainment"},
        {"_id": "s2", "name": "Music Production", "order": 2}
    ])
}
