//! Product records and their ingestion from API payloads.

use serde::{Deserialize, Serialize};

use super::images::{ImageResolver, RawImages};
use crate::types::{Price, ProductId};

/// Label shown when a product carries no category.
pub const DEFAULT_CATEGORY_LABEL: &str = "Fire Acoustic";

/// A product exactly as the API returns it.
///
/// Every field except the identifier and title is optional on the wire;
/// [`Product::from_raw`] fills the gaps.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(alias = "_id")]
    pub id: ProductId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: serde_json::Value,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(flatten)]
    pub images: RawImages,
}

/// A catalog product, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub sub_category: Option<String>,
    pub image_url: Option<String>,
    pub image_urls: Vec<String>,
}

impl Product {
    /// Normalize a raw API record.
    ///
    /// Missing or malformed prices become zero, missing text fields become
    /// empty, and image fields collapse into `image_urls`.
    #[must_use]
    pub fn from_raw(raw: RawProduct, images: &ImageResolver) -> Self {
        let image_urls = images.resolve_all(&raw.images);
        Self {
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            price: Price::lenient(&raw.price),
            category: raw.category.unwrap_or_default(),
            sub_category: raw.sub_category.filter(|s| !s.is_empty()),
            image_url: image_urls.first().cloned(),
            image_urls,
        }
    }

    /// Normalize a whole listing.
    #[must_use]
    pub fn from_raw_list(raw: Vec<RawProduct>, images: &ImageResolver) -> Vec<Self> {
        raw.into_iter().map(|p| Self::from_raw(p, images)).collect()
    }

    /// Category badge text: `category • subcategory`, the bare category, or
    /// the house label when neither is set.
    #[must_use]
    pub fn category_label(&self) -> String {
        match (&self.sub_category, self.category.is_empty()) {
            (Some(sub), _) => format!("{} • {sub}", self.category),
            (None, false) => self.category.clone(),
            (None, true) => DEFAULT_CATEGORY_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_raw_fills_defaults() {
        let raw: RawProduct = serde_json::from_value(json!({
            "_id": "65a1",
            "title": "Bass Trap",
        }))
        .unwrap();

        let product = Product::from_raw(raw, &ImageResolver::default());
        assert_eq!(product.id.as_str(), "65a1");
        assert_eq!(product.price, Price::ZERO);
        assert_eq!(product.description, "");
        assert_eq!(product.category, "");
        assert_eq!(product.sub_category, None);
        assert_eq!(product.image_url, None);
        assert!(product.image_urls.is_empty());
    }

    #[test]
    fn test_from_raw_normalizes_fields() {
        let raw: RawProduct = serde_json::from_value(json!({
            "id": 7,
            "title": "Diffuser Panel",
            "description": "Quadratic residue diffuser",
            "price": "12500",
            "category": "Acoustic",
            "subCategory": "",
            "imageUrl": "/uploads/diffuser.jpg"
        }))
        .unwrap();

        let resolver = ImageResolver::from_api_base("http://localhost:5000/api");
        let product = Product::from_raw(raw, &resolver);
        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.price, Price::from_rupees(12_500));
        assert_eq!(product.sub_category, None);
        assert_eq!(
            product.image_url.as_deref(),
            Some("http://localhost:5000/uploads/diffuser.jpg")
        );
        assert_eq!(product.image_urls.len(), 1);
    }

    #[test]
    fn test_category_label() {
        let mut product = Product::from_raw(
            serde_json::from_value(json!({"id": "1", "title": "A"})).unwrap(),
            &ImageResolver::default(),
        );
        assert_eq!(product.category_label(), "Fire Acoustic");

        product.category = "Acoustic".to_string();
        assert_eq!(product.category_label(), "Acoustic");

        product.sub_category = Some("Panels".to_string());
        assert_eq!(product.category_label(), "Acoustic • Panels");
    }
}
