//! Request bodies for the admin endpoints.
//!
//! Create and update share one body type per record. Unset fields are left
//! out of the JSON, so an update only touches the fields that were given.

use fire_productions_core::types::price::parse_decimal;
use fire_productions_core::{CategoryId, Price};
use serde::Serialize;

use super::AdminError;

/// Product fields sent to `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
}

impl ProductFields {
    /// A new product needs a title, an uploaded image and a category.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::MissingField` for the first one missing.
    pub fn check_create(&self) -> Result<(), AdminError> {
        require("title", self.title.as_deref())?;
        require("image URL", self.image_url.as_deref())?;
        require("category", self.category.as_deref())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Work fields sent to `POST /works` and `PUT /works/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl WorkFields {
    /// A new work needs a title and an uploaded image.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::MissingField` for the first one missing.
    pub fn check_create(&self) -> Result<(), AdminError> {
        require("title", self.title.as_deref())?;
        require("image URL", self.image_url.as_deref())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Service fields sent to `POST /services` and `PUT /services/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl ServiceFields {
    /// A new service needs a name and a description.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::MissingField` for the first one missing.
    pub fn check_create(&self) -> Result<(), AdminError> {
        require("name", self.name.as_deref())?;
        require("description", self.description.as_deref())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body for `POST /categories`. Subcategories name their parent's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCategory {
    name: String,
    parent: Option<CategoryId>,
}

impl NewCategory {
    /// # Errors
    ///
    /// Returns `AdminError::MissingField` if `name` is blank.
    pub fn new(name: &str, parent: Option<CategoryId>) -> Result<Self, AdminError> {
        let name = name.trim();
        require("name", Some(name))?;
        Ok(Self {
            name: name.to_string(),
            parent: parent.filter(|p| !p.as_str().trim().is_empty()),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn parent(&self) -> Option<&CategoryId> {
        self.parent.as_ref()
    }
}

/// Parse a price typed by an admin. Negative amounts are refused rather
/// than clamped.
///
/// # Errors
///
/// Returns `AdminError::InvalidPrice` for non-numeric or negative input.
pub fn parse_price(input: &str) -> Result<Price, AdminError> {
    match parse_decimal(input) {
        Some(amount) if !amount.is_sign_negative() => Ok(Price::new(amount)),
        _ => Err(AdminError::InvalidPrice(input.trim().to_string())),
    }
}

fn require(field: &'static str, value: Option<&str>) -> Result<(), AdminError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(AdminError::MissingField(field)),
    }
}
