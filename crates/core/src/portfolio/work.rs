//! Portfolio works.

use serde::{Deserialize, Serialize};

use crate::catalog::{ImageResolver, RawImages};
use crate::types::WorkId;

/// A work exactly as the API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWork {
    #[serde(alias = "_id")]
    pub id: WorkId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub images: RawImages,
}

/// A portfolio project, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: WorkId,
    pub title: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub link: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
}

impl Work {
    /// Normalize a raw API record.
    #[must_use]
    pub fn from_raw(raw: RawWork, images: &ImageResolver) -> Self {
        Self {
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            image_urls: images.resolve_all(&raw.images),
            link: raw.link.filter(|l| !l.trim().is_empty()),
            category: raw.category.unwrap_or_default(),
            tags: raw.tags.unwrap_or_default(),
        }
    }

    /// Normalize a whole listing.
    #[must_use]
    pub fn from_raw_list(raw: Vec<RawWork>, images: &ImageResolver) -> Vec<Self> {
        raw.into_iter().map(|w| Self::from_raw(w, images)).collect()
    }

    /// Cover image, if any.
    #[must_use]
    pub fn cover(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Whether this work belongs to the service identified by `tag`: its
    /// category equals the tag or its tags contain it.
    #[must_use]
    pub fn is_tagged(&self, tag: &str) -> bool {
        self.category == tag || self.tags.iter().any(|t| t == tag)
    }
}

/// Works belonging to the service `tag`, in input order.
#[must_use]
pub fn works_for_tag<'a>(works: &'a [Work], tag: &str) -> Vec<&'a Work> {
    works.iter().filter(|w| w.is_tagged(tag)).collect()
}
