//! Image field normalization.
//!
//! Records coming from the API name their images inconsistently
//! (`imageUrl`, `image`, `url`, `imageUrls`). [`RawImages`] captures every
//! variant and [`ImageResolver`] collapses them into one ordered list of
//! absolute URLs at the ingestion boundary.

use serde::Deserialize;

/// Maximum number of images kept per record for display.
pub const MAX_DISPLAY_IMAGES: usize = 3;

/// Every image field a record may carry on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImages {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<Option<String>>>,
}

impl RawImages {
    /// The single-image fallback, in priority order.
    fn primary(&self) -> Option<&str> {
        [&self.image_url, &self.image, &self.url]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
    }
}

/// Resolves relative upload paths against the API's file origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResolver {
    files_origin: String,
}

impl ImageResolver {
    /// Build a resolver from the API base URL (e.g. `http://host:5000/api`).
    ///
    /// Uploaded files are served from the same origin without the `/api`
    /// suffix.
    #[must_use]
    pub fn from_api_base(api_base: &str) -> Self {
        let trimmed = api_base.trim_end_matches('/');
        let origin = trimmed.strip_suffix("/api").unwrap_or(trimmed);
        Self {
            files_origin: origin.to_string(),
        }
    }

    /// The origin relative paths are resolved against.
    #[must_use]
    pub fn files_origin(&self) -> &str {
        &self.files_origin
    }

    /// Resolve one raw URL. Blank input yields `None`.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<String> {
        let url = raw.trim();
        if url.is_empty() {
            return None;
        }
        if is_absolute(url) || self.files_origin.is_empty() {
            return Some(url.to_string());
        }
        if url.starts_with('/') {
            Some(format!("{}{url}", self.files_origin))
        } else {
            Some(format!("{}/{url}", self.files_origin))
        }
    }

    /// Collapse all image fields into at most [`MAX_DISPLAY_IMAGES`]
    /// resolved URLs.
    ///
    /// A non-empty `imageUrls` list wins; otherwise the first of
    /// `imageUrl`/`image`/`url` is used.
    #[must_use]
    pub fn resolve_all(&self, raw: &RawImages) -> Vec<String> {
        let listed: Vec<&str> = raw
            .image_urls
            .iter()
            .flatten()
            .flatten()
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .collect();

        let candidates = if listed.is_empty() {
            raw.primary().into_iter().collect()
        } else {
            listed
        };

        candidates
            .into_iter()
            .filter_map(|u| self.resolve(u))
            .take(MAX_DISPLAY_IMAGES)
            .collect()
    }
}

fn is_absolute(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
