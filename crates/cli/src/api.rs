//! Fire Productions REST API client.
//!
//! Listings come back as raw JSON records and are normalized through the
//! core ingestion types before anything else sees them. Works and services
//! can additionally be served from a [`TimedCache`] kept in the state file.
//! The contact form is the one write this client performs.

use std::sync::Arc;

use chrono::Utc;
use fire_productions_core::portfolio::{RawWork, order_services};
use fire_productions_core::storage::{TimedCache, keys};
use fire_productions_core::{
    Category, CategoryTree, ContactMessage, ContactReceipt, ImageResolver, KeyValueStore, Product,
    ProductId, RawProduct, Service, Work, WorkId,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::CliConfig;

/// Errors that can occur when talking to the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status.
    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// API refused the request and said why.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No record with the requested id.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

/// Client for the storefront's public endpoints.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    images: ImageResolver,
    cache: TimedCache,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CliConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
                images: ImageResolver::from_api_base(&config.api_url),
                cache: TimedCache::default(),
            }),
        })
    }

    /// Resolver for image paths returned by this API.
    #[must_use]
    pub fn images(&self) -> &ImageResolver {
        &self.inner.images
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` relative to the API base and decode the JSON body.
    async fn execute<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.inner.client.get(&url).send().await?;
        read_json(response, &url).await
    }

    /// POST `body` as JSON to `path` and decode the JSON answer.
    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: serde::Serialize + Sync,
    {
        let url = self.url(path);
        let response = self.inner.client.post(&url).json(body).send().await?;
        read_json(response, &url).await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List every product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let raw: Vec<RawProduct> = self.execute("products").await?;
        let products = Product::from_raw_list(raw, &self.inner.images);
        info!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Look up one product. The API has no per-product endpoint, so this
    /// searches the listing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no product has this id.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.list_products()
            .await?
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| ApiError::NotFound {
                kind: "Product",
                id: id.to_string(),
            })
    }

    /// The category taxonomy.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a category list.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<CategoryTree, ApiError> {
        let categories: Vec<Category> = self.execute("categories").await?;
        info!(count = categories.len(), "Fetched categories");
        Ok(categories.into())
    }

    // =========================================================================
    // Portfolio
    // =========================================================================

    /// List every work, newest first as served.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a work list.
    #[instrument(skip(self))]
    pub async fn list_works(&self) -> Result<Vec<Work>, ApiError> {
        let raw: Vec<RawWork> = self.execute("works").await?;
        let works = Work::from_raw_list(raw, &self.inner.images);
        info!(count = works.len(), "Fetched works");
        Ok(works)
    }

    /// Fetch one work, falling back to a listing search when the API has no
    /// per-work endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no work has this id.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_work(&self, id: &WorkId) -> Result<Work, ApiError> {
        let path = format!("works/{}", urlencode_segment(id.as_str()));
        match self.execute::<RawWork>(&path).await {
            Ok(raw) => return Ok(Work::from_raw(raw, &self.inner.images)),
            Err(ApiError::Status { .. } | ApiError::Rejected { .. } | ApiError::Parse(_)) => {
                debug!("Single work lookup unavailable, searching listing");
            }
            Err(e) => return Err(e),
        }

        self.list_works()
            .await?
            .into_iter()
            .find(|w| &w.id == id)
            .ok_or_else(|| ApiError::NotFound {
                kind: "Work",
                id: id.to_string(),
            })
    }

    /// List services in display order with image paths resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a service list.
    #[instrument(skip(self))]
    pub async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        let mut services: Vec<Service> = self.execute("services").await?;
        for service in &mut services {
            service.image_url = service
                .image_url
                .as_deref()
                .and_then(|raw| self.inner.images.resolve(raw));
        }
        order_services(&mut services);
        info!(count = services.len(), "Fetched services");
        Ok(services)
    }

    // =========================================================================
    // Contact
    // =========================================================================

    /// Submit a contact form message.
    ///
    /// The server answers 201 once the message is stored, or 202 with a
    /// note when it accepted the message without storing it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the server's reason if it refuses
    /// the message.
    #[instrument(skip(self, message), fields(email = %message.email()))]
    pub async fn send_message(&self, message: &ContactMessage) -> Result<ContactReceipt, ApiError> {
        let receipt: ContactReceipt = self.post("contact", message).await?;
        if let Some(note) = &receipt.note {
            warn!(note = %note, "Contact message accepted but not stored");
        } else {
            info!("Contact message sent");
        }
        Ok(receipt)
    }

    // =========================================================================
    // Cached listings
    // =========================================================================

    /// [`Self::list_works`], served from `store` while the cached copy is
    /// fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is stale and the fetch fails.
    pub async fn cached_works<S: KeyValueStore>(&self, store: &mut S) -> Result<Vec<Work>, ApiError> {
        if let Some(works) = self.inner.cache.read(&*store, keys::WORKS_CACHE, Utc::now()) {
            debug!("Serving works from cache");
            return Ok(works);
        }
        let works = self.list_works().await?;
        self.remember(store, keys::WORKS_CACHE, &works);
        Ok(works)
    }

    /// [`Self::list_services`], served from `store` while the cached copy is
    /// fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is stale and the fetch fails.
    pub async fn cached_services<S: KeyValueStore>(
        &self,
        store: &mut S,
    ) -> Result<Vec<Service>, ApiError> {
        if let Some(services) = self.inner.cache.read(&*store, keys::SERVICES_CACHE, Utc::now()) {
            debug!("Serving services from cache");
            return Ok(services);
        }
        let services = self.list_services().await?;
        self.remember(store, keys::SERVICES_CACHE, &services);
        Ok(services)
    }

    fn remember<S, T>(&self, store: &mut S, key: &str, data: &T)
    where
        S: KeyValueStore,
        T: serde::Serialize,
    {
        if let Err(e) = self.inner.cache.write(store, key, data, Utc::now()) {
            warn!(key, error = %e, "Failed to cache listing");
        }
    }
}

/// Decode a successful JSON response, or map the failure status.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
) -> Result<T, ApiError> {
    let status = response.status();

    // Get response body as text first for better error diagnostics
    let response_text = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            url = %url,
            body = %response_text.chars().take(500).collect::<String>(),
            "API returned non-success status"
        );
        return Err(status_error(status.as_u16(), &response_text));
    }

    serde_json::from_str(&response_text).map_err(|e| {
        tracing::error!(
            error = %e,
            url = %url,
            body = %response_text.chars().take(500).collect::<String>(),
            "Failed to parse API response"
        );
        ApiError::Parse(e)
    })
}

/// Map a failure status to an error. Validation and conflict answers carry
/// a `{message}` body that is surfaced as is.
fn status_error(status: u16, body: &str) -> ApiError {
    match server_message(body) {
        Some(message) if matches!(status, 400 | 409 | 422) => ApiError::Rejected { status, message },
        _ => ApiError::Status {
            status,
            body: body.chars().take(200).collect(),
        },
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// The `message` field of a JSON error body, if there is one.
pub(crate) fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// Percent-encode a single path segment.
pub(crate) fn urlencode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
