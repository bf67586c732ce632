//! Admin client for catalog and portfolio maintenance.
//!
//! Every request carries the `x-admin-token` header. The token comes from
//! `FIRE_ADMIN_TOKEN` and stays wrapped in a [`SecretString`] until the
//! header is built; the header value itself is marked sensitive so it never
//! shows up in debug output.
//!
//! [`SecretString`]: secrecy::SecretString

mod fields;

pub use fields::{NewCategory, ProductFields, ServiceFields, WorkFields, parse_price};

use std::sync::Arc;

use fire_productions_core::portfolio::RawWork;
use fire_productions_core::{
    Category, CategoryId, ImageResolver, Product, ProductId, RawProduct, Service, ServiceId, Work,
    WorkId,
};
use reqwest::Method;
use reqwest::header::HeaderValue;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, instrument};

use crate::api::{server_message, urlencode_segment};
use crate::config::CliConfig;

/// Header the API checks the admin token against.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// No token configured.
    #[error("Missing environment variable: FIRE_ADMIN_TOKEN")]
    MissingToken,

    /// Token cannot be sent as a header value.
    #[error("Admin token contains characters not allowed in a header")]
    InvalidToken,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token was refused.
    #[error("Unauthorized: admin token rejected")]
    Unauthorized,

    /// Server cannot serve admin requests right now (no token configured
    /// server-side, or no database).
    #[error("Admin API unavailable: {0}")]
    Unavailable(String),

    /// Nothing at this path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation or conflict answer with the server's reason.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Any other non-success answer.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// Response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Required field left blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Update without any field to change.
    #[error("Nothing to update")]
    NothingToUpdate,
}

/// Token-bearing client for the write endpoints.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: String,
    token: HeaderValue,
    images: ImageResolver,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl AdminClient {
    /// Create an admin client from the configured token.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::MissingToken` if no token is configured, or an
    /// error if the token is not a valid header value or the HTTP client
    /// fails to build.
    pub fn new(config: &CliConfig) -> Result<Self, AdminError> {
        let secret = config
            .admin_token
            .as_ref()
            .ok_or(AdminError::MissingToken)?;
        let mut token =
            HeaderValue::from_str(secret.expose_secret()).map_err(|_| AdminError::InvalidToken)?;
        token.set_sensitive(true);

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                base_url: config.api_url.clone(),
                token,
                images: ImageResolver::from_api_base(&config.api_url),
            }),
        })
    }

    /// Start a request to `path` with the admin token attached.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'));
        self.inner
            .client
            .request(method, url)
            .header(ADMIN_TOKEN_HEADER, self.inner.token.clone())
    }

    /// Send and decode the JSON answer.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, AdminError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path,
                body = %body.chars().take(500).collect::<String>(),
                "Admin request failed"
            );
            return Err(error_for_status(status.as_u16(), path, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Send and ignore any body (deletes answer 204).
    async fn send_empty(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<(), AdminError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, path, "Admin request failed");
        Err(error_for_status(status.as_u16(), path, &body))
    }

    /// Check the token against the server.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Unauthorized` if the server refuses the token.
    #[instrument(skip(self))]
    pub async fn validate(&self) -> Result<(), AdminError> {
        let path = "admin/validate";
        let _: serde_json::Value = self
            .send_json(self.request(Method::GET, path), path)
            .await?;
        info!("Admin token accepted");
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// # Errors
    ///
    /// Returns `AdminError::MissingField` before sending if a required field
    /// is blank, or the server's rejection.
    #[instrument(skip(self, body))]
    pub async fn create_product(&self, body: &ProductFields) -> Result<Product, AdminError> {
        body.check_create()?;
        let path = "products";
        let raw: RawProduct = self
            .send_json(self.request(Method::POST, path).json(body), path)
            .await?;
        let product = Product::from_raw(raw, &self.inner.images);
        info!(id = %product.id, "Created product");
        Ok(product)
    }

    /// # Errors
    ///
    /// Returns `AdminError::NothingToUpdate` if no field is set.
    #[instrument(skip(self, body), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        body: &ProductFields,
    ) -> Result<Product, AdminError> {
        if body.is_empty() {
            return Err(AdminError::NothingToUpdate);
        }
        let path = record_path("products", id.as_str());
        let raw: RawProduct = self
            .send_json(self.request(Method::PUT, &path).json(body), &path)
            .await?;
        info!("Updated product");
        Ok(Product::from_raw(raw, &self.inner.images))
    }

    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if no product has this id.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), AdminError> {
        let path = record_path("products", id.as_str());
        self.send_empty(self.request(Method::DELETE, &path), &path)
            .await?;
        info!("Deleted product");
        Ok(())
    }

    // =========================================================================
    // Works
    // =========================================================================

    /// # Errors
    ///
    /// Returns `AdminError::MissingField` before sending if a required field
    /// is blank, or the server's rejection.
    #[instrument(skip(self, body))]
    pub async fn create_work(&self, body: &WorkFields) -> Result<Work, AdminError> {
        body.check_create()?;
        let path = "works";
        let raw: RawWork = self
            .send_json(self.request(Method::POST, path).json(body), path)
            .await?;
        let work = Work::from_raw(raw, &self.inner.images);
        info!(id = %work.id, "Created work");
        Ok(work)
    }

    /// # Errors
    ///
    /// Returns `AdminError::NothingToUpdate` if no field is set.
    #[instrument(skip(self, body), fields(id = %id))]
    pub async fn update_work(&self, id: &WorkId, body: &WorkFields) -> Result<Work, AdminError> {
        if body.is_empty() {
            return Err(AdminError::NothingToUpdate);
        }
        let path = record_path("works", id.as_str());
        let raw: RawWork = self
            .send_json(self.request(Method::PUT, &path).json(body), &path)
            .await?;
        info!("Updated work");
        Ok(Work::from_raw(raw, &self.inner.images))
    }

    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if no work has this id.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_work(&self, id: &WorkId) -> Result<(), AdminError> {
        let path = record_path("works", id.as_str());
        self.send_empty(self.request(Method::DELETE, &path), &path)
            .await?;
        info!("Deleted work");
        Ok(())
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// # Errors
    ///
    /// Returns `AdminError::MissingField` before sending if a required field
    /// is blank, or `AdminError::Rejected` (409) for a duplicate name.
    #[instrument(skip(self, body))]
    pub async fn create_service(&self, body: &ServiceFields) -> Result<Service, AdminError> {
        body.check_create()?;
        let path = "services";
        let service: Service = self
            .send_json(self.request(Method::POST, path).json(body), path)
            .await?;
        info!(id = %service.id, "Created service");
        Ok(self.resolve_service(service))
    }

    /// # Errors
    ///
    /// Returns `AdminError::NothingToUpdate` if no field is set.
    #[instrument(skip(self, body), fields(id = %id))]
    pub async fn update_service(
        &self,
        id: &ServiceId,
        body: &ServiceFields,
    ) -> Result<Service, AdminError> {
        if body.is_empty() {
            return Err(AdminError::NothingToUpdate);
        }
        let path = record_path("services", id.as_str());
        let service: Service = self
            .send_json(self.request(Method::PUT, &path).json(body), &path)
            .await?;
        info!("Updated service");
        Ok(self.resolve_service(service))
    }

    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if no service has this id.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_service(&self, id: &ServiceId) -> Result<(), AdminError> {
        let path = record_path("services", id.as_str());
        self.send_empty(self.request(Method::DELETE, &path), &path)
            .await?;
        info!("Deleted service");
        Ok(())
    }

    fn resolve_service(&self, mut service: Service) -> Service {
        service.image_url = service
            .image_url
            .as_deref()
            .and_then(|raw| self.inner.images.resolve(raw));
        service
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Create a category, or a subcategory when `category` names a parent.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Rejected` (409) if the name already exists.
    #[instrument(skip(self, category), fields(name = category.name()))]
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, AdminError> {
        let path = "categories";
        let created: Category = self
            .send_json(self.request(Method::POST, path).json(category), path)
            .await?;
        info!(id = %created.id, "Created category");
        Ok(created)
    }

    /// Delete a category. The server removes its subcategories too.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if no category has this id.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), AdminError> {
        let path = record_path("categories", id.as_str());
        self.send_empty(self.request(Method::DELETE, &path), &path)
            .await?;
        info!("Deleted category");
        Ok(())
    }
}

fn record_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencode_segment(id))
}

/// Map a failed admin answer to an error.
fn error_for_status(status: u16, path: &str, body: &str) -> AdminError {
    match (status, server_message(body)) {
        (401 | 403, _) => AdminError::Unauthorized,
        (404, _) => AdminError::NotFound(path.to_string()),
        (503, message) => {
            AdminError::Unavailable(message.unwrap_or_else(|| "service unavailable".to_string()))
        }
        (400..=499, Some(message)) => AdminError::Rejected { status, message },
        _ => AdminError::Api {
            status,
            body: body.chars().take(200).collect(),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;

    fn config(token: Option<&str>) -> CliConfig {
        CliConfig {
            api_url: "https://fire.lk/api".to_string(),
            whatsapp_number: "94743678001".to_string(),
            state_file: PathBuf::from("unused.json"),
            http_timeout: Duration::from_secs(1),
            admin_token: token.map(|t| SecretString::from(t.to_string())),
        }
    }

    fn client() -> AdminClient {
        AdminClient::new(&config(Some("s3cret"))).unwrap()
    }

    #[test]
    fn test_token_is_required() {
        assert!(matches!(
            AdminClient::new(&config(None)),
            Err(AdminError::MissingToken)
        ));
        assert!(matches!(
            AdminClient::new(&config(Some("bad\ntoken"))),
            Err(AdminError::InvalidToken)
        ));
    }

    #[test]
    fn test_requests_carry_the_token() {
        let request = client()
            .request(Method::DELETE, &record_path("works", "66b0 c1"))
            .build()
            .unwrap();

        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(request.url().as_str(), "https://fire.lk/api/works/66b0%20c1");
        let token = request.headers().get(ADMIN_TOKEN_HEADER).unwrap();
        assert_eq!(token.to_str().unwrap(), "s3cret");
        assert!(token.is_sensitive());
    }

    #[test]
    fn test_update_request_body() {
        let fields = ProductFields {
            title: Some("Bass Trap XL".to_string()),
            ..ProductFields::default()
        };
        let request = client()
            .request(Method::PUT, &record_path("products", "p1"))
            .json(&fields)
            .build()
            .unwrap();

        assert_eq!(request.url().path(), "/api/products/p1");
        assert_eq!(
            request.headers().get(reqwest::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = request.body().and_then(reqwest::Body::as_bytes).unwrap();
        assert_eq!(body, br#"{"title":"Bass Trap XL"}"#);
    }

    #[test]
    fn test_debug_hides_the_token() {
        let debug = format!("{:?}", client());
        assert!(debug.contains("fire.lk"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            error_for_status(401, "admin/validate", r#"{"message":"Unauthorized"}"#),
            AdminError::Unauthorized
        ));
        assert!(matches!(
            error_for_status(404, "works/w9", r#"{"message":"Not found"}"#),
            AdminError::NotFound(ref p) if p == "works/w9"
        ));
        assert!(matches!(
            error_for_status(503, "products", r#"{"message":"Admin not configured"}"#),
            AdminError::Unavailable(ref m) if m == "Admin not configured"
        ));
        assert!(matches!(
            error_for_status(
                409,
                "services",
                r#"{"message":"Service with this name already exists"}"#
            ),
            AdminError::Rejected { status: 409, ref message }
                if message == "Service with this name already exists"
        ));
        assert!(matches!(
            error_for_status(400, "categories", r#"{"message":"Invalid parent id"}"#),
            AdminError::Rejected { status: 400, .. }
        ));
        assert!(matches!(
            error_for_status(500, "products", "Internal Server Error"),
            AdminError::Api { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn test_invalid_fields_are_not_sent() {
        // Nothing listens here; reaching the network would be an Http error.
        let mut config = config(Some("s3cret"));
        config.api_url = "http://127.0.0.1:9/api".to_string();
        let admin = AdminClient::new(&config).unwrap();

        assert!(matches!(
            admin.create_product(&ProductFields::default()).await,
            Err(AdminError::MissingField("title"))
        ));
        assert!(matches!(
            admin
                .update_work(&WorkId::new("w1"), &WorkFields::default())
                .await,
            Err(AdminError::NothingToUpdate)
        ));
        assert!(matches!(
            admin.delete_service(&ServiceId::new("s1")).await,
            Err(AdminError::Http(_))
        ));
    }
}
