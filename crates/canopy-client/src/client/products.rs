use canopy_core::products::ProductPayload;
use canopy_core::{EntityId, Product};
use reqwest::Method;
use serde::Deserialize;

use super::CanopyClient;
use crate::bulk::BulkRequest;
use crate::error::ClientError;

/// `GET /api/products` body. A missing `products` key reads as empty.
#[derive(Debug, Deserialize)]
struct ProductList {
    #[serde(default)]
    products: Vec<Product>,
}

impl CanopyClient {
    /// `GET /api/products`, unwrapped from its `{ "products": [...] }`
    /// envelope.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a product list.
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let url = self.endpoint("api/products", &[])?;
        let list: ProductList = self.get_json(url).await?;
        Ok(list.products)
    }

    /// `POST /api/products`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] on a non-2xx status, [`ClientError::Http`] on
    /// network failure.
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<(), ClientError> {
        let url = self.endpoint("api/products", &[])?;
        self.send(Method::POST, url, Some(payload)).await
    }

    /// `PUT /api/products/:id`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] on a non-2xx status, [`ClientError::Http`] on
    /// network failure.
    pub async fn update_product(
        &self,
        id: EntityId,
        payload: &ProductPayload,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("api/products/{id}"), &[])?;
        self.send(Method::PUT, url, Some(payload)).await
    }

    /// `DELETE /api/products/:id`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] on a non-2xx status, [`ClientError::Http`] on
    /// network failure.
    pub async fn delete_product(&self, id: EntityId) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("api/products/{id}"), &[])?;
        self.send::<()>(Method::DELETE, url, None).await
    }

    /// `POST /api/products/bulk`. The batch succeeds or fails as a whole.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] on a non-2xx status, [`ClientError::Http`] on
    /// network failure.
    pub async fn bulk_products(&self, request: &BulkRequest) -> Result<(), ClientError> {
        let url = self.endpoint("api/products/bulk", &[])?;
        self.send(Method::POST, url, Some(request)).await
    }
}
