use canopy_core::bundles::BundlePayload;
use canopy_core::{Bundle, EntityId};
use reqwest::Method;
use serde::Deserialize;

use super::CanopyClient;
use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct BundleList {
    #[serde(default)]
    bundles: Vec<Bundle>,
}

impl CanopyClient {
    /// `GET /api/bundles`, unwrapped from `{ "bundles": [...] }`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`], [`ClientError::Http`], or
    /// [`ClientError::Deserialize`].
    pub async fn list_bundles(&self) -> Result<Vec<Bundle>, ClientError> {
        let url = self.endpoint("api/bundles", &[])?;
        let list: BundleList = self.get_json(url).await?;
        Ok(list.bundles)
    }

    /// `POST /api/bundles`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] or [`ClientError::Http`].
    pub async fn create_bundle(&self, payload: &BundlePayload) -> Result<(), ClientError> {
        let url = self.endpoint("api/bundles", &[])?;
        self.send(Method::POST, url, Some(payload)).await
    }

    /// `DELETE /api/bundles/:id`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] or [`ClientError::Http`].
    pub async fn delete_bundle(&self, id: EntityId) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("api/bundles/{id}"), &[])?;
        self.send::<()>(Method::DELETE, url, None).await
    }
}
