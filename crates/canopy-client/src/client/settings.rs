use canopy_core::MenuSettings;
use reqwest::Method;
use serde::Deserialize;

use super::CanopyClient;
use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct SettingsEnvelope {
    #[serde(default)]
    settings: MenuSettings,
}

impl CanopyClient {
    /// `GET /api/menu-settings`, unwrapped from `{ "settings": {...} }`.
    /// A missing `settings` key yields the defaults.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`], [`ClientError::Http`], or
    /// [`ClientError::Deserialize`].
    pub async fn get_menu_settings(&self) -> Result<MenuSettings, ClientError> {
        let url = self.endpoint("api/menu-settings", &[])?;
        let envelope: SettingsEnvelope = self.get_json(url).await?;
        Ok(envelope.settings)
    }

    /// `POST /api/menu-settings` with the full settings object.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] or [`ClientError::Http`].
    pub async fn save_menu_settings(&self, settings: &MenuSettings) -> Result<(), ClientError> {
        let url = self.endpoint("api/menu-settings", &[])?;
        self.send(Method::POST, url, Some(settings)).await
    }

    /// `PUT /api/menu-settings` with no body: the backend restores defaults.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] or [`ClientError::Http`].
    pub async fn reset_menu_settings(&self) -> Result<(), ClientError> {
        let url = self.endpoint("api/menu-settings", &[])?;
        self.send::<()>(Method::PUT, url, None).await
    }
}
