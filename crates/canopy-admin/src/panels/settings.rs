use canopy_client::ClientError;
use canopy_core::MenuSettings;

use super::Outcome;
use crate::notify::Notifier;
use crate::shell::AdminShell;

impl<N: Notifier> AdminShell<N> {
    /// Editable copy of the menu settings. Changes are local until
    /// [`AdminShell::save_settings`].
    pub fn settings_mut(&mut self) -> &mut MenuSettings {
        &mut self.settings
    }

    #[must_use]
    pub fn is_saving_settings(&self) -> bool {
        self.settings_saving
    }

    /// Posts the current settings document, unknown keys included.
    pub async fn save_settings(&mut self) -> Outcome {
        let settings = self.settings.clone();
        self.settings_request("Failed to save menu settings", |client| async move {
            client.save_menu_settings(&settings).await
        })
        .await
    }

    /// Restores server defaults after confirmation.
    pub async fn reset_settings(&mut self) -> Outcome {
        if self.settings_saving {
            return Outcome::Busy;
        }
        if !self
            .notifier()
            .confirm("Reset all menu settings to their defaults? Your customizations will be lost.")
        {
            return Outcome::Cancelled;
        }
        self.settings_request("Failed to reset menu settings", |client| async move {
            client.reset_menu_settings().await
        })
        .await
    }

    async fn settings_request<F, Fut>(&mut self, context: &str, op: F) -> Outcome
    where
        F: FnOnce(canopy_client::CanopyClient) -> Fut,
        Fut: std::future::Future<Output = Result<(), ClientError>>,
    {
        if self.settings_saving {
            return Outcome::Busy;
        }
        self.settings_saving = true;
        let result = op(self.client().clone()).await;
        self.settings_saving = false;

        match result {
            Ok(()) => {
                tracing::info!(context, "menu settings updated");
                if let Err(err) = self.refresh_all().await {
                    tracing::warn!(error = %err, "refresh after settings change failed");
                    self.notifier()
                        .alert(&format!("Failed to refresh data: {}", err.user_message()));
                }
                Outcome::Applied
            }
            Err(err) => {
                tracing::warn!(context, error = %err, "menu settings request failed");
                self.notifier()
                    .alert(&format!("{context}: {}", err.user_message()));
                Outcome::Failed
            }
        }
    }
}
