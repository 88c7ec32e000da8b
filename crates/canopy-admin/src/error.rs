use canopy_client::ClientError;
use thiserror::Error;

/// Errors the admin shell returns to its caller instead of alerting.
///
/// Only the initial load propagates; every later failure is surfaced to the
/// user through the [`crate::Notifier`] and reported as an [`crate::Outcome`].
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("failed to load admin data: {0}")]
    Load(#[from] ClientError),
}
