pub mod bulk;
pub mod client;
pub mod error;

pub use bulk::{BulkAction, BulkRequest, ProductBulkUpdate};
pub use client::CanopyClient;
pub use error::ClientError;
