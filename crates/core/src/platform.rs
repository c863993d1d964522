//! Host platform capabilities used by the share and trailer actions.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    /// The viewer dismissed the share sheet.
    #[error("Share cancelled")]
    Cancelled,

    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("Platform operation failed: {0}")]
    Failed(String),
}

/// Content handed to the native share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[async_trait]
pub trait Platform: Send + Sync {
    /// Address of the page currently shown.
    fn current_url(&self) -> String;

    fn supports_native_share(&self) -> bool;

    async fn native_share(&self, payload: &SharePayload) -> Result<(), PlatformError>;

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError>;

    /// Open `url` without leaving the current page.
    fn open_in_new_context(&self, url: &str);
}
