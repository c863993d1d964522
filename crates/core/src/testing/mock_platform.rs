//! Mock host platform for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::platform::{Platform, PlatformError, SharePayload};

#[derive(Debug, Default)]
struct PlatformState {
    url: String,
    native_share: bool,
    share_error: Option<PlatformError>,
    clipboard_error: Option<PlatformError>,
    shared: Vec<SharePayload>,
    clipboard: Vec<String>,
    opened: Vec<String>,
}

/// Mock platform recording shares, clipboard writes and opened URLs.
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    state: Arc<Mutex<PlatformState>>,
}

impl MockPlatform {
    pub fn new(url: impl Into<String>) -> Self {
        let platform = Self::default();
        platform.lock().url = url.into();
        platform
    }

    fn lock(&self) -> MutexGuard<'_, PlatformState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_native_share(self) -> Self {
        self.lock().native_share = true;
        self
    }

    /// Make the next native share fail.
    pub fn fail_next_share(&self, error: PlatformError) {
        self.lock().share_error = Some(error);
    }

    /// Make the next clipboard write fail.
    pub fn fail_next_copy(&self, error: PlatformError) {
        self.lock().clipboard_error = Some(error);
    }

    pub fn shared(&self) -> Vec<SharePayload> {
        self.lock().shared.clone()
    }

    pub fn clipboard(&self) -> Vec<String> {
        self.lock().clipboard.clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.lock().opened.clone()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    fn current_url(&self) -> String {
        self.lock().url.clone()
    }

    fn supports_native_share(&self) -> bool {
        self.lock().native_share
    }

    async fn native_share(&self, payload: &SharePayload) -> Result<(), PlatformError> {
        let mut state = self.lock();
        if !state.native_share {
            return Err(PlatformError::Unsupported("native share".to_string()));
        }
        if let Some(error) = state.share_error.take() {
            return Err(error);
        }
        state.shared.push(payload.clone());
        Ok(())
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        let mut state = self.lock();
        if let Some(error) = state.clipboard_error.take() {
            return Err(error);
        }
        state.clipboard.push(text.to_string());
        Ok(())
    }

    fn open_in_new_context(&self, url: &str) {
        self.lock().opened.push(url.to_string());
    }
}
