//! Platform capabilities as seen from an HTTP response.
//!
//! The server has no share sheet, clipboard or browser. "Copying" a link means
//! handing the URL back in the response, and opening a trailer becomes a
//! redirect issued by the handler.

use async_trait::async_trait;
use tracing::debug;

use cinelog_core::{MovieId, Platform, PlatformError, SharePayload};

pub struct ResponsePlatform {
    page_url: String,
}

impl ResponsePlatform {
    /// Link for the page at `route`.
    ///
    /// The id is written the way the page fetches it (`0550` and ` +550` both
    /// become `550`). A route that is not a movie id never loads, so it is
    /// never shared.
    pub fn new(public_base_url: &str, route: &str) -> Self {
        let segment = route
            .parse::<MovieId>()
            .map(|id| id.to_string())
            .unwrap_or_else(|_| route.to_string());
        Self {
            page_url: format!(
                "{}/movies/{}",
                public_base_url.trim_end_matches('/'),
                segment
            ),
        }
    }
}

#[async_trait]
impl Platform for ResponsePlatform {
    fn current_url(&self) -> String {
        self.page_url.clone()
    }

    fn supports_native_share(&self) -> bool {
        false
    }

    async fn native_share(&self, _payload: &SharePayload) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported(
            "native share is not available over HTTP".to_string(),
        ))
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        debug!(url = %text, "Returning share link to client");
        Ok(())
    }

    fn open_in_new_context(&self, url: &str) {
        debug!(url = %url, "Trailer will be served as a redirect");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_response_platform() {
        let platform = ResponsePlatform::new("http://localhost:3000/", "550");
        assert_eq!(platform.current_url(), "http://localhost:3000/movies/550");
        assert!(!platform.supports_native_share());
        assert!(platform.copy_to_clipboard("x").await.is_ok());

        let payload = SharePayload {
            title: "Fight Club".to_string(),
            text: String::new(),
            url: platform.current_url(),
        };
        assert!(matches!(
            platform.native_share(&payload).await,
            Err(PlatformError::Unsupported(_))
        ));
    }

    #[test]
    fn test_response_platform_canonical_id() {
        for route in ["0550", "+550", " 550 "] {
            let platform = ResponsePlatform::new("http://localhost:3000", route);
            assert_eq!(platform.current_url(), "http://localhost:3000/movies/550");
        }
    }
}
