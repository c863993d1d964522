//! REST client for the library API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cache::{LibraryCache, ListKind, DEFAULT_MAX_VIEWERS};
use super::{BookmarkStore, LibraryError, LibraryProvider, WatchedEntry, WatchedStore};
use crate::auth::Viewer;
use crate::catalog::MovieId;

/// Library API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Base URL of the library API (e.g., "http://localhost:5000/api").
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Viewers kept in the local library cache (default: 10000)
    #[serde(default = "default_cache_max_viewers")]
    pub cache_max_viewers: usize,
}

fn default_timeout() -> u32 {
    30
}

fn default_cache_max_viewers() -> usize {
    DEFAULT_MAX_VIEWERS
}

/// Client for the bookmark and watched endpoints of the library API.
///
/// A client created with [`LibraryClient::new`] is unbound; use
/// [`LibraryClient::for_viewer`] to obtain one that sends the viewer's token
/// and keeps that viewer's cache entries current.
#[derive(Clone)]
pub struct LibraryClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    viewer_key: String,
    cache: Arc<LibraryCache>,
}

/// Standard response envelope of the library API.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookmarkStatus {
    is_bookmarked: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchedStatus {
    is_watched: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewBookmark<'a> {
    movie_id: MovieId,
    movie_title: &'a str,
    movie_poster: &'a str,
}

impl LibraryClient {
    pub fn new(config: &LibraryConfig, cache: Arc<LibraryCache>) -> Result<Self, LibraryError> {
        if config.base_url.trim().is_empty() {
            return Err(LibraryError::Unavailable(
                "library base_url is not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
            viewer_key: Viewer::anonymous().user_id,
            cache,
        })
    }

    /// Same client, acting on behalf of `viewer`.
    pub fn for_viewer(&self, viewer: &Viewer) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: viewer.token.clone(),
            viewer_key: viewer.user_id.clone(),
            cache: Arc::clone(&self.cache),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn error_from(&self, response: Response) -> LibraryError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message);

        if status == 401 {
            // The token is no longer accepted; what we cached under it is stale.
            self.cache.forget(&self.viewer_key).await;
        }

        LibraryError::ApiError { status, message }
    }

    async fn read_envelope<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<Option<T>, LibraryError> {
        let status = response.status();
        if !status.is_success() {
            return Err(self.error_from(response).await);
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| LibraryError::ParseError(format!("Invalid library response: {}", e)))?;

        if !envelope.success {
            return Err(LibraryError::ApiError {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        Ok(envelope.data)
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, LibraryError> {
        debug!("Library GET {}", path);

        let response = self
            .authorized(self.client.get(self.url(path)))
            .send()
            .await?;

        self.read_envelope(response).await?.ok_or_else(|| {
            LibraryError::ParseError(format!("Missing data in response to {}", path))
        })
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), LibraryError> {
        debug!("Library POST {}", path);

        let response = self
            .authorized(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await?;

        self.read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), LibraryError> {
        debug!("Library DELETE {}", path);

        let response = self
            .authorized(self.client.delete(self.url(path)))
            .send()
            .await?;

        self.read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn remember(&self, kind: ListKind, movie_id: MovieId, present: bool) {
        self.cache
            .set(&self.viewer_key, kind, movie_id, present)
            .await;
    }
}

#[async_trait]
impl BookmarkStore for LibraryClient {
    async fn is_bookmarked(&self, movie_id: MovieId) -> Result<bool, LibraryError> {
        let status: BookmarkStatus = self
            .get_data(&format!("/bookmarks/check/{}", movie_id))
            .await?;
        Ok(status.is_bookmarked)
    }

    async fn is_bookmarked_local(&self, movie_id: MovieId) -> bool {
        self.cache
            .contains(&self.viewer_key, ListKind::Bookmarks, movie_id)
            .await
    }

    async fn remember_bookmarked(&self, movie_id: MovieId, bookmarked: bool) {
        self.remember(ListKind::Bookmarks, movie_id, bookmarked).await;
    }

    async fn add_bookmark(
        &self,
        movie_id: MovieId,
        title: &str,
        poster: &str,
    ) -> Result<(), LibraryError> {
        let body = NewBookmark {
            movie_id,
            movie_title: title,
            movie_poster: poster,
        };
        self.post("/bookmarks", &body).await?;
        self.remember(ListKind::Bookmarks, movie_id, true).await;
        Ok(())
    }

    async fn remove_bookmark(&self, movie_id: MovieId) -> Result<(), LibraryError> {
        self.delete(&format!("/bookmarks/{}", movie_id)).await?;
        self.remember(ListKind::Bookmarks, movie_id, false).await;
        Ok(())
    }
}

#[async_trait]
impl WatchedStore for LibraryClient {
    async fn is_watched(&self, movie_id: MovieId) -> Result<bool, LibraryError> {
        let status: WatchedStatus = self
            .get_data(&format!("/watched/check/{}", movie_id))
            .await?;
        Ok(status.is_watched)
    }

    async fn is_watched_local(&self, movie_id: MovieId) -> bool {
        self.cache
            .contains(&self.viewer_key, ListKind::Watched, movie_id)
            .await
    }

    async fn remember_watched(&self, movie_id: MovieId, watched: bool) {
        self.remember(ListKind::Watched, movie_id, watched).await;
    }

    async fn add_watched(&self, entry: &WatchedEntry) -> Result<(), LibraryError> {
        self.post("/watched", entry).await?;
        self.remember(ListKind::Watched, entry.movie_id, true).await;
        Ok(())
    }

    async fn remove_watched(&self, movie_id: MovieId) -> Result<(), LibraryError> {
        self.delete(&format!("/watched/{}", movie_id)).await?;
        self.remember(ListKind::Watched, movie_id, false).await;
        Ok(())
    }
}

impl LibraryProvider for LibraryClient {
    fn bookmarks_for(&self, viewer: &Viewer) -> Arc<dyn BookmarkStore> {
        Arc::new(self.for_viewer(viewer))
    }

    fn watched_for(&self, viewer: &Viewer) -> Arc<dyn WatchedStore> {
        Arc::new(self.for_viewer(viewer))
    }
}
