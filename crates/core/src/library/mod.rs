//! Viewer library: bookmarks and the watched list.
//!
//! Both lists live behind the library API. Each store exposes the
//! authoritative remote predicate plus a cached local one that never touches
//! the network; the detail page falls back to the local predicates when the
//! remote lookups fail.

mod cache;
mod client;

pub use cache::{LibraryCache, ListKind};
pub use client::{LibraryClient, LibraryConfig};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::Viewer;
use crate::catalog::MovieId;

/// Fallback message when a failure carries nothing worth showing.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Errors returned by library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API answered with an error status or an unsuccessful envelope.
    #[error("Library API error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    ApiError {
        status: u16,
        message: Option<String>,
    },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Library backend cannot be reached.
    #[error("Library unavailable: {0}")]
    Unavailable(String),
}

impl LibraryError {
    /// Message provided by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            LibraryError::ApiError {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Text to show the viewer for this failure.
    pub fn user_message(&self) -> String {
        self.server_message().unwrap_or(GENERIC_FAILURE).to_string()
    }
}

/// Watched-list record created when a movie is marked as watched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedEntry {
    pub movie_id: MovieId,
    pub movie_title: String,
    pub movie_poster: String,
    /// 0 means "not rated".
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Authoritative bookmark status.
    async fn is_bookmarked(&self, movie_id: MovieId) -> Result<bool, LibraryError>;

    /// Last known bookmark status, without a network call.
    async fn is_bookmarked_local(&self, movie_id: MovieId) -> bool;

    /// Record an authoritative bookmark status in the local cache.
    async fn remember_bookmarked(&self, movie_id: MovieId, bookmarked: bool);

    async fn add_bookmark(
        &self,
        movie_id: MovieId,
        title: &str,
        poster: &str,
    ) -> Result<(), LibraryError>;

    async fn remove_bookmark(&self, movie_id: MovieId) -> Result<(), LibraryError>;
}

#[async_trait]
pub trait WatchedStore: Send + Sync {
    /// Authoritative watched status.
    async fn is_watched(&self, movie_id: MovieId) -> Result<bool, LibraryError>;

    /// Last known watched status, without a network call.
    async fn is_watched_local(&self, movie_id: MovieId) -> bool;

    /// Record an authoritative watched status in the local cache.
    async fn remember_watched(&self, movie_id: MovieId, watched: bool);

    async fn add_watched(&self, entry: &WatchedEntry) -> Result<(), LibraryError>;

    async fn remove_watched(&self, movie_id: MovieId) -> Result<(), LibraryError>;
}

/// Hands out library stores bound to a viewer.
pub trait LibraryProvider: Send + Sync {
    fn bookmarks_for(&self, viewer: &Viewer) -> Arc<dyn BookmarkStore>;

    fn watched_for(&self, viewer: &Viewer) -> Arc<dyn WatchedStore>;
}
