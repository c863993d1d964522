//! Mock library (bookmarks and watched list) for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::auth::Viewer;
use crate::catalog::MovieId;
use crate::library::{
    BookmarkStore, LibraryError, LibraryProvider, WatchedEntry, WatchedStore,
};

/// Library operations that can be delayed or made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryOperation {
    IsBookmarked,
    AddBookmark,
    RemoveBookmark,
    IsWatched,
    AddWatched,
    RemoveWatched,
}

/// A recorded remote call for test assertions.
///
/// Cache reads are not recorded; they never reach the library API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedLibraryCall {
    IsBookmarked { movie_id: MovieId },
    AddBookmark { movie_id: MovieId, title: String, poster: String },
    RemoveBookmark { movie_id: MovieId },
    IsWatched { movie_id: MovieId },
    AddWatched { entry: WatchedEntry },
    RemoveWatched { movie_id: MovieId },
}

impl RecordedLibraryCall {
    pub fn operation(&self) -> LibraryOperation {
        match self {
            RecordedLibraryCall::IsBookmarked { .. } => LibraryOperation::IsBookmarked,
            RecordedLibraryCall::AddBookmark { .. } => LibraryOperation::AddBookmark,
            RecordedLibraryCall::RemoveBookmark { .. } => LibraryOperation::RemoveBookmark,
            RecordedLibraryCall::IsWatched { .. } => LibraryOperation::IsWatched,
            RecordedLibraryCall::AddWatched { .. } => LibraryOperation::AddWatched,
            RecordedLibraryCall::RemoveWatched { .. } => LibraryOperation::RemoveWatched,
        }
    }

    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            RecordedLibraryCall::IsBookmarked { .. } | RecordedLibraryCall::IsWatched { .. }
        )
    }
}

/// Mock implementation of the library stores.
///
/// Keeps the remote state and the locally cached state apart so tests can
/// make them disagree. Successful mutations update both, like the real
/// client; remote checks leave the cache alone. Clones share state, and the
/// same library serves every viewer.
#[derive(Debug, Clone, Default)]
pub struct MockLibrary {
    remote_bookmarks: Arc<RwLock<HashSet<MovieId>>>,
    cached_bookmarks: Arc<RwLock<HashSet<MovieId>>>,
    remote_watched: Arc<RwLock<HashMap<MovieId, WatchedEntry>>>,
    cached_watched: Arc<RwLock<HashSet<MovieId>>>,
    /// Fail the next call of an operation with this error.
    failures: Arc<RwLock<HashMap<LibraryOperation, LibraryError>>>,
    latencies: Arc<RwLock<HashMap<LibraryOperation, Duration>>>,
    calls: Arc<RwLock<Vec<RecordedLibraryCall>>>,
}

impl MockLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // State Configuration
    // =========================================================================

    /// Set the remote bookmark status only.
    pub async fn set_remote_bookmarked(&self, movie_id: MovieId, bookmarked: bool) {
        set_member(&self.remote_bookmarks, movie_id, bookmarked).await;
    }

    /// Set the cached bookmark status only.
    pub async fn set_cached_bookmarked(&self, movie_id: MovieId, bookmarked: bool) {
        set_member(&self.cached_bookmarks, movie_id, bookmarked).await;
    }

    /// Set the remote watched status only.
    pub async fn set_remote_watched(&self, movie_id: MovieId, watched: bool) {
        let mut remote = self.remote_watched.write().await;
        if watched {
            remote.entry(movie_id).or_insert_with(|| WatchedEntry {
                movie_id,
                movie_title: String::new(),
                movie_poster: String::new(),
                rating: 0,
                review: None,
            });
        } else {
            remote.remove(&movie_id);
        }
    }

    /// Set the cached watched status only.
    pub async fn set_cached_watched(&self, movie_id: MovieId, watched: bool) {
        set_member(&self.cached_watched, movie_id, watched).await;
    }

    /// Set bookmark status both remotely and in the cache.
    pub async fn set_bookmarked(&self, movie_id: MovieId, bookmarked: bool) {
        self.set_remote_bookmarked(movie_id, bookmarked).await;
        self.set_cached_bookmarked(movie_id, bookmarked).await;
    }

    /// Set watched status both remotely and in the cache.
    pub async fn set_watched(&self, movie_id: MovieId, watched: bool) {
        self.set_remote_watched(movie_id, watched).await;
        self.set_cached_watched(movie_id, watched).await;
    }

    // =========================================================================
    // Failure Simulation
    // =========================================================================

    /// Make the next call of `operation` fail with `error`.
    pub async fn fail_next(&self, operation: LibraryOperation, error: LibraryError) {
        self.failures.write().await.insert(operation, error);
    }

    /// Make every call of `operation` take `latency`.
    pub async fn set_latency(&self, operation: LibraryOperation, latency: Duration) {
        self.latencies.write().await.insert(operation, latency);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub async fn calls(&self) -> Vec<RecordedLibraryCall> {
        self.calls.read().await.clone()
    }

    pub async fn mutations(&self) -> Vec<RecordedLibraryCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.is_mutation())
            .cloned()
            .collect()
    }

    pub async fn remote_bookmarked(&self, movie_id: MovieId) -> bool {
        self.remote_bookmarks.read().await.contains(&movie_id)
    }

    /// Remote watched-list entry for a movie, if any.
    pub async fn watched_entry(&self, movie_id: MovieId) -> Option<WatchedEntry> {
        self.remote_watched.read().await.get(&movie_id).cloned()
    }

    /// Record the call, apply its latency and any injected failure.
    async fn enter(&self, call: RecordedLibraryCall) -> Result<(), LibraryError> {
        let operation = call.operation();
        self.calls.write().await.push(call);

        let latency = self.latencies.read().await.get(&operation).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match self.failures.write().await.remove(&operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

async fn set_member(set: &RwLock<HashSet<MovieId>>, movie_id: MovieId, present: bool) {
    let mut set = set.write().await;
    if present {
        set.insert(movie_id);
    } else {
        set.remove(&movie_id);
    }
}

#[async_trait]
impl BookmarkStore for MockLibrary {
    async fn is_bookmarked(&self, movie_id: MovieId) -> Result<bool, LibraryError> {
        self.enter(RecordedLibraryCall::IsBookmarked { movie_id })
            .await?;
        Ok(self.remote_bookmarked(movie_id).await)
    }

    async fn is_bookmarked_local(&self, movie_id: MovieId) -> bool {
        self.cached_bookmarks.read().await.contains(&movie_id)
    }

    async fn remember_bookmarked(&self, movie_id: MovieId, bookmarked: bool) {
        set_member(&self.cached_bookmarks, movie_id, bookmarked).await;
    }

    async fn add_bookmark(
        &self,
        movie_id: MovieId,
        title: &str,
        poster: &str,
    ) -> Result<(), LibraryError> {
        self.enter(RecordedLibraryCall::AddBookmark {
            movie_id,
            title: title.to_string(),
            poster: poster.to_string(),
        })
        .await?;
        set_member(&self.remote_bookmarks, movie_id, true).await;
        set_member(&self.cached_bookmarks, movie_id, true).await;
        Ok(())
    }

    async fn remove_bookmark(&self, movie_id: MovieId) -> Result<(), LibraryError> {
        self.enter(RecordedLibraryCall::RemoveBookmark { movie_id })
            .await?;
        set_member(&self.remote_bookmarks, movie_id, false).await;
        set_member(&self.cached_bookmarks, movie_id, false).await;
        Ok(())
    }
}

#[async_trait]
impl WatchedStore for MockLibrary {
    async fn is_watched(&self, movie_id: MovieId) -> Result<bool, LibraryError> {
        self.enter(RecordedLibraryCall::IsWatched { movie_id }).await?;
        Ok(self.remote_watched.read().await.contains_key(&movie_id))
    }

    async fn is_watched_local(&self, movie_id: MovieId) -> bool {
        self.cached_watched.read().await.contains(&movie_id)
    }

    async fn remember_watched(&self, movie_id: MovieId, watched: bool) {
        set_member(&self.cached_watched, movie_id, watched).await;
    }

    async fn add_watched(&self, entry: &WatchedEntry) -> Result<(), LibraryError> {
        self.enter(RecordedLibraryCall::AddWatched {
            entry: entry.clone(),
        })
        .await?;
        self.remote_watched
            .write()
            .await
            .insert(entry.movie_id, entry.clone());
        set_member(&self.cached_watched, entry.movie_id, true).await;
        Ok(())
    }

    async fn remove_watched(&self, movie_id: MovieId) -> Result<(), LibraryError> {
        self.enter(RecordedLibraryCall::RemoveWatched { movie_id })
            .await?;
        self.remote_watched.write().await.remove(&movie_id);
        set_member(&self.cached_watched, movie_id, false).await;
        Ok(())
    }
}

impl LibraryProvider for MockLibrary {
    fn bookmarks_for(&self, _viewer: &Viewer) -> Arc<dyn BookmarkStore> {
        Arc::new(self.clone())
    }

    fn watched_for(&self, _viewer: &Viewer) -> Arc<dyn WatchedStore> {
        Arc::new(self.clone())
    }
}
