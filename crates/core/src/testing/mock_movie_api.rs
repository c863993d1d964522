//! Mock movie API for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{MovieApi, MovieApiError, MovieDetails, MovieId};

/// Mock implementation of the MovieApi trait.
///
/// Provides controllable behavior for testing:
/// - Serve configurable movie records
/// - Delay individual movies to exercise loading and stale routes
/// - Track fetches for assertions
/// - Simulate failures
#[derive(Debug, Clone, Default)]
pub struct MockMovieApi {
    movies: Arc<RwLock<HashMap<MovieId, MovieDetails>>>,
    delays: Arc<RwLock<HashMap<MovieId, Duration>>>,
    fetches: Arc<RwLock<Vec<MovieId>>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<MovieApiError>>>,
}

impl MockMovieApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_movie(&self, movie: MovieDetails) {
        self.movies.write().await.insert(movie.id, movie);
    }

    /// Make fetches of `id` take `delay` before answering.
    pub async fn set_delay(&self, id: MovieId, delay: Duration) {
        self.delays.write().await.insert(id, delay);
    }

    /// Make the next fetch fail.
    pub async fn set_next_error(&self, error: MovieApiError) {
        *self.next_error.write().await = Some(error);
    }

    /// Every id fetched so far, in order.
    pub async fn fetches(&self) -> Vec<MovieId> {
        self.fetches.read().await.clone()
    }
}

#[async_trait]
impl MovieApi for MockMovieApi {
    async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetails, MovieApiError> {
        self.fetches.write().await.push(id);

        let delay = self.delays.read().await.get(&id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        self.movies
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| MovieApiError::NotFound(format!("movie {}", id)))
    }
}
