//! Movie content API integration.
//!
//! The detail page only needs one read operation from the content API:
//! fetching the full record of a single movie. [`TmdbClient`] implements it
//! against TMDB; tests use `testing::MockMovieApi`.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when fetching movie data.
#[derive(Debug, Error)]
pub enum MovieApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl MovieApiError {
    /// Whether the movie itself does not exist (as opposed to a transport
    /// or server problem).
    pub fn is_not_found(&self) -> bool {
        matches!(self, MovieApiError::NotFound(_))
    }
}

/// Source of movie detail records.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Fetch the full detail record of a movie, including credits, videos
    /// and similar movies.
    async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetails, MovieApiError>;
}
