//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access.
//! Rate limits are generous (around 40 requests per second).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{
    CastMember, CrewMember, Genre, MovieDetails, MovieId, MovieSummary, ProductionCompany,
    ProductionCountry, Review, SpokenLanguage, Video,
};
use super::{MovieApi, MovieApiError};

/// Sub-resources fetched together with the movie record.
const APPEND_TO_RESPONSE: &str = "credits,videos,similar,recommendations,reviews";

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, MovieApiError> {
        if config.api_key.is_empty() {
            return Err(MovieApiError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Get a movie with credits, videos, similar movies, recommendations
    /// and reviews in a single request.
    pub async fn get_movie_details(&self, id: MovieId) -> Result<MovieDetails, MovieApiError> {
        let url = format!("{}/movie/{}", self.base_url, id);

        debug!("TMDB get movie details: id={}", id);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("append_to_response", APPEND_TO_RESPONSE),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(MovieApiError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == 404 {
            return Err(MovieApiError::NotFound(format!("Movie ID {}", id)));
        }
        if status == 429 {
            return Err(MovieApiError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MovieApiError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let movie: TmdbMovieDetails = response.json().await.map_err(|e| {
            MovieApiError::ParseError(format!("Failed to parse movie response: {}", e))
        })?;

        Ok(movie.into())
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetails, MovieApiError> {
        self.get_movie_details(id).await
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbResults<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    id: u32,
    title: String,
    original_title: Option<String>,
    tagline: Option<String>,
    overview: Option<String>,
    status: Option<String>,
    homepage: Option<String>,
    imdb_id: Option<String>,
    original_language: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
    vote_count: Option<u32>,
    popularity: Option<f32>,
    runtime: Option<u32>,
    budget: Option<u64>,
    revenue: Option<u64>,
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    spoken_languages: Vec<SpokenLanguage>,
    credits: Option<TmdbCredits>,
    videos: Option<TmdbResults<Video>>,
    similar: Option<TmdbResults<TmdbMovieResult>>,
    recommendations: Option<TmdbResults<TmdbMovieResult>>,
    reviews: Option<TmdbResults<TmdbReviewResult>>,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<CastMember>,
    #[serde(default)]
    crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    id: u32,
    title: String,
    poster_path: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct TmdbReviewResult {
    id: String,
    author: String,
    author_details: Option<TmdbReviewAuthor>,
    content: String,
    #[serde(default)]
    url: String,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbReviewAuthor {
    rating: Option<f32>,
}

// ============================================================================
// Conversions
// ============================================================================

/// TMDB sends empty strings for unset text fields.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn results<T, U: From<T>>(page: Option<TmdbResults<T>>) -> Vec<U> {
    page.map(|p| p.results.into_iter().map(U::from).collect())
        .unwrap_or_default()
}

impl From<TmdbMovieResult> for MovieSummary {
    fn from(r: TmdbMovieResult) -> Self {
        Self {
            id: MovieId(r.id),
            title: r.title,
            poster_path: non_empty(r.poster_path),
            release_date: non_empty(r.release_date),
            vote_average: r.vote_average.unwrap_or(0.0),
        }
    }
}

impl From<TmdbReviewResult> for Review {
    fn from(r: TmdbReviewResult) -> Self {
        Self {
            id: r.id,
            author: r.author,
            content: r.content,
            url: r.url,
            rating: r.author_details.and_then(|a| a.rating),
            created_at: r.created_at,
        }
    }
}

impl From<TmdbMovieDetails> for MovieDetails {
    fn from(d: TmdbMovieDetails) -> Self {
        let (mut cast, crew) = d
            .credits
            .map(|c| (c.cast, c.crew))
            .unwrap_or_default();
        cast.sort_by_key(|c| c.order);

        Self {
            id: MovieId(d.id),
            title: d.title,
            original_title: non_empty(d.original_title),
            tagline: non_empty(d.tagline),
            overview: non_empty(d.overview),
            status: non_empty(d.status),
            homepage: non_empty(d.homepage),
            imdb_id: non_empty(d.imdb_id),
            original_language: non_empty(d.original_language),
            release_date: non_empty(d.release_date),
            poster_path: non_empty(d.poster_path),
            backdrop_path: non_empty(d.backdrop_path),
            vote_average: d.vote_average.unwrap_or(0.0),
            vote_count: d.vote_count.unwrap_or(0),
            popularity: d.popularity,
            runtime_minutes: d.runtime.filter(|r| *r > 0),
            budget: d.budget.unwrap_or(0),
            revenue: d.revenue.unwrap_or(0),
            genres: d.genres,
            production_companies: d.production_companies,
            production_countries: d.production_countries,
            spoken_languages: d.spoken_languages,
            cast,
            crew,
            videos: d.videos.map(|v| v.results).unwrap_or_default(),
            similar: results(d.similar),
            recommendations: results(d.recommendations),
            reviews: results(d.reviews),
        }
    }
}
