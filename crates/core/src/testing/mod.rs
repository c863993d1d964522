//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of every collaborator the
//! detail page talks to, so the page can be driven end to end without a
//! movie API or a library backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinelog_core::testing::{fixtures, MockLibrary, MockMovieApi, MockPlatform};
//!
//! let movies = MockMovieApi::new();
//! movies.add_movie(fixtures::fight_club()).await;
//!
//! let library = MockLibrary::new();
//! library.set_bookmarked(MovieId(550), true).await;
//!
//! let collaborators = fixtures::collaborators(&movies, &library, true, &MockPlatform::default(), &NoticeLog::new());
//! ```

mod mock_library;
mod mock_movie_api;
mod mock_platform;

pub use mock_library::{LibraryOperation, MockLibrary, RecordedLibraryCall};
pub use mock_movie_api::MockMovieApi;
pub use mock_platform::MockPlatform;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::sync::Arc;

    use super::{MockLibrary, MockMovieApi, MockPlatform};
    use crate::auth::Viewer;
    use crate::catalog::{CastMember, Genre, MovieDetails, MovieId, MovieSummary, Video};
    use crate::detail::DetailCollaborators;
    use crate::notice::NoticeLog;

    /// Create a movie with reasonable defaults.
    pub fn movie(id: u32, title: &str) -> MovieDetails {
        MovieDetails {
            id: MovieId(id),
            title: title.to_string(),
            overview: Some(format!("A movie about {}.", title.to_lowercase())),
            release_date: Some("2020-06-15".to_string()),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            vote_average: 7.0,
            vote_count: 1000,
            runtime_minutes: Some(120),
            genres: vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }],
            ..Default::default()
        }
    }

    /// Create a video.
    pub fn video(kind: &str, site: &str, key: &str) -> Video {
        Video {
            id: format!("video-{}", key),
            key: key.to_string(),
            name: format!("{} ({})", kind, site),
            site: site.to_string(),
            kind: kind.to_string(),
            official: true,
            published_at: None,
        }
    }

    /// Fight Club (550), with a teaser listed before its YouTube trailer.
    pub fn fight_club() -> MovieDetails {
        MovieDetails {
            id: MovieId(550),
            title: "Fight Club".to_string(),
            tagline: Some("Mischief. Mayhem. Soap.".to_string()),
            overview: Some(
                "A ticking-time-bomb insomniac and a slippery soap salesman channel primal \
                 male aggression into a shocking new form of therapy."
                    .to_string(),
            ),
            status: Some("Released".to_string()),
            original_language: Some("en".to_string()),
            release_date: Some("1999-10-15".to_string()),
            poster_path: Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string()),
            backdrop_path: Some("/hZkgoQYus5vegHoetLkCJzb17zJ.jpg".to_string()),
            vote_average: 8.4,
            vote_count: 26_280,
            runtime_minutes: Some(139),
            budget: 63_000_000,
            revenue: 100_853_753,
            genres: vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }],
            cast: vec![
                CastMember {
                    id: 819,
                    name: "Edward Norton".to_string(),
                    character: "Narrator".to_string(),
                    profile_path: Some("/8nytsqL59SFJTVYVrN72k6qkGgJ.jpg".to_string()),
                    order: 0,
                },
                CastMember {
                    id: 287,
                    name: "Brad Pitt".to_string(),
                    character: "Tyler Durden".to_string(),
                    profile_path: None,
                    order: 1,
                },
            ],
            videos: vec![
                video("Teaser", "YouTube", "teaser1"),
                video("Trailer", "YouTube", "abc123"),
            ],
            similar: vec![MovieSummary {
                id: MovieId(807),
                title: "Se7en".to_string(),
                poster_path: None,
                release_date: Some("1995-09-22".to_string()),
                vote_average: 8.4,
            }],
            ..Default::default()
        }
    }

    /// Viewer session for the given sign-in state.
    pub fn viewer(authenticated: bool) -> Viewer {
        if authenticated {
            Viewer::authenticated("viewer-1", "bearer", Some("token".to_string()))
        } else {
            Viewer::anonymous()
        }
    }

    /// Collaborators backed by the given mocks.
    pub fn collaborators(
        movies: &MockMovieApi,
        library: &MockLibrary,
        authenticated: bool,
        platform: &MockPlatform,
        notices: &NoticeLog,
    ) -> DetailCollaborators {
        DetailCollaborators {
            movies: Arc::new(movies.clone()),
            bookmarks: Arc::new(library.clone()),
            watched: Arc::new(library.clone()),
            session: Arc::new(viewer(authenticated)),
            notifier: Arc::new(notices.clone()),
            platform: Arc::new(platform.clone()),
        }
    }
}
