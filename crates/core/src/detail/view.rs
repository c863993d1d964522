//! Presentation model of the detail page.
//!
//! Everything the page renders is derived here from the loaded movie, the
//! viewer flags and the viewer context. Nothing in this module performs I/O.

use serde::Serialize;

use super::controller::PageState;
use super::format::{
    format_currency, format_rating, format_release_date, format_runtime, format_vote_count,
    image_url, poster_url, year_text,
};
use super::rating::{RatingCapture, RatingInfo};
use super::{PageConfig, ViewerFlags, LISTING_PATH};
use crate::catalog::MovieDetails;

const LOGIN_PATH: &str = "/login";

/// What the viewer is allowed to see and which actions are in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerContext {
    pub authenticated: bool,
    pub bookmark_busy: bool,
    pub watched_busy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageView {
    Loading,
    Error { message: String, back_link: String },
    Loaded(Box<DetailView>),
}

impl PageView {
    pub fn build(
        state: &PageState,
        flags: ViewerFlags,
        capture: Option<&RatingCapture>,
        context: ViewerContext,
        config: &PageConfig,
    ) -> Self {
        match state {
            PageState::Loading => PageView::Loading,
            PageState::Failed(message) => PageView::Error {
                message: message.clone(),
                back_link: LISTING_PATH.to_string(),
            },
            PageState::Loaded(movie) => PageView::Loaded(Box::new(DetailView::build(
                movie, flags, capture, context, config,
            ))),
        }
    }

    pub fn detail(&self) -> Option<&DetailView> {
        match self {
            PageView::Loaded(detail) => Some(detail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub back_link: String,
    pub hero: HeroView,
    /// Poster badges, only for signed-in viewers.
    pub badges: Vec<String>,
    pub actions: ActionsView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_prompt: Option<LoginPromptView>,
    pub overview: String,
    pub cast: Vec<CastView>,
    pub similar: Vec<SimilarMovieView>,
    pub details: DetailsView,
    pub production: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_status: Option<YourStatusView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_capture: Option<RatingCaptureView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
    pub poster_url: String,
    pub rating: String,
    pub vote_count: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleButtonView {
    pub label: String,
    pub active: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionsView {
    pub trailer: ButtonView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<ToggleButtonView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched: Option<ToggleButtonView>,
    pub share: ButtonView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginPromptView {
    pub link: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastView {
    pub name: String,
    pub character: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimilarMovieView {
    pub id: u32,
    pub title: String,
    pub poster_url: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YourStatusView {
    pub bookmarked: String,
    pub watched: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingCaptureView {
    pub movie_title: String,
    pub poster_url: String,
    /// Info for the unrated default; clients call `rating_info` as the
    /// viewer picks a value.
    pub preview: RatingInfo,
    pub submitting: bool,
}

fn yes_no(value: bool) -> String {
    let text = if value { "Yes" } else { "No" };
    text.to_string()
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl DetailView {
    pub fn build(
        movie: &MovieDetails,
        flags: ViewerFlags,
        capture: Option<&RatingCapture>,
        context: ViewerContext,
        config: &PageConfig,
    ) -> Self {
        let base = config.image_base_url.as_str();
        let signed_in = context.authenticated;

        let hero = HeroView {
            title: movie.title.clone(),
            tagline: non_blank(&movie.tagline),
            backdrop_url: image_url(base, "w1280", movie.backdrop_path.as_deref()),
            poster_url: poster_url(base, "w500", movie.poster_path.as_deref()),
            rating: format_rating(movie.vote_average),
            vote_count: format_vote_count(movie.vote_count),
            year: year_text(movie.year()),
            runtime: format_runtime(movie.runtime_minutes),
            genres: movie.genres.iter().map(|g| g.name.clone()).collect(),
        };

        let mut badges = Vec::new();
        if signed_in && flags.bookmarked {
            badges.push("Saved".to_string());
        }
        if signed_in && flags.watched {
            badges.push("Watched".to_string());
        }

        let actions = ActionsView {
            trailer: ButtonView {
                label: "Watch Trailer".to_string(),
            },
            bookmark: signed_in.then(|| ToggleButtonView {
                label: if flags.bookmarked { "Bookmarked" } else { "Add to Watchlist" }
                    .to_string(),
                active: flags.bookmarked,
                busy: context.bookmark_busy,
            }),
            watched: signed_in.then(|| ToggleButtonView {
                label: if flags.watched { "Watched" } else { "Mark as Watched" }.to_string(),
                active: flags.watched,
                busy: context.watched_busy,
            }),
            share: ButtonView {
                label: "Share movie".to_string(),
            },
        };

        let login_prompt = (!signed_in).then(|| LoginPromptView {
            link: LOGIN_PATH.to_string(),
            text: "Login to bookmark movies and track your watching progress".to_string(),
        });

        let cast = movie
            .cast
            .iter()
            .take(config.cast_limit)
            .map(|c| CastView {
                name: c.name.clone(),
                character: c.character.clone(),
                photo_url: image_url(base, "w185", c.profile_path.as_deref()),
            })
            .collect();

        let similar = movie
            .similar
            .iter()
            .take(config.similar_limit)
            .map(|m| SimilarMovieView {
                id: m.id.0,
                title: m.title.clone(),
                poster_url: poster_url(base, "w300", m.poster_path.as_deref()),
                link: format!("{}/{}", LISTING_PATH, m.id),
            })
            .collect();

        let details = DetailsView {
            status: non_blank(&movie.status),
            release_date: non_blank(&movie.release_date).map(|d| format_release_date(&d)),
            original_language: non_blank(&movie.original_language).map(|l| l.to_uppercase()),
            budget: format_currency(movie.budget),
            revenue: format_currency(movie.revenue),
            homepage: non_blank(&movie.homepage),
        };

        let production = movie
            .production_companies
            .iter()
            .take(config.production_limit)
            .map(|c| c.name.clone())
            .collect();

        let your_status = signed_in.then(|| YourStatusView {
            bookmarked: yes_no(flags.bookmarked),
            watched: yes_no(flags.watched),
        });

        let rating_capture = capture
            .filter(|c| c.movie_id == movie.id)
            .map(|c| RatingCaptureView {
                movie_title: c.title.clone(),
                poster_url: poster_url(base, "w500", Some(c.poster.as_str())),
                preview: c.preview(0),
                submitting: context.watched_busy,
            });

        Self {
            back_link: LISTING_PATH.to_string(),
            hero,
            badges,
            actions,
            login_prompt,
            overview: non_blank(&movie.overview)
                .unwrap_or_else(|| "No overview available for this movie.".to_string()),
            cast,
            similar,
            details,
            production,
            your_status,
            rating_capture,
        }
    }
}
