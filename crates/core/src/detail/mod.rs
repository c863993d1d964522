//! Movie detail page.
//!
//! [`DetailPage`] is the headless controller behind `/movies/{id}`: it loads
//! the movie, reconciles the viewer's bookmark and watched flags with the
//! library, and runs the page actions. [`view`] derives everything rendered
//! from the loaded movie and the flags.

mod controller;
pub mod format;
mod rating;
mod reconcile;
mod trailer;
pub mod view;

pub use controller::{
    ActionOutcome, DetailPage, LoadOutcome, PagePhase, PageState, ShareOutcome, SubmitError,
    TrailerOutcome,
};
pub use rating::{
    rating_info, RatingCapture, RatingColor, RatingError, RatingInfo, RatingSubmission,
    MAX_RATING,
};
pub use reconcile::{reconcile, Reconciliation};
pub use trailer::{select_trailer, watch_url};
pub use view::{DetailView, PageView, ViewerContext};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::catalog::MovieApi;
use crate::library::{BookmarkStore, WatchedStore};
use crate::notice::Notifier;
use crate::platform::Platform;

/// Listing page the error state links back to.
pub const LISTING_PATH: &str = "/movies";

/// Local mirror of the viewer's library state for the current movie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerFlags {
    pub bookmarked: bool,
    pub watched: bool,
}

/// Everything the page talks to, handed over at construction.
#[derive(Clone)]
pub struct DetailCollaborators {
    pub movies: Arc<dyn MovieApi>,
    pub bookmarks: Arc<dyn BookmarkStore>,
    pub watched: Arc<dyn WatchedStore>,
    pub session: Arc<dyn Session>,
    pub notifier: Arc<dyn Notifier>,
    pub platform: Arc<dyn Platform>,
}

/// Detail page presentation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageConfig {
    /// Cast members shown (default: 8)
    #[serde(default = "default_cast_limit")]
    pub cast_limit: usize,
    /// Similar movies shown (default: 6)
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
    /// Production companies shown (default: 5)
    #[serde(default = "default_production_limit")]
    pub production_limit: usize,
    /// Site whose trailers are preferred (default: "YouTube")
    #[serde(default = "default_trailer_site")]
    pub trailer_site: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            cast_limit: default_cast_limit(),
            similar_limit: default_similar_limit(),
            production_limit: default_production_limit(),
            trailer_site: default_trailer_site(),
            image_base_url: default_image_base_url(),
        }
    }
}

fn default_cast_limit() -> usize {
    8
}

fn default_similar_limit() -> usize {
    6
}

fn default_production_limit() -> usize {
    5
}

fn default_trailer_site() -> String {
    "YouTube".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}
