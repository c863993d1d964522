//! The detail page controller.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::rating::{RatingCapture, RatingSubmission};
use super::trailer::{select_trailer, watch_url};
use super::view::{PageView, ViewerContext};
use super::{DetailCollaborators, PageConfig, ViewerFlags, LISTING_PATH};
use crate::catalog::{MovieDetails, MovieId};
use crate::library::LibraryError;
use crate::metrics;
use crate::notice::Notice;
use crate::platform::{PlatformError, SharePayload};

const NOT_FOUND_MESSAGE: &str = "Movie not found";
const LOAD_FAILED_MESSAGE: &str = "Failed to load movie details";
const NO_TRAILER_MESSAGE: &str = "No trailer available for this movie";

/// Coarse page phase, observable through [`DetailPage::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PagePhase {
    Loading,
    Error,
    Loaded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Failed(String),
    Loaded(Arc<MovieDetails>),
}

impl PageState {
    pub fn phase(&self) -> PagePhase {
        match self {
            PageState::Loading => PagePhase::Loading,
            PageState::Failed(_) => PagePhase::Error,
            PageState::Loaded(_) => PagePhase::Loaded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded,
    NotFound,
    Failed,
    /// The route changed while loading; the result was discarded.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Completed,
    /// The rating capture step was opened instead of mutating.
    CaptureOpened,
    /// The same action is already in flight.
    Busy,
    SignInRequired,
    NotLoaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ShareOutcome {
    Shared,
    Cancelled,
    Failed,
    Copied { url: String },
    CopyFailed,
    NotLoaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TrailerOutcome {
    Opened { url: String },
    Unavailable,
    NotLoaded,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("No rating capture is open")]
    NoPendingCapture,

    #[error("A watched update is already in progress")]
    Busy,

    #[error(transparent)]
    Library(#[from] LibraryError),
}

struct PageInner {
    route: String,
    state: PageState,
    flags: ViewerFlags,
    capture: Option<RatingCapture>,
}

/// Clears a busy flag when dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller for one movie detail page.
///
/// All operations take `&self`; bookmark and watched actions are each
/// guarded by their own busy flag, so they can overlap with each other but
/// not with themselves. Results of a load are dropped if [`navigate`] moved
/// the page to another movie in the meantime.
///
/// [`navigate`]: DetailPage::navigate
pub struct DetailPage {
    collaborators: DetailCollaborators,
    config: PageConfig,
    inner: RwLock<PageInner>,
    phase: watch::Sender<PagePhase>,
    generation: AtomicU64,
    bookmark_busy: AtomicBool,
    watched_busy: AtomicBool,
}

impl DetailPage {
    /// Create a page for `route` (the `{id}` segment). Nothing is fetched
    /// until [`DetailPage::load`].
    pub fn new(
        route: impl Into<String>,
        collaborators: DetailCollaborators,
        config: PageConfig,
    ) -> Self {
        let (phase, _) = watch::channel(PagePhase::Loading);
        Self {
            collaborators,
            config,
            inner: RwLock::new(PageInner {
                route: route.into(),
                state: PageState::Loading,
                flags: ViewerFlags::default(),
                capture: None,
            }),
            phase,
            generation: AtomicU64::new(0),
            bookmark_busy: AtomicBool::new(false),
            watched_busy: AtomicBool::new(false),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, PageInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, PageInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn route(&self) -> String {
        self.read().route.clone()
    }

    pub fn state(&self) -> PageState {
        self.read().state.clone()
    }

    pub fn phase(&self) -> PagePhase {
        *self.phase.borrow()
    }

    /// Receive every phase transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<PagePhase> {
        self.phase.subscribe()
    }

    pub fn movie(&self) -> Option<Arc<MovieDetails>> {
        match &self.read().state {
            PageState::Loaded(movie) => Some(Arc::clone(movie)),
            _ => None,
        }
    }

    pub fn flags(&self) -> ViewerFlags {
        self.read().flags
    }

    pub fn capture(&self) -> Option<RatingCapture> {
        self.read().capture.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.collaborators.session.is_authenticated()
    }

    pub fn is_bookmark_busy(&self) -> bool {
        self.bookmark_busy.load(Ordering::Acquire)
    }

    pub fn is_watched_busy(&self) -> bool {
        self.watched_busy.load(Ordering::Acquire)
    }

    /// Render the current state.
    pub fn view(&self) -> PageView {
        let context = ViewerContext {
            authenticated: self.is_authenticated(),
            bookmark_busy: self.is_bookmark_busy(),
            watched_busy: self.is_watched_busy(),
        };
        let inner = self.read();
        PageView::build(
            &inner.state,
            inner.flags,
            inner.capture.as_ref(),
            context,
            &self.config,
        )
    }

    fn notify(&self, notice: Notice) {
        self.collaborators.notifier.notify(notice);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) == generation
    }

    /// Point the page at another movie and load it.
    pub async fn navigate(&self, route: impl Into<String>) -> LoadOutcome {
        {
            let mut inner = self.write();
            self.generation.fetch_add(1, Ordering::AcqRel);
            inner.route = route.into();
        }
        self.load().await
    }

    /// Fetch the movie for the current route, then reconcile the viewer
    /// flags if signed in. The page stays in the loading phase until both
    /// are done.
    pub async fn load(&self) -> LoadOutcome {
        // The generation only moves under the write lock, together with the route.
        let (generation, route) = {
            let mut inner = self.write();
            inner.state = PageState::Loading;
            inner.flags = ViewerFlags::default();
            inner.capture = None;
            (self.generation.load(Ordering::Acquire), inner.route.clone())
        };
        self.phase.send_replace(PagePhase::Loading);

        let movie_id = match route.parse::<MovieId>() {
            Ok(id) => id,
            Err(_) => {
                warn!(route = %route, "Route is not a movie id");
                return self.fail(generation, NOT_FOUND_MESSAGE, LoadOutcome::NotFound);
            }
        };

        debug!(movie_id = %movie_id, "Fetching movie details");
        let movie = match self.collaborators.movies.fetch_movie_details(movie_id).await {
            Ok(movie) => Arc::new(movie),
            Err(e) if e.is_not_found() => {
                warn!(movie_id = %movie_id, error = %e, "Movie not found");
                return self.fail(generation, NOT_FOUND_MESSAGE, LoadOutcome::NotFound);
            }
            Err(e) => {
                warn!(movie_id = %movie_id, error = %e, "Failed to fetch movie details");
                return self.fail(generation, LOAD_FAILED_MESSAGE, LoadOutcome::Failed);
            }
        };

        if !self.is_current(generation) {
            return self.discard(movie_id);
        }

        let flags = if self.is_authenticated() {
            let bookmarks = self.collaborators.bookmarks.as_ref();
            let watched = self.collaborators.watched.as_ref();
            super::reconcile(movie_id, bookmarks, watched)
                .await
                .resolve(movie_id, bookmarks, watched)
                .await
        } else {
            ViewerFlags::default()
        };

        {
            let mut inner = self.write();
            if !self.is_current(generation) {
                drop(inner);
                return self.discard(movie_id);
            }
            inner.state = PageState::Loaded(movie);
            inner.flags = flags;
        }
        self.phase.send_replace(PagePhase::Loaded);

        metrics::PAGE_LOADS.with_label_values(&["loaded"]).inc();
        info!(movie_id = %movie_id, ?flags, "Movie page loaded");
        LoadOutcome::Loaded
    }

    fn fail(&self, generation: u64, message: &str, outcome: LoadOutcome) -> LoadOutcome {
        {
            let mut inner = self.write();
            if !self.is_current(generation) {
                metrics::PAGE_LOADS.with_label_values(&["stale"]).inc();
                return LoadOutcome::Stale;
            }
            inner.state = PageState::Failed(message.to_string());
        }
        self.phase.send_replace(PagePhase::Error);

        metrics::PAGE_LOADS.with_label_values(&["failed"]).inc();
        outcome
    }

    fn discard(&self, movie_id: MovieId) -> LoadOutcome {
        debug!(movie_id = %movie_id, "Discarding result for a route that is no longer current");
        metrics::PAGE_LOADS.with_label_values(&["stale"]).inc();
        LoadOutcome::Stale
    }

    /// Apply `update` to the flags if `movie_id` is still the movie shown.
    fn update_flags(&self, movie_id: MovieId, update: impl FnOnce(&mut ViewerFlags)) {
        let mut inner = self.write();
        if matches!(&inner.state, PageState::Loaded(m) if m.id == movie_id) {
            update(&mut inner.flags);
        }
    }

    fn record_mutation(action: &str, result: &Result<(), LibraryError>) {
        let outcome = if result.is_ok() { "success" } else { "failure" };
        metrics::LIBRARY_MUTATIONS
            .with_label_values(&[action, outcome])
            .inc();
    }

    pub async fn toggle_bookmark(&self) -> ActionOutcome {
        if !self.is_authenticated() {
            self.notify(Notice::error("Please login to bookmark movies"));
            return ActionOutcome::SignInRequired;
        }
        let Some(movie) = self.movie() else {
            return ActionOutcome::NotLoaded;
        };
        let Some(_busy) = BusyGuard::acquire(&self.bookmark_busy) else {
            debug!(movie_id = %movie.id, "Bookmark toggle already in progress");
            return ActionOutcome::Busy;
        };

        let bookmarked = self.flags().bookmarked;
        let store = &self.collaborators.bookmarks;
        let (action, result) = if bookmarked {
            ("remove_bookmark", store.remove_bookmark(movie.id).await)
        } else {
            (
                "add_bookmark",
                store
                    .add_bookmark(movie.id, &movie.title, movie.poster_ref())
                    .await,
            )
        };
        Self::record_mutation(action, &result);

        match result {
            Ok(()) => {
                self.update_flags(movie.id, |f| f.bookmarked = !bookmarked);
                info!(movie_id = %movie.id, action, "Bookmark updated");
                self.notify(Notice::success(if bookmarked {
                    "Removed from bookmarks"
                } else {
                    "Added to bookmarks"
                }));
                ActionOutcome::Completed
            }
            Err(e) => {
                warn!(movie_id = %movie.id, action, error = %e, "Bookmark update failed");
                self.notify(Notice::error(e.user_message()));
                ActionOutcome::Failed
            }
        }
    }

    /// Unmark a watched movie, or open the rating capture for an unwatched one.
    pub async fn toggle_watched(&self) -> ActionOutcome {
        if !self.is_authenticated() {
            self.notify(Notice::error("Please login to mark movies as watched"));
            return ActionOutcome::SignInRequired;
        }
        let Some(movie) = self.movie() else {
            return ActionOutcome::NotLoaded;
        };

        if !self.flags().watched {
            self.write().capture = Some(RatingCapture::for_movie(&movie));
            debug!(movie_id = %movie.id, "Rating capture opened");
            return ActionOutcome::CaptureOpened;
        }

        let Some(_busy) = BusyGuard::acquire(&self.watched_busy) else {
            debug!(movie_id = %movie.id, "Watched toggle already in progress");
            return ActionOutcome::Busy;
        };

        let result = self.collaborators.watched.remove_watched(movie.id).await;
        Self::record_mutation("remove_watched", &result);

        match result {
            Ok(()) => {
                self.update_flags(movie.id, |f| f.watched = false);
                info!(movie_id = %movie.id, "Removed from watched list");
                self.notify(Notice::success("Removed from watched list"));
                ActionOutcome::Completed
            }
            Err(e) => {
                warn!(movie_id = %movie.id, error = %e, "Watched removal failed");
                self.notify(Notice::error(e.user_message()));
                ActionOutcome::Failed
            }
        }
    }

    /// Submit the open rating capture. On failure the capture stays open so
    /// the viewer can retry.
    pub async fn submit_rating(&self, submission: RatingSubmission) -> Result<(), SubmitError> {
        let capture = self.capture().ok_or(SubmitError::NoPendingCapture)?;
        let _busy = BusyGuard::acquire(&self.watched_busy).ok_or(SubmitError::Busy)?;

        let entry = capture.entry(&submission);
        let result = self.collaborators.watched.add_watched(&entry).await;
        Self::record_mutation("add_watched", &result);

        if let Err(e) = result {
            warn!(movie_id = %capture.movie_id, error = %e, "Marking as watched failed");
            self.notify(Notice::error(e.user_message()));
            return Err(e.into());
        }

        {
            let mut inner = self.write();
            if inner.capture.as_ref() == Some(&capture) {
                inner.capture = None;
            }
        }
        self.update_flags(capture.movie_id, |f| f.watched = true);
        info!(
            movie_id = %capture.movie_id,
            rating = submission.rating(),
            "Marked as watched"
        );
        self.notify(Notice::success(submission.success_message()));
        Ok(())
    }

    /// Close the rating capture without marking anything.
    pub fn cancel_rating(&self) {
        self.write().capture = None;
    }

    pub async fn share(&self) -> ShareOutcome {
        let Some(movie) = self.movie() else {
            return ShareOutcome::NotLoaded;
        };
        let platform = &self.collaborators.platform;
        let url = platform.current_url();

        if platform.supports_native_share() {
            let payload = SharePayload {
                title: movie.title.clone(),
                text: movie.overview.clone().unwrap_or_default(),
                url,
            };
            return match platform.native_share(&payload).await {
                Ok(()) => ShareOutcome::Shared,
                Err(PlatformError::Cancelled) => {
                    debug!(movie_id = %movie.id, "Share cancelled");
                    ShareOutcome::Cancelled
                }
                Err(e) => {
                    warn!(movie_id = %movie.id, error = %e, "Native share failed");
                    ShareOutcome::Failed
                }
            };
        }

        match platform.copy_to_clipboard(&url).await {
            Ok(()) => {
                self.notify(Notice::success("Link copied to clipboard!"));
                ShareOutcome::Copied { url }
            }
            Err(e) => {
                warn!(movie_id = %movie.id, error = %e, "Copying link failed");
                self.notify(Notice::error("Failed to copy link"));
                ShareOutcome::CopyFailed
            }
        }
    }

    pub fn launch_trailer(&self) -> TrailerOutcome {
        let Some(movie) = self.movie() else {
            return TrailerOutcome::NotLoaded;
        };

        match select_trailer(&movie.videos, &self.config.trailer_site) {
            Some(video) => {
                let url = watch_url(video);
                debug!(movie_id = %movie.id, url = %url, "Opening trailer");
                self.collaborators.platform.open_in_new_context(&url);
                TrailerOutcome::Opened { url }
            }
            None => {
                self.notify(Notice::info(NO_TRAILER_MESSAGE));
                TrailerOutcome::Unavailable
            }
        }
    }
}
