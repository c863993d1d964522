//! Movie detail page endpoints.
//!
//! Every request builds a fresh [`DetailPage`] for the resolved viewer, loads
//! it, optionally runs one page action, and answers with the rendered page
//! plus the notices raised along the way.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use cinelog_core::{
    ActionOutcome, DetailPage, LoadOutcome, Notice, NoticeLog, PageView, RatingSubmission,
    ShareOutcome, SubmitError, TrailerOutcome, Viewer,
};

use super::middleware::CurrentViewer;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Rendered page with the notices raised while handling the request.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub page: PageView,
    pub notices: Vec<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<T>,
}

/// Request body for marking a movie as watched with a rating.
#[derive(Debug, Deserialize)]
pub struct RatingBody {
    /// 0 means "no rating".
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub review: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct MovieErrorResponse {
    pub error: String,
}

/// Rating submission result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingOutcome {
    Completed,
    Failed,
}

// ============================================================================
// Helpers
// ============================================================================

struct LoadedPage {
    page: DetailPage,
    notices: NoticeLog,
    load: LoadOutcome,
}

impl LoadedPage {
    async fn open(state: &AppState, route: &str, viewer: &Viewer) -> Self {
        let notices = NoticeLog::new();
        let page = state.detail_page(route, viewer, &notices);
        let load = page.load().await;
        debug!(route = %route, outcome = ?load, "Detail page loaded");
        Self {
            page,
            notices,
            load,
        }
    }

    fn is_loaded(&self) -> bool {
        self.load == LoadOutcome::Loaded
    }

    fn respond<T: Serialize>(self, status: StatusCode, outcome: Option<T>) -> Response {
        let body = PageResponse {
            page: self.page.view(),
            notices: self.notices.drain(),
            outcome,
        };
        (status, Json(body)).into_response()
    }

    /// Response for a page that did not reach the loaded state.
    fn respond_load(self) -> Response {
        let status = load_status(self.load);
        let outcome = self.load;
        self.respond(status, Some(outcome))
    }
}

fn load_status(outcome: LoadOutcome) -> StatusCode {
    match outcome {
        LoadOutcome::Loaded | LoadOutcome::Stale => StatusCode::OK,
        LoadOutcome::NotFound => StatusCode::NOT_FOUND,
        LoadOutcome::Failed => StatusCode::BAD_GATEWAY,
    }
}

fn action_status(outcome: ActionOutcome) -> StatusCode {
    match outcome {
        ActionOutcome::Completed | ActionOutcome::CaptureOpened => StatusCode::OK,
        ActionOutcome::Busy => StatusCode::CONFLICT,
        ActionOutcome::SignInRequired => StatusCode::UNAUTHORIZED,
        ActionOutcome::NotLoaded => StatusCode::NOT_FOUND,
        ActionOutcome::Failed => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(MovieErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// Render the detail page for a movie
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<String>,
) -> Response {
    LoadedPage::open(&state, &id, &viewer).await.respond_load()
}

/// Toggle the bookmark for a movie
pub async fn toggle_bookmark(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<String>,
) -> Response {
    let loaded = LoadedPage::open(&state, &id, &viewer).await;
    if !loaded.is_loaded() {
        return loaded.respond_load();
    }

    let outcome = loaded.page.toggle_bookmark().await;
    loaded.respond(action_status(outcome), Some(outcome))
}

/// Toggle the watched state for a movie.
///
/// Marking as watched only opens the rating capture; the returned page carries
/// it, and the client completes the step with [`rate_movie`].
pub async fn toggle_watched(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<String>,
) -> Response {
    let loaded = LoadedPage::open(&state, &id, &viewer).await;
    if !loaded.is_loaded() {
        return loaded.respond_load();
    }

    let outcome = loaded.page.toggle_watched().await;
    loaded.respond(action_status(outcome), Some(outcome))
}

/// Mark a movie as watched, with an optional rating and review
pub async fn rate_movie(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<String>,
    Json(body): Json<RatingBody>,
) -> Response {
    let submission = match RatingSubmission::new(body.rating, body.review) {
        Ok(submission) => submission,
        Err(e) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    };

    let loaded = LoadedPage::open(&state, &id, &viewer).await;
    if !loaded.is_loaded() {
        return loaded.respond_load();
    }
    if loaded.page.flags().watched {
        return error_response(StatusCode::CONFLICT, "Movie is already marked as watched");
    }

    let opened = loaded.page.toggle_watched().await;
    match opened {
        ActionOutcome::CaptureOpened => {}
        other => return loaded.respond(action_status(other), Some(other)),
    }

    let result = loaded.page.submit_rating(submission).await;
    match result {
        Ok(()) => loaded.respond(StatusCode::OK, Some(RatingOutcome::Completed)),
        Err(SubmitError::Library(_)) => {
            loaded.respond(StatusCode::BAD_GATEWAY, Some(RatingOutcome::Failed))
        }
        Err(e) => error_response(StatusCode::CONFLICT, e.to_string()),
    }
}

/// Share a movie page.
///
/// Over HTTP sharing always falls back to handing the link to the client.
pub async fn share_movie(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<String>,
) -> Response {
    let loaded = LoadedPage::open(&state, &id, &viewer).await;
    if !loaded.is_loaded() {
        return loaded.respond_load();
    }

    let outcome = loaded.page.share().await;
    let status = match outcome {
        ShareOutcome::Shared | ShareOutcome::Cancelled | ShareOutcome::Copied { .. } => {
            StatusCode::OK
        }
        ShareOutcome::Failed | ShareOutcome::CopyFailed => StatusCode::BAD_GATEWAY,
        ShareOutcome::NotLoaded => StatusCode::NOT_FOUND,
    };
    loaded.respond(status, Some(outcome))
}

/// Redirect to the movie's trailer
pub async fn launch_trailer(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<String>,
) -> Response {
    let loaded = LoadedPage::open(&state, &id, &viewer).await;
    if !loaded.is_loaded() {
        return loaded.respond_load();
    }

    let outcome = loaded.page.launch_trailer();
    match outcome {
        TrailerOutcome::Opened { url } => Redirect::to(&url).into_response(),
        outcome @ (TrailerOutcome::Unavailable | TrailerOutcome::NotLoaded) => {
            loaded.respond(StatusCode::NOT_FOUND, Some(outcome))
        }
    }
}
