//! API tests for the movie detail endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use cinelog_core::library::LibraryError;
use cinelog_core::testing::{LibraryOperation, RecordedLibraryCall};
use cinelog_core::{MovieApiError, MovieId};
use common::{fixtures, TestFixture};

const FIGHT_CLUB: MovieId = MovieId(550);

async fn fixture_with_fight_club() -> TestFixture {
    let fixture = TestFixture::new();
    fixture.movies.add_movie(fixtures::fight_club()).await;
    fixture
}

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_hides_api_key() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/config").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["auth"]["method"], "bearer");
    assert_eq!(response.body["tmdb"]["api_key_configured"], true);
    assert!(!response.body.to_string().contains("test-key"));
}

#[tokio::test]
async fn test_anonymous_page_has_no_library_controls() {
    let fixture = fixture_with_fight_club().await;
    let response = fixture.get("/api/v1/movies/550").await;

    assert_eq!(response.status, StatusCode::OK);
    let page = &response.body["page"];
    assert_eq!(page["state"], "loaded");
    assert_eq!(page["hero"]["title"], "Fight Club");
    assert_eq!(page["hero"]["year"], "1999");
    assert_eq!(page["back_link"], "/movies");
    assert!(page.get("login_prompt").is_some());
    assert!(page["actions"].get("bookmark").is_none());
    assert!(page["actions"].get("watched").is_none());
    assert!(fixture.library.calls().await.is_empty());
}

#[tokio::test]
async fn test_signed_in_page_shows_flags() {
    let fixture = fixture_with_fight_club().await;
    fixture.library.set_bookmarked(FIGHT_CLUB, true).await;

    let response = fixture.get_signed_in("/api/v1/movies/550").await;

    assert_eq!(response.status, StatusCode::OK);
    let page = &response.body["page"];
    assert!(page.get("login_prompt").is_none());
    assert_eq!(page["actions"]["bookmark"]["label"], "Bookmarked");
    assert_eq!(page["actions"]["bookmark"]["active"], true);
    assert_eq!(page["actions"]["watched"]["label"], "Mark as Watched");
    assert_eq!(page["your_status"]["bookmarked"], "Yes");
    assert_eq!(page["your_status"]["watched"], "No");
}

#[tokio::test]
async fn test_unknown_movie_is_not_found() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/movies/999").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["outcome"], "not_found");
    assert_eq!(response.body["page"]["state"], "error");
    assert_eq!(response.body["page"]["message"], "Movie not found");
}

#[tokio::test]
async fn test_non_numeric_route_skips_fetch() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/movies/fight-club").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["page"]["message"], "Movie not found");
    assert!(fixture.movies.fetches().await.is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let fixture = fixture_with_fight_club().await;
    fixture
        .movies
        .set_next_error(MovieApiError::RateLimitExceeded)
        .await;

    let response = fixture.get("/api/v1/movies/550").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["outcome"], "failed");
    assert_eq!(
        response.body["page"]["message"],
        "Failed to load movie details"
    );
}

#[tokio::test]
async fn test_bookmark_requires_sign_in() {
    let fixture = fixture_with_fight_club().await;
    let response = fixture.post("/api/v1/movies/550/bookmark", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["outcome"], "sign_in_required");
    assert_eq!(
        response.notice_messages(),
        vec!["Please login to bookmark movies"]
    );
    assert!(fixture.library.mutations().await.is_empty());
}

#[tokio::test]
async fn test_bookmark_add_then_remove() {
    let fixture = fixture_with_fight_club().await;

    let added = fixture
        .post_signed_in("/api/v1/movies/550/bookmark", None)
        .await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(added.body["outcome"], "completed");
    assert_eq!(added.body["page"]["actions"]["bookmark"]["label"], "Bookmarked");
    assert_eq!(added.notice_messages(), vec!["Added to bookmarks"]);
    assert!(fixture.library.remote_bookmarked(FIGHT_CLUB).await);

    let removed = fixture
        .post_signed_in("/api/v1/movies/550/bookmark", None)
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(
        removed.body["page"]["actions"]["bookmark"]["label"],
        "Add to Watchlist"
    );
    assert_eq!(removed.notice_messages(), vec!["Removed from bookmarks"]);
    assert!(!fixture.library.remote_bookmarked(FIGHT_CLUB).await);

    let mutations = fixture.library.mutations().await;
    assert!(matches!(
        &mutations[0],
        RecordedLibraryCall::AddBookmark { movie_id, title, poster }
            if *movie_id == FIGHT_CLUB
                && title == "Fight Club"
                && poster == "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
    ));
    assert_eq!(
        mutations[1],
        RecordedLibraryCall::RemoveBookmark {
            movie_id: FIGHT_CLUB
        }
    );
}

#[tokio::test]
async fn test_bookmark_failure_surfaces_server_message() {
    let fixture = fixture_with_fight_club().await;
    fixture
        .library
        .fail_next(
            LibraryOperation::AddBookmark,
            LibraryError::ApiError {
                status: 409,
                message: Some("Movie already bookmarked".to_string()),
            },
        )
        .await;

    let response = fixture
        .post_signed_in("/api/v1/movies/550/bookmark", None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["outcome"], "failed");
    assert_eq!(response.notice_messages(), vec!["Movie already bookmarked"]);
    assert_eq!(
        response.body["page"]["actions"]["bookmark"]["label"],
        "Add to Watchlist"
    );
}

#[tokio::test]
async fn test_watched_toggle_opens_rating_capture() {
    let fixture = fixture_with_fight_club().await;

    let response = fixture
        .post_signed_in("/api/v1/movies/550/watched", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"], "capture_opened");
    let capture = &response.body["page"]["rating_capture"];
    assert_eq!(capture["movie_title"], "Fight Club");
    assert_eq!(capture["submitting"], false);
    assert!(fixture.library.mutations().await.is_empty());
}

#[tokio::test]
async fn test_rate_movie_marks_watched() {
    let fixture = fixture_with_fight_club().await;

    let response = fixture
        .post_signed_in(
            "/api/v1/movies/550/watched/rating",
            Some(json!({ "rating": 8, "review": "  Great  " })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"], "completed");
    assert_eq!(
        response.notice_messages(),
        vec!["Marked as watched with 8/10 rating!"]
    );
    assert_eq!(response.body["page"]["actions"]["watched"]["label"], "Watched");
    assert!(response.body["page"].get("rating_capture").is_none());

    let entry = fixture.library.watched_entry(FIGHT_CLUB).await.unwrap();
    assert_eq!(entry.rating, 8);
    assert_eq!(entry.review.as_deref(), Some("Great"));
    assert_eq!(entry.movie_title, "Fight Club");
}

#[tokio::test]
async fn test_rate_movie_without_rating() {
    let fixture = fixture_with_fight_club().await;

    let response = fixture
        .post_signed_in("/api/v1/movies/550/watched/rating", Some(json!({})))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.notice_messages(), vec!["Marked as watched!"]);
    let entry = fixture.library.watched_entry(FIGHT_CLUB).await.unwrap();
    assert_eq!(entry.rating, 0);
    assert!(entry.review.is_none());
}

#[tokio::test]
async fn test_rate_movie_rejects_out_of_range() {
    let fixture = fixture_with_fight_club().await;

    let response = fixture
        .post_signed_in(
            "/api/v1/movies/550/watched/rating",
            Some(json!({ "rating": 11 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("between 0 and 10"));
    assert!(fixture.movies.fetches().await.is_empty());
}

#[tokio::test]
async fn test_rate_movie_already_watched_conflicts() {
    let fixture = fixture_with_fight_club().await;
    fixture.library.set_watched(FIGHT_CLUB, true).await;

    let response = fixture
        .post_signed_in(
            "/api/v1/movies/550/watched/rating",
            Some(json!({ "rating": 5 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(fixture.library.mutations().await.is_empty());
}

#[tokio::test]
async fn test_rate_movie_failure_keeps_capture_open() {
    let fixture = fixture_with_fight_club().await;
    fixture
        .library
        .fail_next(
            LibraryOperation::AddWatched,
            LibraryError::ApiError {
                status: 500,
                message: None,
            },
        )
        .await;

    let response = fixture
        .post_signed_in(
            "/api/v1/movies/550/watched/rating",
            Some(json!({ "rating": 7 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["outcome"], "failed");
    assert_eq!(response.notice_messages(), vec!["Something went wrong"]);
    assert!(response.body["page"].get("rating_capture").is_some());
    assert_eq!(
        response.body["page"]["actions"]["watched"]["label"],
        "Mark as Watched"
    );
}

#[tokio::test]
async fn test_unwatch_removes_entry() {
    let fixture = fixture_with_fight_club().await;
    fixture.library.set_watched(FIGHT_CLUB, true).await;

    let response = fixture
        .post_signed_in("/api/v1/movies/550/watched", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"], "completed");
    assert_eq!(response.notice_messages(), vec!["Removed from watched list"]);
    assert!(fixture.library.watched_entry(FIGHT_CLUB).await.is_none());
}

#[tokio::test]
async fn test_share_returns_page_link() {
    let fixture = fixture_with_fight_club().await;

    let response = fixture.post("/api/v1/movies/550/share", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"]["result"], "copied");
    assert_eq!(
        response.body["outcome"]["url"],
        "http://cinelog.test/movies/550"
    );
    assert_eq!(response.notice_messages(), vec!["Link copied to clipboard!"]);
}

#[tokio::test]
async fn test_share_link_uses_canonical_id() {
    let fixture = fixture_with_fight_club().await;

    let response = fixture.post("/api/v1/movies/0550/share", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["outcome"]["url"],
        "http://cinelog.test/movies/550"
    );
}

#[tokio::test]
async fn test_trailer_redirects_to_youtube() {
    let fixture = fixture_with_fight_club().await;

    let response = fixture.get("/api/v1/movies/550/trailer").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers["location"],
        "https://www.youtube.com/watch?v=abc123"
    );
}

#[tokio::test]
async fn test_trailer_unavailable() {
    let fixture = TestFixture::new();
    fixture.movies.add_movie(fixtures::movie(42, "Quiet Film")).await;

    let response = fixture.get("/api/v1/movies/42/trailer").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["outcome"]["result"], "unavailable");
    assert_eq!(
        response.notice_messages(),
        vec!["No trailer available for this movie"]
    );
}

#[tokio::test]
async fn test_none_auth_treats_everyone_as_anonymous() {
    let fixture = TestFixture::with_auth("none");
    fixture.movies.add_movie(fixtures::fight_club()).await;

    let response = fixture
        .post_signed_in("/api/v1/movies/550/bookmark", None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_bearer_token_rejected() {
    let fixture = fixture_with_fight_club().await;

    let response = fixture
        .request("GET", "/api/v1/movies/550", None, Some(""))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = fixture_with_fight_club().await;
    fixture.get("/api/v1/movies/550").await;

    let response = fixture.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
}
