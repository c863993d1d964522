//! Trailer selection.

use crate::catalog::Video;

/// Pick the video to play for "Watch Trailer".
///
/// Prefers the first `Trailer` hosted on `preferred_site` (case-insensitive),
/// then the first video of any kind.
pub fn select_trailer<'a>(videos: &'a [Video], preferred_site: &str) -> Option<&'a Video> {
    videos
        .iter()
        .find(|v| v.kind == "Trailer" && v.site.eq_ignore_ascii_case(preferred_site))
        .or_else(|| videos.first())
}

/// Public watch URL of a video. Sites without a known template use YouTube's.
pub fn watch_url(video: &Video) -> String {
    if video.site.eq_ignore_ascii_case("vimeo") {
        format!("https://vimeo.com/{}", video.key)
    } else {
        format!("https://www.youtube.com/watch?v={}", video.key)
    }
}
