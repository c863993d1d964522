//! Load-time reconciliation of the viewer flags.

use tracing::{debug, warn};

use super::ViewerFlags;
use crate::catalog::MovieId;
use crate::library::{BookmarkStore, WatchedStore};
use crate::metrics;

/// Result of querying the library for the current movie.
///
/// Either both remote lookups answered, or the flags must come from the
/// cache. There is no partially authoritative result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    Authoritative(ViewerFlags),
    FallbackToCache,
}

/// Query bookmark and watched status concurrently.
pub async fn reconcile(
    movie_id: MovieId,
    bookmarks: &dyn BookmarkStore,
    watched: &dyn WatchedStore,
) -> Reconciliation {
    let (bookmarked, is_watched) = futures::join!(
        bookmarks.is_bookmarked(movie_id),
        watched.is_watched(movie_id)
    );

    match (bookmarked, is_watched) {
        (Ok(bookmarked), Ok(watched)) => Reconciliation::Authoritative(ViewerFlags {
            bookmarked,
            watched,
        }),
        (bookmarked, watched) => {
            if let Err(e) = bookmarked {
                warn!(movie_id = %movie_id, error = %e, "Bookmark status lookup failed");
            }
            if let Err(e) = watched {
                warn!(movie_id = %movie_id, error = %e, "Watched status lookup failed");
            }
            Reconciliation::FallbackToCache
        }
    }
}

impl Reconciliation {
    /// Flags to display.
    ///
    /// An authoritative answer is written back to the cache for both flags at
    /// once; a fallback reads the cache as it was before this load.
    pub async fn resolve(
        self,
        movie_id: MovieId,
        bookmarks: &dyn BookmarkStore,
        watched: &dyn WatchedStore,
    ) -> ViewerFlags {
        match self {
            Reconciliation::Authoritative(flags) => {
                metrics::RECONCILIATIONS.with_label_values(&["remote"]).inc();
                futures::join!(
                    bookmarks.remember_bookmarked(movie_id, flags.bookmarked),
                    watched.remember_watched(movie_id, flags.watched)
                );
                flags
            }
            Reconciliation::FallbackToCache => {
                metrics::RECONCILIATIONS.with_label_values(&["cache"]).inc();
                let flags = ViewerFlags {
                    bookmarked: bookmarks.is_bookmarked_local(movie_id).await,
                    watched: watched.is_watched_local(movie_id).await,
                };
                debug!(movie_id = %movie_id, ?flags, "Using cached library status");
                flags
            }
        }
    }
}
