//! In-memory snapshot of viewer libraries.

use std::collections::{HashMap, HashSet, VecDeque};

use tokio::sync::RwLock;

use crate::catalog::MovieId;

/// Which library list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bookmarks,
    Watched,
}

#[derive(Debug, Default)]
struct ViewerLists {
    bookmarks: HashSet<MovieId>,
    watched: HashSet<MovieId>,
}

impl ViewerLists {
    fn list(&self, kind: ListKind) -> &HashSet<MovieId> {
        match kind {
            ListKind::Bookmarks => &self.bookmarks,
            ListKind::Watched => &self.watched,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut HashSet<MovieId> {
        match kind {
            ListKind::Bookmarks => &mut self.bookmarks,
            ListKind::Watched => &mut self.watched,
        }
    }
}

/// Viewers kept by [`LibraryCache::new`].
pub const DEFAULT_MAX_VIEWERS: usize = 10_000;

#[derive(Debug, Default)]
struct CacheState {
    viewers: HashMap<String, ViewerLists>,
    /// Viewer keys, oldest first.
    order: VecDeque<String>,
}

/// Last known library membership per viewer.
///
/// Written after both remote checks for a movie succeed and after every
/// successful mutation, read when a remote check fails. Shared across page
/// views so a fallback reflects the viewer's previous visits.
///
/// Holds at most `max_viewers` viewers; adding one more evicts the viewer
/// that was added first. An evicted viewer starts over with an empty cache.
#[derive(Debug)]
pub struct LibraryCache {
    state: RwLock<CacheState>,
    max_viewers: usize,
}

impl Default for LibraryCache {
    fn default() -> Self {
        Self::with_max_viewers(DEFAULT_MAX_VIEWERS)
    }
}

impl LibraryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_viewers(max_viewers: usize) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            max_viewers: max_viewers.max(1),
        }
    }

    pub async fn contains(&self, viewer: &str, kind: ListKind, movie_id: MovieId) -> bool {
        self.state
            .read()
            .await
            .viewers
            .get(viewer)
            .is_some_and(|lists| lists.list(kind).contains(&movie_id))
    }

    pub async fn set(&self, viewer: &str, kind: ListKind, movie_id: MovieId, present: bool) {
        let mut state = self.state.write().await;
        if !state.viewers.contains_key(viewer) {
            if state.viewers.len() >= self.max_viewers {
                if let Some(oldest) = state.order.pop_front() {
                    state.viewers.remove(&oldest);
                }
            }
            state.order.push_back(viewer.to_string());
            state
                .viewers
                .insert(viewer.to_string(), ViewerLists::default());
        }

        if let Some(lists) = state.viewers.get_mut(viewer) {
            let list = lists.list_mut(kind);
            if present {
                list.insert(movie_id);
            } else {
                list.remove(&movie_id);
            }
        }
    }

    /// Drop everything known about a viewer (e.g. on sign-out).
    pub async fn forget(&self, viewer: &str) {
        let mut state = self.state.write().await;
        if state.viewers.remove(viewer).is_some() {
            state.order.retain(|key| key != viewer);
        }
    }

    /// Number of viewers currently cached.
    pub async fn len(&self) -> usize {
        self.state.read().await.viewers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
