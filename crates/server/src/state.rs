use std::sync::Arc;

use cinelog_core::{
    Authenticator, Config, DetailCollaborators, DetailPage, LibraryProvider, MovieApi, NoticeLog,
    SanitizedConfig, Viewer,
};

use crate::platform::ResponsePlatform;

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    movies: Arc<dyn MovieApi>,
    library: Arc<dyn LibraryProvider>,
}

impl AppState {
    pub fn new(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        movies: Arc<dyn MovieApi>,
        library: Arc<dyn LibraryProvider>,
    ) -> Self {
        Self {
            config,
            authenticator,
            movies,
            library,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    /// Build a detail page for one request.
    ///
    /// Notices raised by the page are collected in `notices`.
    pub fn detail_page(&self, route: &str, viewer: &Viewer, notices: &NoticeLog) -> DetailPage {
        let collaborators = DetailCollaborators {
            movies: Arc::clone(&self.movies),
            bookmarks: self.library.bookmarks_for(viewer),
            watched: self.library.watched_for(viewer),
            session: Arc::new(viewer.clone()),
            notifier: Arc::new(notices.clone()),
            platform: Arc::new(ResponsePlatform::new(
                &self.config.server.public_base_url,
                route,
            )),
        };

        DetailPage::new(route, collaborators, self.config.page.clone())
    }
}
