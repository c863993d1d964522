pub mod auth;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod library;
pub mod metrics;
pub mod notice;
pub mod platform;
pub mod testing;

pub use auth::{
    create_authenticator, AuthError, AuthRequest, Authenticator, BearerAuthenticator,
    NoneAuthenticator, Session, Viewer,
};
pub use catalog::{MovieApi, MovieApiError, MovieDetails, MovieId, TmdbClient};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthMethod, Config, ConfigError,
    SanitizedConfig,
};
pub use detail::{
    ActionOutcome, DetailCollaborators, DetailPage, LoadOutcome, PageConfig, PagePhase,
    PageView, RatingSubmission, ShareOutcome, SubmitError, TrailerOutcome, ViewerFlags,
};
pub use library::{
    BookmarkStore, LibraryCache, LibraryClient, LibraryError, LibraryProvider, WatchedEntry,
    WatchedStore,
};
pub use notice::{Notice, NoticeLevel, NoticeLog, Notifier, TracingNotifier};
pub use platform::{Platform, PlatformError, SharePayload};
