use async_trait::async_trait;
use thiserror::Error;

use super::types::{AuthRequest, Viewer};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve the viewer behind a request.
    ///
    /// Requests without credentials resolve to [`Viewer::anonymous`]; only
    /// malformed credentials are an error.
    async fn authenticate(&self, request: &AuthRequest) -> Result<Viewer, AuthError>;

    /// Name of this authentication method
    fn method_name(&self) -> &'static str;
}

/// Ambient viewer session consulted by the detail page.
pub trait Session: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

impl Session for Viewer {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
