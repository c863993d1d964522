//! Bearer token pass-through.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::{AuthError, AuthRequest, Authenticator, Viewer};

/// Authenticator that accepts a session token issued by the library API.
///
/// The token is not validated here: the library API is the authority and
/// rejects bad tokens on the first call. The viewer key is a digest of the
/// token so the local cache never stores the credential itself.
///
/// Accepts `Authorization: Bearer <token>`.
pub struct BearerAuthenticator;

impl BearerAuthenticator {
    pub fn new() -> Self {
        Self
    }

    fn extract_token(request: &AuthRequest) -> Option<&str> {
        let header = request.headers.get("authorization")?;
        header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .map(str::trim)
    }
}

impl Default for BearerAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

/// Short, stable viewer key derived from a token.
pub fn viewer_key(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{:x}", digest)[..16].to_string()
}

#[async_trait]
impl Authenticator for BearerAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Viewer, AuthError> {
        let Some(token) = Self::extract_token(request) else {
            return Ok(Viewer::anonymous());
        };

        if token.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "Empty bearer token".to_string(),
            ));
        }

        Ok(Viewer::authenticated(
            viewer_key(token),
            "bearer",
            Some(token.to_string()),
        ))
    }

    fn method_name(&self) -> &'static str {
        "bearer"
    }
}
