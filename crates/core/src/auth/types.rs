use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;

/// Request information for resolving the viewer
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub headers: HashMap<String, String>,
    pub source_ip: IpAddr,
}

/// The person looking at the page, signed in or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// Stable key for the viewer; scopes the local library cache.
    pub user_id: String,
    /// Method that resolved this viewer ("none", "bearer").
    pub method: String,
    pub authenticated: bool,
    /// Credential forwarded to the library API. Never serialized.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self {
            user_id: "anonymous".to_string(),
            method: "none".to_string(),
            authenticated: false,
            token: None,
        }
    }

    pub fn authenticated(
        user_id: impl Into<String>,
        method: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            method: method.into(),
            authenticated: true,
            token,
        }
    }
}
