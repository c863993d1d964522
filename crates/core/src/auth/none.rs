use async_trait::async_trait;

use super::{AuthError, AuthRequest, Authenticator, Viewer};

/// Authenticator that treats every request as anonymous
pub struct NoneAuthenticator;

impl NoneAuthenticator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoneAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for NoneAuthenticator {
    async fn authenticate(&self, _request: &AuthRequest) -> Result<Viewer, AuthError> {
        Ok(Viewer::anonymous())
    }

    fn method_name(&self) -> &'static str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::IpAddr;

    #[tokio::test]
    async fn test_none_authenticator_returns_anonymous() {
        let auth = NoneAuthenticator::new();
        let request = AuthRequest {
            headers: HashMap::from([(
                "authorization".to_string(),
                "Bearer ignored".to_string(),
            )]),
            source_ip: "127.0.0.1".parse::<IpAddr>().unwrap(),
        };

        let viewer = auth.authenticate(&request).await.unwrap();

        assert_eq!(viewer.user_id, "anonymous");
        assert!(!viewer.authenticated);
    }

    #[test]
    fn test_none_authenticator_method_name() {
        assert_eq!(NoneAuthenticator::default().method_name(), "none");
    }
}
