mod bearer;
mod none;
mod traits;
mod types;

pub use bearer::*;
pub use none::*;
pub use traits::*;
pub use types::*;

use crate::config::AuthConfig;

/// Factory function to create authenticator from config
pub fn create_authenticator(config: &AuthConfig) -> Box<dyn Authenticator> {
    use crate::config::AuthMethod;

    match config.method {
        AuthMethod::None => Box::new(NoneAuthenticator::new()),
        AuthMethod::Bearer => Box::new(BearerAuthenticator::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthMethod;

    #[test]
    fn test_create_authenticator_none() {
        let config = AuthConfig {
            method: AuthMethod::None,
        };
        assert_eq!(create_authenticator(&config).method_name(), "none");
    }

    #[test]
    fn test_create_authenticator_bearer() {
        let config = AuthConfig {
            method: AuthMethod::Bearer,
        };
        assert_eq!(create_authenticator(&config).method_name(), "bearer");
    }
}
