use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::catalog::TmdbConfig;
use crate::detail::PageConfig;
use crate::library::LibraryConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub tmdb: TmdbConfig,
    pub library: LibraryConfig,
    #[serde(default)]
    pub page: PageConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public origin of the web app, used to build share links.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Every viewer is anonymous.
    None,
    /// `Authorization: Bearer <token>`, forwarded to the library API.
    Bearer,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::None => "none",
            AuthMethod::Bearer => "bearer",
        }
    }
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub tmdb: SanitizedTmdbConfig,
    pub library: LibraryConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub method: String,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                method: config.auth.method.as_str().to_string(),
            },
            server: config.server.clone(),
            tmdb: SanitizedTmdbConfig {
                base_url: config.tmdb.base_url.clone(),
                api_key_configured: !config.tmdb.api_key.is_empty(),
                timeout_secs: config.tmdb.timeout_secs,
            },
            library: config.library.clone(),
            page: config.page.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[auth]
method = "none"

[tmdb]
api_key = "secret-key"

[library]
base_url = "http://localhost:5000/api"
"#;

    #[test]
    fn test_deserialize_minimal_config_uses_defaults() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.auth.method, AuthMethod::None);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.server.public_base_url, "http://localhost:3000");
        assert_eq!(config.tmdb.timeout_secs, 30);
        assert_eq!(config.library.timeout_secs, 30);
        assert_eq!(config.library.cache_max_viewers, 10_000);
        assert_eq!(config.page, PageConfig::default());
    }

    #[test]
    fn test_deserialize_bearer_with_page_overrides() {
        let toml = r#"
[auth]
method = "bearer"

[server]
host = "127.0.0.1"
port = 9000

[tmdb]
api_key = "k"
base_url = "http://tmdb.local/3"

[library]
base_url = "http://library.local/api"
timeout_secs = 5

[page]
cast_limit = 4
trailer_site = "Vimeo"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.auth.method, AuthMethod::Bearer);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.tmdb.base_url.as_deref(), Some("http://tmdb.local/3"));
        assert_eq!(config.library.timeout_secs, 5);
        assert_eq!(config.page.cast_limit, 4);
        assert_eq!(config.page.similar_limit, 6);
        assert_eq!(config.page.trailer_site, "Vimeo");
    }

    #[test]
    fn test_deserialize_missing_auth_fails() {
        let toml = r#"
[tmdb]
api_key = "k"

[library]
base_url = "http://localhost:5000/api"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_deserialize_unknown_auth_method_fails() {
        let toml = MINIMAL.replace("\"none\"", "\"oidc\"");
        assert!(toml::from_str::<Config>(&toml).is_err());
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.tmdb.api_key_configured);
        assert_eq!(sanitized.auth.method, "none");

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
    }
}
