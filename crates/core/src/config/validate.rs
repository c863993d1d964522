use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - TMDB API key and library URL are set
/// - Panel limits are positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.tmdb.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tmdb.api_key is required".to_string(),
        ));
    }

    if config.library.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "library.base_url is required".to_string(),
        ));
    }

    let limits = [
        ("page.cast_limit", config.page.cast_limit),
        ("page.similar_limit", config.page.similar_limit),
        ("page.production_limit", config.page.production_limit),
    ];
    if let Some((name, _)) = limits.iter().find(|(_, limit)| *limit == 0) {
        return Err(ConfigError::ValidationError(format!(
            "{} must be greater than 0",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TmdbConfig;
    use crate::config::{AuthConfig, AuthMethod, ServerConfig};
    use crate::detail::PageConfig;
    use crate::library::LibraryConfig;

    fn valid_config() -> Config {
        Config {
            auth: AuthConfig {
                method: AuthMethod::None,
            },
            server: ServerConfig::default(),
            tmdb: TmdbConfig {
                api_key: "k".to_string(),
                base_url: None,
                timeout_secs: 30,
            },
            library: LibraryConfig {
                base_url: "http://localhost:5000/api".to_string(),
                timeout_secs: 30,
                cache_max_viewers: 100,
            },
            page: PageConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = valid_config();
        config.server.port = 0;
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_empty_api_key_fails() {
        let mut config = valid_config();
        config.tmdb.api_key = " ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("tmdb.api_key"));
    }

    #[test]
    fn test_validate_empty_library_url_fails() {
        let mut config = valid_config();
        config.library.base_url = String::new();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("library.base_url"));
    }

    #[test]
    fn test_validate_zero_limit_fails() {
        let mut config = valid_config();
        config.page.similar_limit = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("page.similar_limit"));
    }
}
