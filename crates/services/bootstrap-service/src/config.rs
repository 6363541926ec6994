//! Bootstrap service configuration.

use std::env;
use std::path::PathBuf;

use common::{DatabaseConfig, ServiceConfig};

/// Bootstrap service configuration.
#[derive(Debug, Clone)]
pub struct BootstrapServiceConfig {
    /// Name and log level
    pub service: ServiceConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Whether the terminology and tutorial projects are seeded
    pub create_projects: bool,
    /// JSON language catalog replacing the builtin one
    pub language_catalog: Option<PathBuf>,
}

impl BootstrapServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                log_level: env::var("RUST_LOG").unwrap_or(defaults.service.log_level),
                ..defaults.service
            },
            database: DatabaseConfig {
                url: env::var("BOOTSTRAP_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env::var("BOOTSTRAP_DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.max_connections),
                ..defaults.database
            },
            create_projects: env::var("BOOTSTRAP_CREATE_PROJECTS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.create_projects),
            language_catalog: env::var("BOOTSTRAP_LANGUAGE_CATALOG")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for BootstrapServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "bootstrap-service".to_string(),
                log_level: "info".to_string(),
            },
            database: DatabaseConfig::default(),
            create_projects: true,
            language_catalog: None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_create_projects() {
        let config = BootstrapServiceConfig::default();
        assert!(config.create_projects);
        assert!(config.language_catalog.is_none());
        assert_eq!(config.service.service_name, "bootstrap-service");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
