use std::env;

use crate::auth::{JwtSecret, DEFAULT_TTL_HOURS, MAX_TTL_HOURS};
use crate::events::SinkKind;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub request_timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    /// No default: a missing secret keeps the service from starting.
    pub jwt_secret: Option<JwtSecret>,
    pub jwt_ttl_hours: u64,
}

#[derive(Debug, Clone)]
pub struct EventsConfig {
    pub sink: SinkKind,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source (the process
    /// environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database overrides
        self.database.url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Some(v) = lookup("API_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        self.security.jwt_secret = lookup("JWT_SECRET").and_then(JwtSecret::new);
        if let Some(v) = lookup("JWT_TTL_HOURS") {
            match v.parse::<u64>() {
                Ok(hours) if (1..=MAX_TTL_HOURS).contains(&hours) => {
                    self.security.jwt_ttl_hours = hours;
                }
                _ => tracing::warn!(
                    "JWT_TTL_HOURS '{}' must be between 1 and {}, keeping {}",
                    v,
                    MAX_TTL_HOURS,
                    self.security.jwt_ttl_hours
                ),
            }
        }

        // Event sink
        if let Some(v) = lookup("EVENT_SINK") {
            self.events.sink = v.parse().unwrap_or_else(|_| {
                tracing::warn!("unknown EVENT_SINK '{}', event publishing disabled", v);
                SinkKind::Disabled
            });
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                request_timeout_secs: 30,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                jwt_secret: None,
                jwt_ttl_hours: DEFAULT_TTL_HOURS,
            },
            events: EventsConfig { sink: SinkKind::Log },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                request_timeout_secs: 15,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://staging.example.com".to_string()],
                jwt_secret: None,
                jwt_ttl_hours: DEFAULT_TTL_HOURS,
            },
            events: EventsConfig { sink: SinkKind::Disabled },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                request_timeout_secs: 10,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://app.example.com".to_string()],
                jwt_secret: None,
                jwt_ttl_hours: DEFAULT_TTL_HOURS,
            },
            events: EventsConfig { sink: SinkKind::Disabled },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_development_without_secret() {
        let config = config_from(&[]);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.security.jwt_secret.is_none());
        assert_eq!(config.security.jwt_ttl_hours, 72);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn production_preset_with_overrides() {
        let config = config_from(&[
            ("APP_ENV", "prod"),
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_MAX_CONNECTIONS", "7"),
            ("SECURITY_CORS_ORIGINS", "https://a.example, https://b.example"),
            ("EVENT_SINK", "log"),
        ]);
        assert_eq!(config.environment, Environment::Production);
        assert!(config.security.jwt_secret.is_some());
        assert_eq!(config.database.max_connections, 7);
        assert_eq!(config.security.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.events.sink, SinkKind::Log);
    }

    #[test]
    fn empty_secret_is_treated_as_missing() {
        let config = config_from(&[("JWT_SECRET", "")]);
        assert!(config.security.jwt_secret.is_none());
    }

    #[test]
    fn unparsable_overrides_keep_preset_values() {
        let config = config_from(&[("API_REQUEST_TIMEOUT_SECS", "soon"), ("EVENT_SINK", "kafka")]);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.events.sink, SinkKind::Disabled);
    }

    #[test]
    fn jwt_ttl_must_be_within_range() {
        assert_eq!(config_from(&[("JWT_TTL_HOURS", "12")]).security.jwt_ttl_hours, 12);
        assert_eq!(config_from(&[("JWT_TTL_HOURS", "8760")]).security.jwt_ttl_hours, MAX_TTL_HOURS);
        for rejected in ["0", "8761", "3000000000000000", "-1", "forever"] {
            let config = config_from(&[("JWT_TTL_HOURS", rejected)]);
            assert_eq!(config.security.jwt_ttl_hours, DEFAULT_TTL_HOURS, "{rejected}");
        }
    }
}
