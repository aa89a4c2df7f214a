use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub routing: RoutingConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Apex domain tenant subdomains hang off of.
    pub base_domain: String,
    /// Internal route rewritten requests land on. No trailing slash.
    pub landing_route: String,
    /// Resolution cache TTL in seconds, positive and negative entries alike.
    pub cache_ttl_secs: u64,
    /// Trust `x-custom-domain-slug` set by a fronting proxy.
    pub trust_proxy_slug_header: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment presets first, specific env vars override.
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("GATEWAY_BASE_DOMAIN") {
            self.routing.base_domain = v.to_ascii_lowercase();
        }
        if let Ok(v) = env::var("GATEWAY_LANDING_ROUTE") {
            self.routing.landing_route = v;
        }
        if let Ok(v) = env::var("GATEWAY_CACHE_TTL_SECS") {
            self.routing.cache_ttl_secs = v.parse().unwrap_or(self.routing.cache_ttl_secs);
        }
        if let Ok(v) = env::var("GATEWAY_TRUST_PROXY_SLUG") {
            self.routing.trust_proxy_slug_header =
                v.parse().unwrap_or(self.routing.trust_proxy_slug_header);
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout =
                v.parse().unwrap_or(self.database.connection_timeout);
        }

        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            routing: RoutingConfig {
                base_domain: "creator0x.com".to_string(),
                landing_route: "/landing".to_string(),
                cache_ttl_secs: 300, // 5 minutes
                trust_proxy_slug_header: false,
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
            },
            server: ServerConfig { port: 3000 },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            routing: RoutingConfig {
                base_domain: "creator0x.com".to_string(),
                landing_route: "/landing".to_string(),
                cache_ttl_secs: 300,
                trust_proxy_slug_header: true,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
            },
            server: ServerConfig { port: 3000 },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            routing: RoutingConfig {
                base_domain: "creator0x.com".to_string(),
                landing_route: "/landing".to_string(),
                cache_ttl_secs: 300,
                trust_proxy_slug_header: true,
            },
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
            },
            server: ServerConfig { port: 3000 },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.routing.base_domain, "creator0x.com");
        assert_eq!(config.routing.landing_route, "/landing");
        assert_eq!(config.routing.cache_ttl_secs, 300);
        assert!(!config.routing.trust_proxy_slug_header);
    }

    #[test]
    fn production_trusts_proxy_and_tightens_pool() {
        let config = AppConfig::production();
        assert!(config.routing.trust_proxy_slug_header);
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.database.connection_timeout, 5);
    }
}
