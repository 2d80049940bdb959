//! Configuration module
//!
//! Environment-driven settings for the data-access layer: database pool sizing,
//! per-operation deadlines, the point-lookup scoping policy, and token signing.

use std::env;
use std::time::Duration;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const QUERY_TIMEOUT_SECS: u64 = 10;
const JWT_EXPIRY_HOURS: i64 = 24;
const MIN_JWT_SECRET_LEN: usize = 32;

/// How id-targeted statements (get, update, delete) are scoped.
///
/// `Global` matches rows by identifier alone, so any caller holding a valid id
/// can reach a row of another company. `TenantScoped` adds the caller's
/// `company_id` to the predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupPolicy {
    #[default]
    Global,
    TenantScoped,
}

impl LookupPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "global" => Some(LookupPolicy::Global),
            "tenant" | "tenant_scoped" => Some(LookupPolicy::TenantScoped),
            _ => None,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub db_query_timeout_seconds: u64,
    pub lookup_policy: LookupPolicy,
    pub jwt_secret: Option<String>,
    pub jwt_expiry_hours: i64,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let lookup_policy = match lookup("DB_LOOKUP_SCOPE") {
            Some(raw) => LookupPolicy::parse(&raw).ok_or_else(|| {
                anyhow::anyhow!("DB_LOOKUP_SCOPE must be 'global' or 'tenant', got '{}'", raw)
            })?,
            None => LookupPolicy::default(),
        };

        let config = Config {
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            db_query_timeout_seconds: lookup("DB_QUERY_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(QUERY_TIMEOUT_SECS),
            lookup_policy,
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.is_empty()),
            jwt_expiry_hours: lookup("JWT_EXPIRY_HOURS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(JWT_EXPIRY_HOURS),
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if let Some(secret) = &self.jwt_secret {
            if secret.len() < MIN_JWT_SECRET_LEN {
                return Err(anyhow::anyhow!(
                    "JWT_SECRET must be at least {} characters long",
                    MIN_JWT_SECRET_LEN
                ));
            }
        }

        if self.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.db_query_timeout_seconds)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout_seconds)
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.jwt_expiry_hours.max(0) as u64 * 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = config_from(&[("DATABASE_URL", "postgresql://localhost/companyflow")]).unwrap();
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(config.query_timeout(), Duration::from_secs(10));
        assert_eq!(config.lookup_policy, LookupPolicy::Global);
        assert_eq!(config.environment, "development");
        assert!(config.jwt_secret.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_database_url_fails() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_non_postgres_url_rejected() {
        assert!(config_from(&[("DATABASE_URL", "mysql://localhost/db")]).is_err());
    }

    #[test]
    fn test_lookup_scope_parsing() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("DB_LOOKUP_SCOPE", "Tenant"),
        ])
        .unwrap();
        assert_eq!(config.lookup_policy, LookupPolicy::TenantScoped);

        assert!(config_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("DB_LOOKUP_SCOPE", "everywhere"),
        ])
        .is_err());
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("DB_MAX_CONNECTIONS", "lots"),
            ("DB_QUERY_TIMEOUT_SECONDS", "0"),
        ])
        .unwrap();
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(config.db_query_timeout_seconds, 10);
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let err = config_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("JWT_SECRET", "too-short"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }
}
