//! Service configuration loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `THINGFUL_*` environment variables and
//! configuration files. Unset values fall back to the defaults below.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DEFAULT_POOL_MAX_SIZE;

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_address` is not a socket address.
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddress { value: String, message: String },
    /// `pool_max_size` must allow at least one connection.
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
}

/// Runtime settings for the registration service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "THINGFUL")]
pub struct AppSettings {
    /// Socket address for the HTTP listener.
    pub bind_address: Option<String>,
    /// PostgreSQL connection URL. Without one, users are kept in memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Skip embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl AppSettings {
    /// Return the configured listen address, falling back to the default.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddress`] when the value does not
    /// parse as `host:port`.
    pub fn bind_address(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddress {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Return the database URL, treating a blank value as unset.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the configured pool size, falling back to the default.
    ///
    /// # Errors
    /// Returns [`SettingsError::EmptyPool`] for a size of zero.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "THINGFUL_BIND_ADDRESS",
        "THINGFUL_DATABASE_URL",
        "THINGFUL_POOL_MAX_SIZE",
        "THINGFUL_SKIP_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("thingful")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_address().expect("default address parses"),
            DEFAULT_BIND_ADDRESS.parse::<SocketAddr>().expect("valid default")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(
            settings.pool_max_size().expect("default size"),
            DEFAULT_POOL_MAX_SIZE
        );
        assert!(!settings.skip_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("THINGFUL_BIND_ADDRESS", Some("127.0.0.1:9090".to_owned())),
            (
                "THINGFUL_DATABASE_URL",
                Some("postgres://localhost/thingful".to_owned()),
            ),
            ("THINGFUL_POOL_MAX_SIZE", Some("4".to_owned())),
            ("THINGFUL_SKIP_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_address().expect("address parses"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("valid address")
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/thingful")
        );
        assert_eq!(settings.pool_max_size().expect("size"), 4);
        assert!(settings.skip_migrations);
    }

    #[rstest]
    fn invalid_values_are_reported_by_accessors() {
        let _guard = lock_env([
            ("THINGFUL_BIND_ADDRESS", Some("not-an-address".to_owned())),
            ("THINGFUL_DATABASE_URL", Some("   ".to_owned())),
            ("THINGFUL_POOL_MAX_SIZE", Some("0".to_owned())),
            ("THINGFUL_SKIP_MIGRATIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_address(),
            Err(SettingsError::InvalidBindAddress { .. })
        ));
        assert!(settings.database_url().is_none());
        assert_eq!(settings.pool_max_size(), Err(SettingsError::EmptyPool));
    }
}
