//! # Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`DRAWER_*`)
//! 2. Config file (`config.toml` in the platform config dir)
//! 3. Defaults (this file)
//!
//! ## Example `config.toml`
//! ```toml
//! database_path = "/var/lib/cash-drawer/drawer.db"
//! reports_dir = "/var/lib/cash-drawer/reports"
//! default_organization = "Corner Store"
//! currency_symbol = "$"
//! ```
//!
//! Amounts are always whole cents, so there is no decimal-places setting.
//! Unknown keys are rejected rather than silently ignored.
//!
//! Read-only after initialization.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use drawer_core::Money;
use drawer_db::DbConfig;

/// Directory name under the platform data/config dirs.
pub const APP_DIR_NAME: &str = "cash-drawer";

/// Environment variable overriding [`DrawerConfig::database_path`].
pub const ENV_DB_PATH: &str = "DRAWER_DB_PATH";
/// Environment variable overriding [`DrawerConfig::reports_dir`].
pub const ENV_REPORTS_DIR: &str = "DRAWER_REPORTS_DIR";
/// Environment variable overriding [`DrawerConfig::default_organization`].
pub const ENV_ORGANIZATION: &str = "DRAWER_ORGANIZATION";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrawerConfig {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// Where text reports are written.
    pub reports_dir: PathBuf,

    /// Organization used when neither the shift nor the stored record has one.
    pub default_organization: Option<String>,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Pool size for the SQLite database.
    pub max_connections: u32,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);

        DrawerConfig {
            database_path: data_dir.join("drawer.db"),
            reports_dir: data_dir.join("reports"),
            default_organization: None,
            currency_symbol: "$".to_string(),
            max_connections: 4,
        }
    }
}

impl DrawerConfig {
    /// Loads the config file (if present) and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => DrawerConfig::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// `<platform config dir>/cash-drawer/config.toml`.
    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
    }

    /// Parses a TOML file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `DRAWER_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(path);
        }

        if let Some(dir) = lookup(ENV_REPORTS_DIR).filter(|v| !v.trim().is_empty()) {
            self.reports_dir = PathBuf::from(dir);
        }

        if let Some(name) = lookup(ENV_ORGANIZATION) {
            let name = name.trim();
            self.default_organization = (!name.is_empty()).then(|| name.to_string());
        }
    }

    /// Pool settings for [`drawer_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.max_connections)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use drawer_service::config::DrawerConfig;
    ///
    /// let config = DrawerConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let whole = (cents / 100).unsigned_abs();
        let frac = (cents % 100).unsigned_abs();

        format!("{}{}{}.{:02}", sign, self.currency_symbol, whole, frac)
    }

    pub fn format_amount(&self, amount: Money) -> String {
        self.format_currency(amount.cents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency() {
        let config = DrawerConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-250), "-$2.50");
        assert_eq!(config.format_amount(Money::from_dollars(41)), "$41.00");
    }

    #[test]
    fn test_format_currency_custom_symbol() {
        let config = DrawerConfig {
            currency_symbol: "€".to_string(),
            ..DrawerConfig::default()
        };
        assert_eq!(config.format_currency(1500), "€15.00");
        assert_eq!(config.format_currency(i64::MIN), "-€92233720368547758.08");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DB_PATH, "/srv/drawer.db"),
            (ENV_REPORTS_DIR, "/srv/reports"),
            (ENV_ORGANIZATION, "  Night Market "),
        ]
        .into_iter()
        .collect();

        let mut config = DrawerConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_path, PathBuf::from("/srv/drawer.db"));
        assert_eq!(config.reports_dir, PathBuf::from("/srv/reports"));
        assert_eq!(config.default_organization.as_deref(), Some("Night Market"));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = DrawerConfig {
            default_organization: Some("Kept".to_string()),
            ..DrawerConfig::default()
        };
        let before = config.database_path.clone();

        config.apply_overrides(|key| (key == ENV_DB_PATH).then(|| "  ".to_string()));
        assert_eq!(config.database_path, before);
        assert_eq!(config.default_organization.as_deref(), Some("Kept"));
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "database_path = \"/data/drawer.db\"\ndefault_organization = \"Corner Store\"\n",
        )
        .unwrap();

        let config = DrawerConfig::from_file(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/data/drawer.db"));
        assert_eq!(config.default_organization.as_deref(), Some("Corner Store"));
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            DrawerConfig::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "max_connections = \"many\"").unwrap();
        assert!(matches!(
            DrawerConfig::from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_decimal_places_setting_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        for value in ["3", "20"] {
            let path = dir.path().join(format!("decimals-{}.toml", value));
            std::fs::write(&path, format!("currency_decimals = {}\n", value)).unwrap();

            assert!(matches!(
                DrawerConfig::from_file(&path),
                Err(ConfigError::Parse { .. })
            ));
        }
    }
}
