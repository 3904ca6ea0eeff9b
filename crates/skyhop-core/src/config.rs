use crate::SkyhopError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const API_KEY_ENV: &str = "AVIATIONSTACK_API_KEY";
/// Name used by the mobile build; still honoured so one `.env` serves both.
pub const LEGACY_API_KEY_ENV: &str = "EXPO_PUBLIC_AVIATIONSTACK_API_KEY";
pub const DEFAULT_HOST: &str = "api.aviationstack.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for `FlightLookupService`. A missing API key is a valid state: lookups then
/// go straight to synthetic flights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub api_key: Option<String>,
    pub host: String,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// When false, exhausted lookups report an error instead of generating placeholders.
    pub synthetic_fallback: bool,
    /// Fixed seed for synthetic flights; entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            host: DEFAULT_HOST.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            synthetic_fallback: true,
            rng_seed: None,
        }
    }
}

impl LookupConfig {
    /// Defaults plus the API key from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Reads a JSON config file. Unknown keys are ignored, missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self, SkyhopError> {
        let content = std::fs::read_to_string(path)?;
        let config: LookupConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// `<config root>/config.json` if present, then environment overrides.
    /// An unreadable file is logged and ignored rather than failing startup.
    pub fn load_default() -> Self {
        let path = crate::get_config_root().join("config.json");
        let mut config = if path.exists() {
            match Self::load(&path) {
                Ok(c) => {
                    debug!("Loaded lookup config — path={}", path.display());
                    c
                }
                Err(e) => {
                    warn!(
                        "Ignoring invalid lookup config — path={} error={}",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        config.apply_env();
        config
    }

    /// Environment key wins over whatever the file said.
    pub fn apply_env(&mut self) {
        let from_env = [API_KEY_ENV, LEGACY_API_KEY_ENV]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|v| !v.trim().is_empty());
        if let Some(key) = from_env {
            self.api_key = Some(key);
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn validate(&self) -> Result<(), SkyhopError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(SkyhopError::Config("host must not be empty".into()));
        }
        if host.contains("://") || host.contains('/') {
            return Err(SkyhopError::Config(format!(
                "host must be a bare hostname, got '{}'",
                self.host
            )));
        }
        if self.timeout.is_zero() {
            return Err(SkyhopError::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = LookupConfig::default().with_api_key("   ");
        assert_eq!(config.api_key(), None);
        let config = LookupConfig::default().with_api_key(" abc ");
        assert_eq!(config.api_key(), Some("abc"));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "timeout": 3, "rng_seed": 42, "unknown": true }"#).unwrap();

        let config = LookupConfig::load(&path).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.host, DEFAULT_HOST);
        assert!(config.synthetic_fallback);
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        fs::write(&path, r#"{ "host": "https://api.aviationstack.com" }"#).unwrap();
        assert!(matches!(LookupConfig::load(&path), Err(SkyhopError::Config(_))));

        fs::write(&path, r#"{ "timeout": 0 }"#).unwrap();
        assert!(matches!(LookupConfig::load(&path), Err(SkyhopError::Config(_))));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(LookupConfig::load(&path), Err(SkyhopError::Json(_))));

        let missing = dir.path().join("missing.json");
        assert!(matches!(LookupConfig::load(&missing), Err(SkyhopError::Io(_))));
    }
}
