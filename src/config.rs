//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::recipes::{MealDbConfig, DEFAULT_KEYWORDS, DEFAULT_KNOWN_IDS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub recipes: RecipesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Local store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("keepsake").to_string_lossy().to_string())
        .unwrap_or_else(|| "./keepsake_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~/` expanded
    pub fn data_path(&self) -> PathBuf {
        match self.data_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.data_dir)),
            None => PathBuf::from(&self.data_dir),
        }
    }
}

/// Recipe finder configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RecipesConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_known_ids")]
    pub known_ids: Vec<String>,

    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

fn default_api_base_url() -> String {
    MealDbConfig::default().base_url
}

fn default_request_timeout() -> u64 {
    10
}

fn default_known_ids() -> Vec<String> {
    DEFAULT_KNOWN_IDS.iter().map(|s| s.to_string()).collect()
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            known_ids: default_known_ids(),
            keywords: default_keywords(),
        }
    }
}

impl RecipesConfig {
    /// Client settings derived from this section
    pub fn client_config(&self) -> MealDbConfig {
        MealDbConfig {
            base_url: self.api_base_url.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Files that exist but fail to load are skipped and handed back in
    /// [`Discovered::skipped`] so the caller can report them once logging is up.
    pub fn load_default() -> Discovered {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("keepsake").join("config.toml")),
            Some(PathBuf::from("/etc/keepsake/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    fn load_first(paths: &[PathBuf]) -> Discovered {
        let mut skipped = Vec::new();

        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        return Discovered {
                            config,
                            source: Some(path.clone()),
                            skipped,
                        }
                    }
                    Err(e) => skipped.push(e),
                }
            }
        }

        Discovered {
            config: Self::from_env(),
            source: None,
            skipped,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(data_dir) = var("KEEPSAKE_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(url) = var("KEEPSAKE_RECIPE_API_URL") {
            self.recipes.api_base_url = url;
        }

        if let Some(level) = var("KEEPSAKE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("KEEPSAKE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of searching the default config locations
#[derive(Debug)]
pub struct Discovered {
    pub config: Config,
    /// File the config came from; `None` means defaults plus environment
    pub source: Option<PathBuf>,
    /// Files that exist but could not be loaded
    pub skipped: Vec<ConfigError>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Keepsake Configuration
#
# Environment variables override these settings:
# - KEEPSAKE_DATA_DIR
# - KEEPSAKE_RECIPE_API_URL
# - KEEPSAKE_LOG_LEVEL
# - KEEPSAKE_LOG_FORMAT

[storage]
# Directory holding memories.json and theme.json
data_dir = "~/.local/share/keepsake"

[recipes]
# TheMealDB API base URL
api_base_url = "https://www.themealdb.com/api/json/v1/1"

# Request timeout in seconds
request_timeout_secs = 10

# Recipes shown as "popular" and used by the fallback search
known_ids = ["53065", "52795", "52806"]

# Dish-name keywords; results whose name contains none of these are hidden
keywords = [
    "nyama choma",
    "ugali",
    "sukuma wiki",
    "pilau",
    "chapati",
    "mandazi",
    "githeri",
    "mukimo",
    "samosa",
    "kachumbari",
]

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(
            config.recipes.api_base_url,
            "https://www.themealdb.com/api/json/v1/1"
        );
        assert_eq!(config.recipes.known_ids.len(), 3);
        assert!(config.recipes.keywords.contains(&"nyama choma".to_string()));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::from_toml(&generate_default_config()).unwrap();
        assert_eq!(config.storage.data_dir, "~/.local/share/keepsake");
        assert_eq!(config.recipes.request_timeout_secs, 10);
        assert_eq!(config.recipes.known_ids, default_known_ids());
        assert_eq!(config.recipes.keywords, default_keywords());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_toml("[recipes]\nkeywords = [\"ugali\"]\n").unwrap();
        assert_eq!(config.recipes.keywords, vec!["ugali"]);
        assert_eq!(config.recipes.known_ids, default_known_ids());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(&missing),
            Err(ConfigError::Io { .. })
        ));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[storage\n").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_broken_file_in_search_path_is_reported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[storage\nbroken").unwrap();
        std::fs::write(&good, "[recipes]\nrequest_timeout_secs = 4\n").unwrap();

        let found = Config::load_first(&[missing, broken.clone(), good.clone()]);
        assert_eq!(found.source, Some(good));
        assert_eq!(found.config.recipes.request_timeout_secs, 4);
        assert_eq!(found.skipped.len(), 1);
        match &found.skipped[0] {
            ConfigError::Parse { path, .. } => assert_eq!(path, &broken),
            other => panic!("expected parse error, got {:?}", other),
        }

        let found = Config::load_first(&[broken]);
        assert_eq!(found.source, None);
        assert_eq!(found.config.recipes.request_timeout_secs, 10);
        assert_eq!(found.skipped.len(), 1);
        assert!(found.skipped[0].to_string().contains("broken.toml"));
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("KEEPSAKE_DATA_DIR", "/tmp/keepsake"),
            ("KEEPSAKE_RECIPE_API_URL", "http://localhost:9000"),
            ("KEEPSAKE_LOG_FORMAT", "json"),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.storage.data_dir, "/tmp/keepsake");
        assert_eq!(config.recipes.api_base_url, "http://localhost:9000");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_data_path_expands_home() {
        let storage = StorageConfig {
            data_dir: "/var/lib/keepsake".to_string(),
        };
        assert_eq!(storage.data_path(), PathBuf::from("/var/lib/keepsake"));

        if let Some(home) = dirs::home_dir() {
            let storage = StorageConfig {
                data_dir: "~/.local/share/keepsake".to_string(),
            };
            assert_eq!(storage.data_path(), home.join(".local/share/keepsake"));
        }
    }

    #[test]
    fn test_client_config() {
        let recipes = RecipesConfig {
            request_timeout_secs: 3,
            ..Default::default()
        };
        assert_eq!(recipes.client_config().request_timeout_ms, 3000);
    }
}
