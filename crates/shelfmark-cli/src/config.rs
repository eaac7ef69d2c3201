use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration for shelfmark.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SHELFMARK_* prefix)
/// 3. Config file (~/.config/shelfmark/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite catalog.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/library.db
    /// - ENV: SHELFMARK_DATABASE_PATH
    /// - Config: database_path = "/path/to/library.db"
    /// - Default: ~/.local/share/shelfmark/library.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Logger options, passed to twyg as-is.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from the given file (if present) and environment.
    fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("shelfmark");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration, letting `--db` override the database path.
    pub fn load_with_db_path(db_path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::load()?.with_db_path(db_path))
    }

    #[must_use]
    fn with_db_path(mut self, db_path: Option<PathBuf>) -> Self {
        if let Some(db_path) = db_path {
            self.database_path = db_path;
        }
        self
    }
}

/// Get the default database path.
///
/// Returns: ~/.local/share/shelfmark/library.db (or platform equivalent)
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelfmark")
        .join("library.db")
}

/// Get the config file path.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelfmark")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Shelfmark Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SHELFMARK_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite catalog holding your genres and books
#
# Can also be set via:
# - CLI: shelfmark --db /custom/library.db book list
# - Environment: SHELFMARK_DATABASE_PATH=/custom/library.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/library.db"

# Logging (passed to twyg)
#[logging]
#coloured = true
#level = "info"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

/// Install the configured logger.
pub fn init_logging(config: &Config) -> Result<()> {
    twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {:?}", e))?;
    Ok(())
}
