//! Configuration loading and discovery.
//!
//! Configuration is merged from (lowest to highest precedence):
//! 1. Built-in defaults
//! 2. User config: `~/.config/canonize/config.toml` (XDG equivalent per platform)
//! 3. Project config: `.canonize.toml` or `canonize.toml`, found by walking
//!    up from the current directory (stopping at a `.git` boundary)
//! 4. Explicit files passed via `--config`
//! 5. Environment variables prefixed `CANONIZE_`
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use canonize_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let config = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The configuration for canonize.
///
/// Every field has a usable default, so a missing config file is never an
/// error; files and environment variables only override what they name.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Default region for phone number validation (ISO 3166-1 alpha-2).
    pub region: String,
    /// Whether phone numbers must carry an explicit `+` country code.
    pub require_country_code: bool,
    /// Decimal places for currency amounts. Zero disables the scale check.
    pub currency_decimals: u32,
    /// Significant digits shown for percentages.
    pub percentage_digits: u32,
    /// Significant digits kept for floating-point values. Zero keeps full
    /// precision.
    pub double_digits: u32,
    /// Override URL for the ISBN range document. Omit for the
    /// International ISBN Agency endpoint.
    pub isbn_range_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            region: "US".to_string(),
            require_country_code: false,
            currency_decimals: 2,
            percentage_digits: 2,
            double_digits: 0,
            isbn_range_url: None,
        }
    }
}

/// Config file names searched in each project directory, low→high precedence.
const PROJECT_FILES: &[&str] = &[".canonize.toml", "canonize.toml"];

/// Application name for XDG directory lookup.
const APP_NAME: &str = "canonize";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from the XDG directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load; these must exist.
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader will walk up from this directory looking for config files.
    #[must_use]
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/canonize/`.
    #[must_use]
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Disable the boundary marker (search all the way to filesystem root).
    #[must_use]
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files, and unlike
    /// discovered ones they must exist.
    #[must_use]
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Precedence (highest to lowest):
    /// 1. `CANONIZE_*` environment variables
    /// 2. Explicit files (in order added via `with_file`)
    /// 3. Project config (closest directory to the search root)
    /// 4. User config (`~/.config/canonize/config.toml`)
    /// 5. Default values
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<Config> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if self.include_user_config
            && let Some(user_config) = find_user_config()
        {
            figment = figment.merge(Toml::file_exact(user_config.as_str()));
        }

        if let Some(ref root) = self.project_search_root {
            for pc in self.find_project_configs(root) {
                figment = figment.merge(Toml::file_exact(pc.as_str()));
            }
        }

        for file in &self.explicit_files {
            if !file.is_file() {
                return Err(ConfigError::NotFound(file.to_string()));
            }
            figment = figment.merge(Toml::file_exact(file.as_str()));
        }

        figment = figment.merge(Env::prefixed("CANONIZE_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(
            log_level = config.log_level.as_str(),
            region = %config.region,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns matching config files from the closest directory that has
    /// any, ordered low-to-high precedence: dotfile first.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let found: Vec<Utf8PathBuf> = PROJECT_FILES
                .iter()
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }

            // Boundary marker is checked AFTER the config files, so a
            // config sitting next to the marker is still found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }
}

/// Find user config in the XDG config directory.
fn find_user_config() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        Utf8PathBuf::from_path_buf(config_path).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.region, "US");
        assert_eq!(config.currency_decimals, 2);
        assert!(config.isbn_range_url.is_none());
    }

    #[test]
    fn loader_succeeds_with_no_files() {
        let config = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            "log_level = \"debug\"\ncurrency_decimals = 3\n",
        )
        .unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.currency_decimals, 3);
        // Untouched fields keep their defaults
        assert_eq!(config.region, "US");
    }

    #[test]
    fn missing_explicit_file_errors() {
        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file("/nonexistent/canonize.toml")
            .load();
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn project_config_discovered_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("project");
        let sub_dir = project_dir.join("src").join("deep");
        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(
            project_dir.join(".canonize.toml"),
            "require_country_code = true\n",
        )
        .unwrap();
        let sub_dir = Utf8PathBuf::try_from(sub_dir).unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&sub_dir)
            .load()
            .unwrap();

        assert!(config.require_country_code);
    }

    #[test]
    fn boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join(".canonize.toml"), "region = \"CA\"\n").unwrap();
        fs::create_dir(child.join(".git")).unwrap();
        let work = Utf8PathBuf::try_from(work).unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&work)
            .load()
            .unwrap();

        // Config beyond the .git boundary is ignored
        assert_eq!(config.region, "US");
    }

    #[test]
    fn regular_file_overrides_dotfile() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".canonize.toml"), "double_digits = 4\n").unwrap();
        fs::write(tmp.path().join("canonize.toml"), "double_digits = 6\n").unwrap();
        let tmp_path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&tmp_path)
            .load()
            .unwrap();

        assert_eq!(config.double_digits, 6);
    }
}
