//! Configuration for market-watch tools

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default GitHub REST API base URL
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// GitHub App settings used by the repository action tools
///
/// All fields except `api_base` may be absent at startup; tools that need
/// them report missing configuration at invocation time, before any network
/// call is made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubSettings {
    /// GitHub App identifier
    pub app_id: Option<String>,

    /// Path to the App's RSA private key (PEM)
    pub private_key_path: Option<PathBuf>,

    /// Repository owner; when absent, `repo` may carry a combined
    /// "owner/repo" string
    pub owner: Option<String>,

    /// Repository name, or a combined "owner/repo" string
    pub repo: Option<String>,

    /// API base URL; overridable so contract tests can point at a mock server
    pub api_base: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            app_id: None,
            private_key_path: None,
            owner: None,
            repo: None,
            api_base: DEFAULT_GITHUB_API_BASE.to_string(),
        }
    }
}

/// Configuration for market-watch tool construction
///
/// An explicit configuration object threaded into each tool at construction
/// time, replacing ad-hoc environment lookups inside tool bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Directory receiving charts, reports, and dashboard data
    pub output_dir: PathBuf,

    /// GitHub App settings
    pub github: GitHubSettings,

    /// Request timeout for outbound HTTP calls
    pub request_timeout: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            github: GitHubSettings::default(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl WatchConfig {
    /// Create a new configuration builder
    pub fn builder() -> WatchConfigBuilder {
        WatchConfigBuilder::default()
    }

    /// Load configuration from the environment
    ///
    /// Reads `MARKET_WATCH_OUTPUT_DIR`, `GITHUB_APP_ID`,
    /// `GITHUB_PRIVATE_KEY_PATH`, `GITHUB_OWNER`, `GITHUB_REPO`, and
    /// `GITHUB_API_URL`; unset variables leave the defaults in place.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(dir) = std::env::var("MARKET_WATCH_OUTPUT_DIR") {
            builder = builder.output_dir(dir);
        }
        if let Ok(app_id) = std::env::var("GITHUB_APP_ID") {
            builder = builder.github_app_id(app_id);
        }
        if let Ok(path) = std::env::var("GITHUB_PRIVATE_KEY_PATH") {
            builder = builder.github_private_key_path(path);
        }
        if let Ok(owner) = std::env::var("GITHUB_OWNER") {
            builder = builder.github_owner(owner);
        }
        if let Ok(repo) = std::env::var("GITHUB_REPO") {
            builder = builder.github_repo(repo);
        }
        if let Ok(base) = std::env::var("GITHUB_API_URL") {
            builder = builder.github_api_base(base);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Configuration(
                "output directory must not be empty".to_string(),
            ));
        }

        if self.github.api_base.is_empty() {
            return Err(Error::Configuration(
                "GitHub API base URL must not be empty".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Configuration(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for WatchConfig
#[derive(Debug, Default)]
pub struct WatchConfigBuilder {
    output_dir: Option<PathBuf>,
    app_id: Option<String>,
    private_key_path: Option<PathBuf>,
    owner: Option<String>,
    repo: Option<String>,
    api_base: Option<String>,
    request_timeout: Option<Duration>,
}

impl WatchConfigBuilder {
    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the GitHub App identifier
    pub fn github_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Set the GitHub App private key path
    pub fn github_private_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.private_key_path = Some(path.into());
        self
    }

    /// Set the repository owner
    pub fn github_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the repository name (or combined "owner/repo")
    pub fn github_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Set the GitHub API base URL
    pub fn github_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<WatchConfig> {
        let defaults = WatchConfig::default();

        let config = WatchConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            github: GitHubSettings {
                app_id: self.app_id,
                private_key_path: self.private_key_path,
                owner: self.owner,
                repo: self.repo,
                api_base: self.api_base.unwrap_or(defaults.github.api_base),
            },
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WatchConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.github.api_base, DEFAULT_GITHUB_API_BASE);
        assert!(config.github.app_id.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = WatchConfig::builder()
            .output_dir("artifacts")
            .github_app_id("12345")
            .github_repo("octocat/hello-world")
            .request_timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("artifacts"));
        assert_eq!(config.github.app_id.as_deref(), Some("12345"));
        assert_eq!(config.github.repo.as_deref(), Some("octocat/hello-world"));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation_empty_output_dir() {
        let config = WatchConfig {
            output_dir: PathBuf::new(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = WatchConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }
}
