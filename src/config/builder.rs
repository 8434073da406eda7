// src/config/builder.rs

use super::{validation::validate_builder_options, Config};
use crate::cli::Cli;
use crate::constants::{DEFAULT_OUTPUT_FILE, DEFAULT_TIMEOUT};
use crate::errors::{Error, Result};
use crate::remote::contents_api_url;
use std::path::PathBuf;
use std::time::Duration;

/// A builder for creating a `Config` programmatically.
///
/// # Examples
///
/// ```
/// use repohash::ConfigBuilder;
/// use std::time::Duration;
///
/// let config = ConfigBuilder::new()
///     .repo_url("gitea.radium.group/radium/userhash.git")
///     .save_folder("mirror")
///     .task_count(3)
///     .request_timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     config.api_root,
///     "https://gitea.radium.group/api/v1/repos/radium/userhash/contents"
/// );
/// assert_eq!(config.task_count, 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    pub(super) repo_url: Option<String>,
    pub(super) api_url: Option<String>,
    save_folder: Option<String>,
    task_count: Option<usize>,
    output_file: Option<String>,
    pub(super) request_timeout: Option<Duration>,
}

impl ConfigBuilder {
    /// Creates a new, empty `ConfigBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-populated from parsed command-line arguments.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            repo_url: cli.repo,
            api_url: cli.api_url,
            save_folder: cli.save_folder,
            task_count: Some(cli.task_count),
            output_file: cli.output_file,
            request_timeout: cli.timeout.map(Duration::from_secs),
        }
    }

    /// Sets the repository to mirror. The API root is derived from it.
    pub fn repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }

    /// Sets an explicit contents API listing URL to start the walk from.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Sets the destination folder for mirrored files.
    pub fn save_folder(mut self, folder: impl Into<String>) -> Self {
        self.save_folder = Some(folder.into());
        self
    }

    /// Sets the number of download units (`0` = one per file).
    pub fn task_count(mut self, count: usize) -> Self {
        self.task_count = Some(count);
        self
    }

    /// Sets the path the digest map is written to.
    pub fn output_file(mut self, path: impl Into<String>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Validates the settings and builds the `Config`.
    ///
    /// # Errors
    /// Returns `Error::Config` for invalid option combinations and
    /// `Error::InvalidRepoUrl` if the repository URL cannot be mapped to an API root.
    pub fn build(self) -> Result<Config> {
        validate_builder_options(&self)?;

        let api_root = match (&self.repo_url, self.api_url) {
            (_, Some(api_url)) => api_url,
            (Some(repo), None) => contents_api_url(repo)?,
            (None, None) => {
                return Err(Error::Config("no repository given".to_string()));
            }
        };

        Ok(Config {
            repo_url: self.repo_url,
            api_root,
            save_folder: self.save_folder.map(PathBuf::from).unwrap_or_default(),
            task_count: self.task_count.unwrap_or(0),
            output_file: PathBuf::from(
                self.output_file
                    .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
            ),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

impl TryFrom<Cli> for Config {
    type Error = Error;

    fn try_from(cli: Cli) -> Result<Self> {
        ConfigBuilder::from_cli(cli).build()
    }
}
