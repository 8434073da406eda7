//! Defines the core `Config` struct for a mirroring run.
//!
//! This module consolidates all the settings parsed and validated from the CLI,
//! making them available to the pipeline in a structured and type-safe manner.

use std::path::PathBuf;
use std::time::Duration;

pub use builder::ConfigBuilder;
mod builder;
mod validation;

/// Configuration for one mirroring run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The repository reference as given by the user, if the API root was derived from one.
    pub repo_url: Option<String>,
    /// Contents API listing URL the tree walk starts from.
    pub api_root: String,
    /// Destination root prepended to every resolved path. Empty means the current directory.
    pub save_folder: PathBuf,
    /// Number of download units. `0` means one unit per file.
    pub task_count: usize,
    /// Where the digest map is written.
    pub output_file: PathBuf,
    /// Timeout applied to each listing fetch and file download.
    pub request_timeout: Duration,
}
