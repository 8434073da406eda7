//! `repohash` is a library and command-line tool for mirroring a remote
//! repository through its REST contents API and recording a SHA-256 digest for
//! every mirrored file.
//!
//! It serves operators who need a reproducible, verifiable local snapshot of a
//! remote code tree without speaking the native version-control protocol.
//!
//! As a library, it provides a staged pipeline:
//! 1.  **Resolve**: Walk the remote directory listings into a flat list of files.
//! 2.  **Partition**: Split that list into groups, one per download unit.
//! 3.  **Download**: Run all units concurrently over one shared HTTP client.
//! 4.  **Hash**: Stream every planned file through SHA-256, in resolve order.
//!
//! Each stage is usable on its own.
//!
//! # Example: Library Usage
//!
//! ```
//! use repohash::digest::compute_digests;
//! use repohash::partition::partition;
//! use repohash::FileDescriptor;
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // Pretend the download stage already wrote one of two planned files.
//! let temp_dir = tempdir().unwrap();
//! fs::write(temp_dir.path().join("2"), "some text").unwrap();
//! let files = vec![
//!     FileDescriptor::new("2", "https://host/raw/2"),
//!     FileDescriptor::new("folder1/3", "https://host/raw/folder1/3"),
//! ];
//! let placed: Vec<FileDescriptor> = files.iter().map(|f| f.with_root(temp_dir.path())).collect();
//!
//! assert_eq!(partition(&placed, 2).len(), 2);
//!
//! let digests = compute_digests(&placed);
//! assert_eq!(digests.len(), 2);
//! assert_eq!(digests.absent_count(), 1);
//! ```

// Make modules public if they contain public types used in the API
pub mod cancellation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core_types;
pub mod digest;
pub mod download;
pub mod errors;
pub mod hashing;
pub mod partition;
pub mod prelude;
pub mod progress;
pub mod remote;
pub mod signal;

// Re-export key public types for easier use as a library
pub use cancellation::CancellationToken;
pub use config::{Config, ConfigBuilder};
pub use core_types::FileDescriptor;
pub use digest::DigestMap;
pub use download::DownloadReport;

use crate::errors::{Error, Result};
use crate::progress::ProgressReporter;
use crate::remote::{build_http_client, resolve, ContentsClient};
use std::sync::Arc;

/// The result of a mirroring run.
#[derive(Debug, Clone)]
pub struct MirrorOutcome {
    /// Every planned file, with its destination path, in resolve order.
    pub files: Vec<FileDescriptor>,
    /// What the download stage managed to write.
    pub report: DownloadReport,
    /// Digest (or absence) for every planned file, in resolve order.
    pub digests: DigestMap,
}

/// Resolves, downloads and hashes the repository described by `config`.
///
/// Listing failures prune the affected subtree and download failures skip the
/// affected file; neither is an error here. Both show up as absent entries in
/// the returned digest map.
///
/// # Arguments
/// * `config` - The configuration for the run.
/// * `token` - Cancels the tree walk between listings and the download stage
///   between files.
/// * `progress` - Optional progress reporter for the download stage.
///
/// # Errors
/// Returns `Error::Http` if the HTTP client cannot be built and
/// `Error::Interrupted` if the token was cancelled before hashing started,
/// including during the tree walk.
pub async fn mirror(
    config: &Config,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<MirrorOutcome> {
    let client = ContentsClient::new(build_http_client(config.request_timeout)?);

    // Resolve the remote tree and place it under the destination root.
    let files: Vec<FileDescriptor> = resolve(&client, &config.api_root, token)
        .await
        .iter()
        .map(|file| file.with_root(&config.save_folder))
        .collect();
    if token.is_cancelled() {
        return Err(Error::Interrupted);
    }
    if files.is_empty() {
        log::warn!("No files found under {}", config.api_root);
    }

    // Download every group; returns once all units are done.
    let groups = partition::partition(&files, config.task_count);
    let report = download::download_groups(client.http(), groups, token, progress).await;
    if token.is_cancelled() {
        return Err(Error::Interrupted);
    }

    // Hash the full plan, not just what was downloaded.
    let digests = digest::compute_digests(&files);
    Ok(MirrorOutcome {
        files,
        report,
        digests,
    })
}

/// Executes the complete pipeline and writes the digest map to `config.output_file`.
///
/// This mirrors what the command-line tool does. Use [`mirror`] directly to
/// keep the digests in memory instead.
pub async fn run(
    config: &Config,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<MirrorOutcome> {
    let outcome = mirror(config, token, progress).await?;
    outcome.digests.write_json(&config.output_file)?;
    log::info!(
        "Hashed {} file(s) ({} absent) into {}",
        outcome.digests.len(),
        outcome.digests.absent_count(),
        config.output_file.display()
    );
    Ok(outcome)
}
