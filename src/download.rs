// src/download.rs
//! Concurrent download of partitioned file groups.
//!
//! Each group becomes one download unit. All units share the same HTTP client
//! and are polled together on the caller's task, so they interleave at network
//! boundaries without running in parallel. Within a unit, files are fetched
//! one after another. Destination paths are unique per file, so units never
//! touch each other's output and need no locking.

use crate::cancellation::CancellationToken;
use crate::core_types::FileDescriptor;
use crate::errors::{io_error_with_path, Result};
use crate::progress::ProgressReporter;
use bytes::Bytes;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

/// Outcome of a download run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Number of files written to disk.
    pub downloaded: usize,
    /// Destination paths that were not written, in unit order.
    pub failed: Vec<PathBuf>,
    /// Number of units stopped early by a filesystem error.
    pub aborted_units: usize,
    /// Number of files never attempted because the run was cancelled.
    pub cancelled: usize,
}

impl DownloadReport {
    fn absorb(&mut self, unit: UnitOutcome) {
        self.downloaded += unit.downloaded;
        self.failed.extend(unit.failed);
        self.cancelled += unit.cancelled;
        if unit.aborted {
            self.aborted_units += 1;
        }
    }
}

#[derive(Debug, Default)]
struct UnitOutcome {
    downloaded: usize,
    failed: Vec<PathBuf>,
    cancelled: usize,
    aborted: bool,
}

/// Why a single file could not be fetched.
#[derive(Error, Debug)]
enum FetchFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(StatusCode),
}

/// Shared progress bookkeeping for all units.
struct Tracker {
    reporter: Option<Arc<dyn ProgressReporter>>,
    attempted: AtomicU64,
}

impl Tracker {
    fn tick(&self) {
        let done = self.attempted.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(reporter) = &self.reporter {
            reporter.set_position(done);
        }
    }
}

/// Downloads every group, one unit per group, and waits for all of them.
///
/// Download failures are logged and reported, never returned as errors: a
/// non-success status or transport error skips that file, and a filesystem
/// error stops only the unit it happened in. Sibling units always run to
/// completion.
///
/// # Arguments
/// * `client` - HTTP client shared by all units.
/// * `groups` - Output of [`crate::partition::partition`]. Paths must already
///   include the destination root.
/// * `token` - Checked before each file; once cancelled, no new downloads start.
/// * `progress` - Optional reporter, advanced after every attempted file.
pub async fn download_groups(
    client: &Client,
    groups: Vec<Vec<FileDescriptor>>,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> DownloadReport {
    let total: usize = groups.iter().map(Vec::len).sum();
    if let Some(reporter) = &progress {
        reporter.set_length(total as u64);
        reporter.set_message("Downloading files...".to_string());
    }
    let tracker = Tracker {
        reporter: progress,
        attempted: AtomicU64::new(0),
    };

    log::info!("Downloading {} file(s) in {} unit(s)", total, groups.len());
    let units = groups.into_iter().enumerate().map(|(index, group)| {
        let span = tracing::info_span!("download_unit", unit = index, files = group.len());
        download_unit(client, group, token, &tracker).instrument(span)
    });
    let outcomes = join_all(units).await;

    let mut report = DownloadReport::default();
    for outcome in outcomes {
        report.absorb(outcome);
    }

    if let Some(reporter) = &tracker.reporter {
        reporter.finish_with_message(format!("Downloaded {} of {} files", report.downloaded, total));
    }
    log::info!(
        "Download finished: {} written, {} failed, {} unit(s) aborted",
        report.downloaded,
        report.failed.len(),
        report.aborted_units
    );
    report
}

/// Downloads one group's files in order.
async fn download_unit(
    client: &Client,
    group: Vec<FileDescriptor>,
    token: &CancellationToken,
    tracker: &Tracker,
) -> UnitOutcome {
    let mut outcome = UnitOutcome::default();
    let mut pending = group.into_iter();

    while let Some(file) = pending.next() {
        if token.is_cancelled() {
            outcome.cancelled = 1 + pending.len();
            log::debug!("Cancelled with {} file(s) left in unit", outcome.cancelled);
            break;
        }

        let path = file.relative_path;
        match fetch_file(client, &file.download_url).await {
            Ok(content) => {
                if let Err(e) = write_file(&path, &content).await {
                    log::error!("Aborting download unit: {}", e);
                    outcome.aborted = true;
                    outcome.failed.push(path);
                    tracker.tick();
                    for untried in pending.by_ref() {
                        outcome.failed.push(untried.relative_path);
                        tracker.tick();
                    }
                    break;
                }
                log::info!("{} downloaded", path.display());
                outcome.downloaded += 1;
            }
            Err(e) => {
                log::error!("{} was not downloaded: {}", path.display(), e);
                outcome.failed.push(path);
            }
        }
        tracker.tick();
    }

    outcome
}

/// GETs `url` and returns the body if the server answered `200 OK`.
async fn fetch_file(client: &Client, url: &str) -> std::result::Result<Bytes, FetchFailure> {
    log::debug!("Downloading file from: {}", url);
    let response = client.get(url).send().await?;
    if response.status() != StatusCode::OK {
        return Err(FetchFailure::Status(response.status()));
    }
    Ok(response.bytes().await?)
}

/// Writes `content` to `path`, creating missing parent directories first.
async fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error_with_path(e, parent))?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| io_error_with_path(e, path))
}
