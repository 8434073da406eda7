// src/progress.rs

//! Progress reporting for the download stage.
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Receives download progress, abstracting over specific implementations like `indicatif`.
///
/// Positions count attempted files, successful or not, so the bar always
/// reaches its length when the download barrier is passed.
///
/// # Examples
///
/// ```
/// use repohash::progress::ProgressReporter;
/// use std::sync::Mutex;
///
/// // A reporter that just remembers where it is.
/// #[derive(Default)]
/// struct Recorder {
///     position: Mutex<(u64, u64)>,
/// }
/// impl ProgressReporter for Recorder {
///     fn set_length(&self, len: u64) {
///         self.position.lock().unwrap().1 = len;
///     }
///     fn set_position(&self, pos: u64) {
///         self.position.lock().unwrap().0 = pos;
///     }
///     fn set_message(&self, _msg: String) {}
///     fn finish_with_message(&self, _msg: String) {}
/// }
///
/// let reporter = Recorder::default();
/// reporter.set_length(4);
/// reporter.set_position(1);
/// assert_eq!(*reporter.position.lock().unwrap(), (1, 4));
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Sets the total number of files to download.
    fn set_length(&self, len: u64);
    /// Sets the number of files attempted so far.
    fn set_position(&self, pos: u64);
    /// Sets a descriptive message for the current phase.
    fn set_message(&self, msg: String);
    /// Finishes with a final message.
    fn finish_with_message(&self, msg: String);
}

/// A terminal progress bar backed by `indicatif`.
#[cfg(feature = "progress")]
#[derive(Clone)]
pub struct IndicatifProgress {
    bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgress {
    /// Creates a new, empty progress bar.
    pub fn new() -> Self {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar: pb }
    }
}

#[cfg(feature = "progress")]
impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgress {
    fn set_length(&self, len: u64) {
        self.bar.set_length(len);
    }

    fn set_position(&self, pos: u64) {
        self.bar.set_position(pos);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish_with_message(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}
