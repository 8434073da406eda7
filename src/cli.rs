// src/cli.rs

use clap::Parser;

/// Mirror a remote repository through its REST contents API and hash every file.
///
/// repohash walks the repository's directory listings, downloads every file
/// into a local folder using concurrent download tasks, then writes a JSON map
/// from each file's local path to its SHA-256 digest (or null if the file could
/// not be downloaded).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository URL (e.g. https://gitea.example.com/owner/repo or host/owner/repo.git).
    #[arg(value_name = "REPO", required_unless_present = "api_url")]
    pub repo: Option<String>,

    /// Start the walk at this contents API listing URL instead of deriving it from REPO.
    /// Useful for mirroring a single subdirectory.
    #[arg(long, value_name = "URL", conflicts_with = "repo")]
    pub api_url: Option<String>,

    // --- Destination ---
    /// Folder to save the mirrored files into. Defaults to the current directory.
    #[arg(short = 'f', long = "folder", value_name = "DIR")]
    pub save_folder: Option<String>,

    /// File to write the path-to-digest JSON map to.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_file: Option<String>,

    // --- Execution Control ---
    /// Number of concurrent download tasks. 0 starts one task per file.
    #[arg(short = 't', long = "tasks", value_name = "N", default_value_t = 0)]
    pub task_count: usize,

    /// Timeout in seconds for each listing or download request.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}
