//! Defines core data structures used throughout the mirroring pipeline.
//!
//! `DirectoryEntry` is what the contents API hands back for one child of a
//! directory. `FileDescriptor` is what the tree walk produces for every remote
//! file and what the download and hashing stages consume.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The kind of a directory entry as reported by the contents API.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file with a `download_url`.
    File,
    /// A subdirectory with its own listing.
    Dir,
    /// Anything else the API may report (`symlink`, `submodule`, ...).
    #[serde(other)]
    Other,
}

/// One child of a directory listing.
///
/// # Examples
///
/// ```
/// use repohash::core_types::{DirectoryEntry, EntryKind};
///
/// let entry: DirectoryEntry = serde_json::from_str(
///     r#"{"name": "README.md", "type": "file", "download_url": "https://host/raw/README.md"}"#,
/// ).unwrap();
/// assert_eq!(entry.kind, EntryKind::File);
/// assert_eq!(entry.download_url.as_deref(), Some("https://host/raw/README.md"));
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// The entry's name within its parent directory.
    pub name: String,
    /// Whether the entry is a file, a directory, or something else.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Direct download link. Present for files, usually `null` for directories.
    #[serde(default)]
    pub download_url: Option<String>,
}

/// The decoded body of one listing request. Consumed by the resolver and dropped.
pub type DirectoryPage = Vec<DirectoryEntry>;

/// A remote file to mirror: where it goes and where it comes from.
///
/// Descriptors are produced once by the tree walk and never mutated. Prefixing
/// with a destination root yields a new descriptor.
///
/// # Examples
///
/// ```
/// use repohash::core_types::FileDescriptor;
/// use std::path::{Path, PathBuf};
///
/// let file = FileDescriptor::new(PathBuf::from("folder1").join("3"), "https://host/raw/folder1/3");
/// let placed = file.with_root(Path::new("mf"));
/// assert_eq!(placed.relative_path, Path::new("mf").join("folder1").join("3"));
/// assert_eq!(placed.download_url, file.download_url);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Position of the file relative to the walk root, or its final on-disk
    /// path once a destination root has been applied.
    pub relative_path: PathBuf,
    /// Absolute URL the file's bytes can be fetched from.
    pub download_url: String,
}

impl FileDescriptor {
    /// Creates a descriptor.
    pub fn new(relative_path: impl Into<PathBuf>, download_url: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            download_url: download_url.into(),
        }
    }

    /// Returns a copy of this descriptor with its path placed under `root`.
    ///
    /// An empty `root` leaves the path unchanged.
    pub fn with_root(&self, root: &Path) -> Self {
        let relative_path = if root.as_os_str().is_empty() {
            self.relative_path.clone()
        } else {
            root.join(&self.relative_path)
        };
        Self {
            relative_path,
            download_url: self.download_url.clone(),
        }
    }
}
