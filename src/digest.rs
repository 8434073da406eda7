//! The path → digest result of a run, and its JSON persistence.

use crate::core_types::FileDescriptor;
use crate::errors::{io_error_with_path, Result};
use crate::hashing::hash_file;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Ordered mapping from destination path to hex digest, or `None` when the
/// file could not be hashed.
///
/// Entries keep insertion order, which is the order the tree walk produced.
/// Serializes as a flat JSON object with `null` for absent digests.
///
/// # Examples
/// ```
/// use repohash::digest::DigestMap;
///
/// let mut digests = DigestMap::new();
/// digests.insert("mf/2", Some("abc".to_string()));
/// digests.insert("mf/missing", None);
/// assert_eq!(
///     serde_json::to_string(&digests).unwrap(),
///     r#"{"mf/2":"abc","mf/missing":null}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestMap {
    entries: Vec<(String, Option<String>)>,
    // Path -> position in `entries`.
    index: HashMap<String, usize>,
}

impl DigestMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the digest for `path`, replacing any earlier value in place.
    pub fn insert(&mut self, path: impl Into<String>, digest: Option<String>) {
        let path = path.into();
        match self.index.get(&path) {
            Some(&position) => self.entries[position].1 = digest,
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, digest));
            }
        }
    }

    /// Looks up `path`. The outer `Option` is whether the path is known, the
    /// inner one whether it has a digest.
    pub fn get(&self, path: &str) -> Option<Option<&str>> {
        self.index
            .get(path)
            .map(|&position| self.entries[position].1.as_deref())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries without a digest.
    pub fn absent_count(&self) -> usize {
        self.entries.iter().filter(|(_, d)| d.is_none()).count()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, digest)| (key.as_str(), digest.as_deref()))
    }

    /// Writes the map as JSON to `path`, creating parent directories as needed.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error_with_path(e, parent))?;
        }
        let file = File::create(path).map_err(|e| io_error_with_path(e, path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush().map_err(|e| io_error_with_path(e, path))?;
        log::debug!("Wrote {} digest(s) to {}", self.len(), path.display());
        Ok(())
    }
}

impl Serialize for DigestMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, digest) in &self.entries {
            map.serialize_entry(key, digest)?;
        }
        map.end()
    }
}

/// Hashes every planned file, in order, into a `DigestMap`.
///
/// Runs after all downloads have finished. Files that were never written map
/// to `None`, as do files that exist but cannot be read.
pub fn compute_digests(files: &[FileDescriptor]) -> DigestMap {
    let mut digests = DigestMap::new();
    for file in files {
        let digest = match hash_file(&file.relative_path) {
            Ok(digest) => digest,
            Err(e) => {
                log::warn!("Could not hash '{}': {}", file.relative_path.display(), e);
                None
            }
        };
        if digest.is_none() {
            log::debug!("No digest for '{}'", file.relative_path.display());
        }
        digests.insert(file.relative_path.to_string_lossy(), digest);
    }
    digests
}
