//! Walks the remote tree into a flat list of files.

use super::client::ListingSource;
use super::url::child_url;
use crate::cancellation::CancellationToken;
use crate::core_types::{DirectoryEntry, EntryKind, FileDescriptor};
use std::path::PathBuf;
use std::vec::IntoIter;

/// A directory whose listing is being consumed.
struct Frame {
    url: String,
    relative_path: PathBuf,
    entries: IntoIter<DirectoryEntry>,
}

/// Resolves the remote tree under `root_url` into file descriptors.
///
/// The walk is depth-first in encounter order: a subdirectory is fully walked
/// as soon as its entry is reached, before the remaining entries of its parent.
/// Listings are fetched one at a time. A listing that cannot be fetched
/// contributes no files and the walk carries on with the rest of the tree.
///
/// `token` is checked before every listing request. Once it is cancelled the
/// walk stops and returns the files found so far.
///
/// Paths in the result are relative to the walk root.
pub async fn resolve<S: ListingSource>(
    source: &S,
    root_url: &str,
    token: &CancellationToken,
) -> Vec<FileDescriptor> {
    let mut files = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    if token.is_cancelled() {
        log::debug!("Walk cancelled before fetching '{}'", root_url);
        return files;
    }
    match source.fetch_page(root_url).await {
        Some(page) => stack.push(Frame {
            url: root_url.to_string(),
            relative_path: PathBuf::new(),
            entries: page.into_iter(),
        }),
        None => log::warn!("Pruning tree at '{}': listing unavailable", root_url),
    }

    while let Some(frame) = stack.last_mut() {
        let Some(entry) = frame.entries.next() else {
            stack.pop();
            continue;
        };
        let entry_path = frame.relative_path.join(&entry.name);

        match entry.kind {
            EntryKind::File => match entry.download_url {
                Some(download_url) => files.push(FileDescriptor::new(entry_path, download_url)),
                None => log::warn!(
                    "Skipping file with no download_url: {}",
                    entry_path.display()
                ),
            },
            EntryKind::Dir => {
                if token.is_cancelled() {
                    log::debug!("Walk cancelled with {} file(s) resolved", files.len());
                    break;
                }
                let url = child_url(&frame.url, &entry.name);
                match source.fetch_page(&url).await {
                    Some(page) => stack.push(Frame {
                        url,
                        relative_path: entry_path,
                        entries: page.into_iter(),
                    }),
                    None => log::warn!(
                        "Pruning subtree '{}': listing unavailable",
                        entry_path.display()
                    ),
                }
            }
            EntryKind::Other => {
                log::debug!("Ignoring non-file entry: {}", entry_path.display());
            }
        }
    }

    log::info!("Resolved {} file(s) under {}", files.len(), root_url);
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::DirectoryPage;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory listing source that records every URL it was asked for.
    #[derive(Default)]
    struct FakeListing {
        pages: HashMap<String, DirectoryPage>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeListing {
        fn with_page(mut self, url: &str, entries: Vec<DirectoryEntry>) -> Self {
            self.pages.insert(url.to_string(), entries);
            self
        }
    }

    impl ListingSource for FakeListing {
        async fn fetch_page(&self, url: &str) -> Option<DirectoryPage> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned()
        }
    }

    fn file(name: &str, url: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            kind: EntryKind::File,
            download_url: Some(url.to_string()),
        }
    }

    fn dir(name: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            kind: EntryKind::Dir,
            download_url: None,
        }
    }

    #[tokio::test]
    async fn test_resolve_single_file() {
        let source = FakeListing::default().with_page("mock.com", vec![file("1", "url")]);
        let files = resolve(&source, "mock.com", &CancellationToken::new()).await;
        assert_eq!(files, vec![FileDescriptor::new("1", "url")]);
        assert_eq!(*source.requested.borrow(), vec!["mock.com".to_string()]);
    }

    #[tokio::test]
    async fn test_resolve_flattens_nested_directory() {
        let source = FakeListing::default()
            .with_page("mock.com", vec![file("2", "url2"), dir("folder1")])
            .with_page("mock.com/folder1", vec![file("3", "url3")]);

        let files = resolve(&source, "mock.com", &CancellationToken::new()).await;

        assert_eq!(
            files,
            vec![
                FileDescriptor::new("2", "url2"),
                FileDescriptor::new(PathBuf::from("folder1").join("3"), "url3"),
            ]
        );
        assert_eq!(
            *source.requested.borrow(),
            vec!["mock.com".to_string(), "mock.com/folder1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_resolve_walks_directories_in_encounter_order() {
        let source = FakeListing::default()
            .with_page("r", vec![dir("a"), file("top", "u-top"), dir("b")])
            .with_page("r/a", vec![dir("deep"), file("a1", "u-a1")])
            .with_page("r/a/deep", vec![file("d1", "u-d1")])
            .with_page("r/b", vec![file("b1", "u-b1")]);

        let paths: Vec<PathBuf> = resolve(&source, "r", &CancellationToken::new())
            .await
            .into_iter()
            .map(|f| f.relative_path)
            .collect();

        assert_eq!(
            paths,
            vec![
                PathBuf::from("a").join("deep").join("d1"),
                PathBuf::from("a").join("a1"),
                PathBuf::from("top"),
                PathBuf::from("b").join("b1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_resolve_prunes_failed_subtree() {
        // "broken" has no page, so its listing fetch fails.
        let source = FakeListing::default()
            .with_page("r", vec![dir("broken"), file("kept", "u-kept")])
            .with_page("r/ok", vec![file("never", "u-never")]);

        let files = resolve(&source, "r", &CancellationToken::new()).await;

        assert_eq!(files, vec![FileDescriptor::new("kept", "u-kept")]);
        assert!(source.requested.borrow().contains(&"r/broken".to_string()));
    }

    #[tokio::test]
    async fn test_resolve_failed_root_yields_nothing() {
        let source = FakeListing::default();
        assert!(resolve(&source, "r", &CancellationToken::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_skips_entries_without_download_url_and_other_kinds() {
        let source = FakeListing::default().with_page(
            "r",
            vec![
                DirectoryEntry {
                    name: "no-url".to_string(),
                    kind: EntryKind::File,
                    download_url: None,
                },
                DirectoryEntry {
                    name: "link".to_string(),
                    kind: EntryKind::Other,
                    download_url: Some("u-link".to_string()),
                },
                file("real", "u-real"),
            ],
        );

        let files = resolve(&source, "r", &CancellationToken::new()).await;
        assert_eq!(files, vec![FileDescriptor::new("real", "u-real")]);
    }

    #[tokio::test]
    async fn test_resolve_cancelled_before_start_fetches_nothing() {
        let source = FakeListing::default().with_page("r", vec![file("f", "u-f")]);
        let token = CancellationToken::new();
        token.cancel();

        assert!(resolve(&source, "r", &token).await.is_empty());
        assert!(source.requested.borrow().is_empty());
    }

    /// Cancels the token as soon as a given URL is requested.
    struct CancelOnFetch {
        inner: FakeListing,
        trigger: String,
        token: CancellationToken,
    }

    impl ListingSource for CancelOnFetch {
        async fn fetch_page(&self, url: &str) -> Option<DirectoryPage> {
            if url == self.trigger {
                self.token.cancel();
            }
            self.inner.fetch_page(url).await
        }
    }

    #[tokio::test]
    async fn test_resolve_stops_descending_once_cancelled() {
        let token = CancellationToken::new();
        let source = CancelOnFetch {
            inner: FakeListing::default()
                .with_page("r", vec![dir("a"), dir("b")])
                .with_page("r/a", vec![file("a1", "u-a1"), dir("deep")])
                .with_page("r/a/deep", vec![file("d1", "u-d1")])
                .with_page("r/b", vec![file("b1", "u-b1")]),
            trigger: "r/a".to_string(),
            token: token.clone(),
        };

        let files = resolve(&source, "r", &token).await;

        assert_eq!(files, vec![FileDescriptor::new(PathBuf::from("a").join("a1"), "u-a1")]);
        assert_eq!(
            *source.inner.requested.borrow(),
            vec!["r".to_string(), "r/a".to_string()]
        );
    }
}
