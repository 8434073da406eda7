//! The `repohash` prelude for convenient library usage.
//!
//! This module re-exports the most commonly used types and functions from the
//! `repohash` library.
//!
//! # Example
//!
//! ```
//! use repohash::prelude::*;
//!
//! let groups = partition(&[FileDescriptor::new("a", "https://host/raw/a")], 0);
//! assert_eq!(groups.len(), 1);
//!
//! let config = ConfigBuilder::new()
//!     .repo_url("gitea.example.com/owner/repo")
//!     .build()
//!     .unwrap();
//! let _token = CancellationToken::new();
//! assert!(config.api_root.ends_with("/contents"));
//! ```

pub use crate::cancellation::CancellationToken;
pub use crate::config::{Config, ConfigBuilder};
pub use crate::core_types::{DirectoryEntry, DirectoryPage, EntryKind, FileDescriptor};
pub use crate::digest::{compute_digests, DigestMap};
pub use crate::download::{download_groups, DownloadReport};
pub use crate::errors::{Error, Result};
pub use crate::hashing::hash_file;
pub use crate::partition::partition;
pub use crate::remote::{build_http_client, contents_api_url, resolve, ContentsClient, ListingSource};
pub use crate::{mirror, run, MirrorOutcome};
