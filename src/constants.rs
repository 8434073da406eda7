// src/constants.rs

use std::time::Duration;

/// Per-request timeout applied to listing fetches and file downloads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(200);

/// Size of each read when streaming a file through the hasher.
pub const HASH_BLOCK_SIZE: usize = 4096;

/// Where the digest map is written when no `--output` is given.
pub const DEFAULT_OUTPUT_FILE: &str = "hashes.json";

/// Path inserted between the host and the repository in contents API URLs.
pub const API_REPOS_PREFIX: &str = "api/v1/repos";

/// Final path segment of a repository's contents listing.
pub const CONTENTS_SEGMENT: &str = "contents";

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("repohash/", env!("CARGO_PKG_VERSION"));
