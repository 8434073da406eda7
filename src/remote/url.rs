//! Handles turning repository references into contents API URLs.

use crate::constants::{API_REPOS_PREFIX, CONTENTS_SEGMENT};
use crate::errors::{Error, Result};
use url::Url;

fn invalid(input: &str, reason: impl Into<String>) -> Error {
    Error::InvalidRepoUrl {
        input: input.to_string(),
        reason: reason.into(),
    }
}

/// Builds the contents API root URL for a repository reference.
///
/// Accepts full `https://` / `http://` URLs as well as bare `host/owner/repo`
/// references, which are assumed to be served over HTTPS. A trailing `.git`
/// on the repository name is dropped.
///
/// # Errors
/// Returns `Error::InvalidRepoUrl` if the reference has no host, no path, or
/// uses a scheme other than HTTP(S).
///
/// # Examples
/// ```
/// use repohash::remote::contents_api_url;
///
/// assert_eq!(
///     contents_api_url("https://gitea.radium.group/radium/monitoring").unwrap(),
///     "https://gitea.radium.group/api/v1/repos/radium/monitoring/contents"
/// );
/// assert_eq!(
///     contents_api_url("gitea.radium.group/radium/userhash.git").unwrap(),
///     "https://gitea.radium.group/api/v1/repos/radium/userhash/contents"
/// );
/// assert!(contents_api_url("https://gitea.radium.group").is_err());
/// ```
pub fn contents_api_url(repo: &str) -> Result<String> {
    let trimmed = repo.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let mut parsed = Url::parse(&with_scheme).map_err(|e| invalid(repo, e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(
            repo,
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid(repo, "missing host"));
    }

    let mut segments: Vec<String> = parsed
        .path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default();
    if let Some(last) = segments.last_mut() {
        if let Some(stripped) = last.strip_suffix(".git") {
            *last = stripped.to_string();
        }
    }
    segments.retain(|s| !s.is_empty());
    if segments.is_empty() {
        return Err(invalid(repo, "missing repository path"));
    }

    parsed.set_query(None);
    parsed.set_fragment(None);
    parsed.set_path(&format!(
        "{}/{}/{}",
        API_REPOS_PREFIX,
        segments.join("/"),
        CONTENTS_SEGMENT
    ));
    log::debug!("Contents API root for '{}': {}", repo, parsed);
    Ok(parsed.to_string())
}

/// Returns the listing URL of the child directory `name` under `parent`.
pub fn child_url(parent: &str, name: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), name)
}
