// src/remote/client.rs
//! Fetches and decodes directory listing pages from the contents API.

use crate::constants::USER_AGENT;
use crate::core_types::{DirectoryEntry, DirectoryPage};
use crate::errors::Result;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// A source of directory listing pages.
///
/// `None` means the page could not be obtained. The resolver treats that as an
/// empty directory and keeps walking.
pub trait ListingSource {
    /// Fetches the listing found at `url`.
    fn fetch_page(&self, url: &str) -> impl Future<Output = Option<DirectoryPage>>;
}

/// Builds the `reqwest` client shared by the tree walk and all download units.
///
/// `timeout` bounds every individual request.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, reqwest::header::HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .default_headers(headers)
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Contents API client: one unauthenticated GET per listing, no retries.
#[derive(Debug, Clone)]
pub struct ContentsClient {
    client: Client,
}

impl ContentsClient {
    /// Wraps an existing (shared) HTTP client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The underlying HTTP client, for reuse by the download stage.
    pub fn http(&self) -> &Client {
        &self.client
    }
}

impl ListingSource for ContentsClient {
    async fn fetch_page(&self, url: &str) -> Option<DirectoryPage> {
        log::debug!("Fetching directory contents from: {}", url);
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Listing request for '{}' failed: {}", url, e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            log::warn!(
                "Listing request for '{}' returned status {}",
                url,
                response.status()
            );
            return None;
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Could not read listing body from '{}': {}", url, e);
                return None;
            }
        };

        match decode_page(&body) {
            Ok(page) => Some(page),
            Err(e) => {
                log::warn!("Could not decode listing from '{}': {}", url, e);
                None
            }
        }
    }
}

/// Decodes a listing body.
///
/// The API returns an array for a directory, or a single object if the path
/// names a file.
fn decode_page(body: &[u8]) -> serde_json::Result<DirectoryPage> {
    let json_value: Value = serde_json::from_slice(body)?;
    if json_value.is_object() {
        let entry: DirectoryEntry = serde_json::from_value(json_value)?;
        Ok(vec![entry])
    } else {
        serde_json::from_value(json_value)
    }
}
