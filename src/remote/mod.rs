// src/remote/mod.rs
//! Talks to the remote repository's REST contents API.
//!
//! This module provides functionality to:
//! - Build the contents API root URL from a repository reference.
//! - Fetch and decode one directory listing page (`ContentsClient`).
//! - Walk the remote tree into a flat list of `FileDescriptor`s (`resolve`).

// Declare the sub-modules.
mod client;
mod resolver;
mod url;

// Re-export the public-facing API.
pub use client::{build_http_client, ContentsClient, ListingSource};
pub use resolver::resolve;
pub use url::{child_url, contents_api_url};
