// tests/common.rs

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::process::Command;
use std::sync::{Arc, Mutex};

// Helper function to get the binary command
#[allow(dead_code)] // This is used by the CLI tests, but not all.
pub fn repohash_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("repohash"))
}

/// Path of the repository listing served by [`MockRepo`].
#[allow(dead_code)]
pub const ROOT_PATH: &str = "/api/v1/repos/owner/repo/contents";

#[derive(Clone)]
struct ServerState {
    routes: Arc<HashMap<String, (StatusCode, Vec<u8>)>>,
    hits: Arc<Mutex<Vec<String>>>,
}

/// A throwaway HTTP server standing in for a contents API and its raw file endpoints.
///
/// It runs on its own thread and runtime so it works from both sync and async tests.
#[allow(dead_code)]
pub struct MockRepo {
    /// `http://127.0.0.1:<port>`
    pub base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockRepo {
    /// Starts the server. `routes` receives the base URL (so listings can point
    /// `download_url`s back at this server) and returns `(path, status, body)` triples.
    /// Unknown paths answer 404.
    pub fn start(routes: impl FnOnce(&str) -> Vec<(String, StatusCode, Vec<u8>)>) -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let table: HashMap<String, (StatusCode, Vec<u8>)> = routes(&base)
            .into_iter()
            .map(|(path, status, body)| (path, (status, body)))
            .collect();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            routes: Arc::new(table),
            hits: hits.clone(),
        };

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                let app = Router::new().fallback(serve_fixture).with_state(state);
                axum::serve(listener, app).await.unwrap();
            });
        });

        Self { base, hits }
    }

    /// URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Listing URL of the repository root.
    pub fn root_url(&self) -> String {
        self.url(ROOT_PATH)
    }

    /// Every request path seen so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

async fn serve_fixture(State(state): State<ServerState>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    state.hits.lock().unwrap().push(path.clone());
    match state.routes.get(&path) {
        Some((status, body)) => (*status, body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A URL on a local port nothing listens on, so connecting is refused.
#[allow(dead_code)]
pub fn refused_url(path: &str) -> String {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    format!("http://127.0.0.1:{}{}", port, path)
}

/// A `200 OK` JSON listing route.
#[allow(dead_code)]
pub fn listing(path: &str, entries: Value) -> (String, StatusCode, Vec<u8>) {
    (
        path.to_string(),
        StatusCode::OK,
        serde_json::to_vec(&entries).unwrap(),
    )
}

/// A raw file route.
#[allow(dead_code)]
pub fn raw(path: &str, status: StatusCode, body: &[u8]) -> (String, StatusCode, Vec<u8>) {
    (path.to_string(), status, body.to_vec())
}

/// A `file` entry whose `download_url` points at `path` on `base`.
#[allow(dead_code)]
pub fn file_entry(base: &str, name: &str, path: &str) -> Value {
    serde_json::json!({
        "name": name,
        "type": "file",
        "download_url": format!("{}{}", base, path),
    })
}

/// A `dir` entry.
#[allow(dead_code)]
pub fn dir_entry(name: &str) -> Value {
    serde_json::json!({ "name": name, "type": "dir", "download_url": null })
}

/// SHA-256 of the 9 bytes `some text`.
#[allow(dead_code)]
pub const SOME_TEXT_SHA256: &str =
    "b94f6f125c79e3a5ffaa826f584c10d52ada669e6762051b826b55776d05aed2";

/// SHA-256 of the empty byte string.
#[allow(dead_code)]
pub const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
