use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use gallery_api::{ApiConfig, ApiState, router};
use http_body_util::BodyExt;
use serde::Deserialize;
use tempfile::TempDir;
use tower::ServiceExt;

pub const GOOGLEBOT: &str =
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
pub const CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Builder for an app over temporary snapshot and public directories
pub struct TestStateBuilder {
    config: ApiConfig,
    snapshots: Vec<(String, String)>,
    public_files: Vec<(String, String)>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            config: ApiConfig {
                cursor_secret: "test_cursor_secret".to_string(),
                cursor_latency_ms: 0,
                total_users: 1_000,
                ..ApiConfig::default()
            },
            snapshots: Vec::new(),
            public_files: Vec::new(),
        }
    }

    pub fn total_users(mut self, total_users: u64) -> Self {
        self.config.total_users = total_users;
        self
    }

    pub fn cursor_latency_ms(mut self, latency_ms: u64) -> Self {
        self.config.cursor_latency_ms = latency_ms;
        self
    }

    pub fn public_url(mut self, url: &str) -> Self {
        self.config.public_url = Some(url.to_string());
        self
    }

    /// Add a file under the snapshot root
    pub fn snapshot(mut self, path: &str, body: &str) -> Self {
        self.snapshots.push((path.to_string(), body.to_string()));
        self
    }

    /// Add a file under the public directory
    pub fn public_file(mut self, path: &str, body: &str) -> Self {
        self.public_files.push((path.to_string(), body.to_string()));
        self
    }

    pub fn build(mut self) -> TestApp {
        let snapshot_dir = tempfile::tempdir().expect("Failed to create snapshot dir");
        let public_dir = tempfile::tempdir().expect("Failed to create public dir");

        write_files(snapshot_dir.path(), &self.snapshots);
        write_files(public_dir.path(), &self.public_files);

        self.config.snapshot_dir = snapshot_dir.path().to_path_buf();
        self.config.public_dir = public_dir.path().to_path_buf();

        let state = ApiState::new(&self.config);
        let client = TestClient::new(router::app(state.clone()));

        TestApp {
            state,
            client,
            _snapshot_dir: snapshot_dir,
            _public_dir: public_dir,
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_files(root: &Path, files: &[(String, String)]) {
    for (path, body) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(full, body).expect("Failed to write test file");
    }
}

/// Running app plus the temp directories it reads from
pub struct TestApp {
    pub state: ApiState,
    pub client: TestClient,
    _snapshot_dir: TempDir,
    _public_dir: TempDir,
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and collect the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.get_with_headers(uri, &[]).await
    }

    /// Send a POST request with an empty body
    pub async fn post(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.request(request).await
    }

    /// Send a GET request as the given user-agent
    pub async fn get_as(&self, uri: &str, user_agent: &str) -> TestResponse {
        self.get_with_headers(uri, &[("user-agent", user_agent)]).await
    }

    /// Send a GET request with extra headers
    pub async fn get_with_headers(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = builder.body(Body::empty()).expect("Failed to build request");
        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Header value as a string, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}
