use std::{
    ffi::OsString,
    io,
    path::{Component, Path, PathBuf},
    time::SystemTime,
};

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

const INDEX_FILE: &str = "index.html";

/// A snapshot file read from disk
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub path: PathBuf,
    pub body: Vec<u8>,
    pub modified: Option<SystemTime>,
}

impl IntoResponse for Snapshot {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, self.body).into_response();
        let headers = response.headers_mut();

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        if let Some(value) = self
            .modified
            .map(http_date)
            .and_then(|date| HeaderValue::from_str(&date).ok())
        {
            headers.insert(header::LAST_MODIFIED, value);
        }

        response
    }
}

fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Directory tree of pre-rendered HTML files
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the snapshot for a URL path relative to the snapshot root.
    ///
    /// `/`, empty paths and paths ending in `/` resolve to `index.html` in
    /// that directory. Other paths try the exact file, then `index.html`
    /// inside a directory of that name, then the name with `.html` appended.
    /// Paths escaping the root resolve to nothing.
    pub async fn load(&self, url_path: &str) -> io::Result<Option<Snapshot>> {
        let Some(relative) = sanitize(url_path) else {
            tracing::warn!(url_path, "Refused snapshot path outside the snapshot root");
            return Ok(None);
        };
        let base = self.root.join(&relative);

        let candidates = if url_path.ends_with('/') || relative.as_os_str().is_empty() {
            vec![base.join(INDEX_FILE)]
        } else {
            let mut with_extension = OsString::from(base.as_os_str());
            with_extension.push(".html");
            vec![base.clone(), base.join(INDEX_FILE), with_extension.into()]
        };

        for candidate in candidates {
            let Ok(metadata) = tokio::fs::metadata(&candidate).await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }

            let body = tokio::fs::read(&candidate).await?;
            return Ok(Some(Snapshot {
                path: candidate,
                body,
                modified: metadata.modified().ok(),
            }));
        }

        Ok(None)
    }
}

/// Turn a URL path into a relative filesystem path made of normal components only
fn sanitize(url_path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();

    for segment in url_path.split('/').filter(|s| !s.is_empty()) {
        if segment.contains('\\') {
            return None;
        }
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => relative.push(part),
            _ => return None,
        }
    }

    Some(relative)
}
