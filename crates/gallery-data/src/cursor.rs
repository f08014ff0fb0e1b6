//! Signed opaque cursors for cursor-based pagination.
//!
//! A cursor is `base64(json) + "." + signature`, where the JSON payload is
//! `{"p": position, "l": limit, "s": search_term, "t": issued_at_ms}` and the
//! signature is the first 8 hex characters of `SHA-256(payload + secret)`.
//! The signature only guards against clients editing the payload; cursors are
//! stateless and never expire.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Hex characters kept from the payload digest
pub const SIGNATURE_LEN: usize = 8;

/// Decoded resume point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPosition {
    /// Zero-based offset into the dataset or into the match stream
    pub position: u64,
    /// Page size the cursor was minted with, 0 when the payload omits it
    pub limit: u64,
    /// Search term the cursor belongs to, empty for plain paging
    pub search_term: String,
}

#[derive(Deserialize)]
struct Payload {
    p: u64,
    #[serde(default)]
    l: u64,
    #[serde(default)]
    s: String,
    #[serde(default, rename = "t")]
    _issued_at: i64,
}

/// Encodes and verifies cursors with a server-side secret
#[derive(Clone)]
pub struct CursorCodec {
    secret: String,
    dataset_size: u64,
}

impl std::fmt::Debug for CursorCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorCodec")
            .field("secret", &"<redacted>")
            .field("dataset_size", &self.dataset_size)
            .finish()
    }
}

impl CursorCodec {
    /// Codec for a dataset of `dataset_size` rows
    pub fn new(secret: impl Into<String>, dataset_size: u64) -> Self {
        Self {
            secret: secret.into(),
            dataset_size,
        }
    }

    /// Mint a cursor pointing at `position`.
    ///
    /// The issue time is embedded, so two cursors for the same arguments may
    /// differ; both decode to the same position.
    pub fn encode(&self, position: u64, limit: u64, search_term: &str) -> String {
        let payload = serde_json::json!({
            "p": position,
            "l": limit,
            "s": search_term,
            "t": Utc::now().timestamp_millis(),
        });
        let encoded = STANDARD.encode(payload.to_string());
        let signature = self.sign(&encoded);

        format!("{encoded}.{signature}")
    }

    /// Verify and decode a cursor.
    ///
    /// Returns `None` for a missing cursor, a bad signature, a malformed
    /// payload, or a position outside the dataset. Callers treat `None` as
    /// "start from the beginning".
    pub fn decode(&self, cursor: Option<&str>) -> Option<CursorPosition> {
        let (encoded, signature) = cursor?.split_once('.')?;

        if self.sign(encoded) != signature {
            tracing::debug!("Rejected cursor with invalid signature");
            return None;
        }

        let json = STANDARD.decode(encoded).ok()?;
        let payload: Payload = serde_json::from_slice(&json).ok()?;

        if payload.p >= self.dataset_size {
            return None;
        }

        Some(CursorPosition {
            position: payload.p,
            limit: payload.l,
            search_term: payload.s,
        })
    }

    fn sign(&self, encoded: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(encoded.as_bytes());
        hasher.update(self.secret.as_bytes());

        let mut signature = hex::encode(hasher.finalize());
        signature.truncate(SIGNATURE_LEN);
        signature
    }
}
