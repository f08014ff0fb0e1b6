//! Query parameters and response envelopes for the mock user API.

use gallery_data::User;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

/// Raw query string of both listing endpoints.
///
/// Values are kept as strings and parsed leniently: anything unparsable
/// falls back to the default instead of rejecting the request. A repeated
/// key keeps its first value.
#[derive(Debug, Default)]
pub struct UserListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub cursor: Option<String>,
}

impl UserListQuery {
    /// 1-based page number, at least 1
    pub fn page(&self) -> u64 {
        parse_number(self.page.as_deref()).map_or(1, |page| page.max(1) as u64)
    }

    /// Page size in `[1, MAX_LIMIT]`, `DEFAULT_LIMIT` when absent or not positive
    pub fn limit(&self) -> u64 {
        match parse_number(self.limit.as_deref()) {
            Some(limit) if limit > 0 => (limit as u64).min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        }
    }

    /// Trimmed search term, `None` when absent or blank
    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

impl FromIterator<(String, String)> for UserListQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                "search" => &mut query.search,
                "cursor" => &mut query.cursor,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok()
}

/// Response envelope shared by both pagination modes
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<M> {
    pub items: Vec<User>,
    pub meta: M,
}

/// Metadata of page-based responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

impl PageMeta {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = total.div_ceil(limit.max(1));
        let has_next = page < total_pages;
        let has_prev = page > 1;

        Self {
            page,
            limit,
            total_pages,
            total,
            has_next,
            has_prev,
            next_page: has_next.then_some(page + 1),
            prev_page: has_prev.then_some(page - 1),
        }
    }
}

/// Metadata of cursor-based responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorMeta {
    pub cursor: Option<String>,
    pub has_next: bool,
    pub total: u64,
}
