use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::get,
};
use gallery_data::{User, UserDirectory};

use super::pagination::{CursorMeta, Page, PageMeta, UserListQuery};
use crate::{ApiState, error::ApiError, metrics, middleware::no_store};

/// Create the mock user API routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/cursor", get(list_users_by_cursor))
        .route("/api/users/{id}", get(get_user))
        .method_not_allowed_fallback(endpoint_not_found)
        .layer(middleware::from_fn(no_store))
}

/// Page-based listing: `?page&limit&search`
async fn list_users(
    State(state): State<ApiState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<PageMeta>>, ApiError> {
    let query: UserListQuery = pairs.into_iter().collect();
    let page = query.page();
    let limit = query.limit();
    let start_index = (page - 1).saturating_mul(limit);

    let (items, total) = fetch_users(&state.directory, query.search(), start_index, limit).await?;

    Ok(Json(Page {
        items,
        meta: PageMeta::new(page, limit, total),
    }))
}

/// Cursor-based listing: `?cursor&limit&search`.
///
/// A cursor that fails verification or belongs to another search term is
/// ignored and the listing restarts from the first row.
async fn list_users_by_cursor(
    State(state): State<ApiState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<CursorMeta>>, ApiError> {
    let query: UserListQuery = pairs.into_iter().collect();
    let limit = query.limit();
    let search = query.search().unwrap_or_default();

    let start_index = state
        .cursors
        .decode(query.cursor.as_deref())
        .filter(|cursor| cursor.search_term == search)
        .map_or(0, |cursor| cursor.position);

    // Simulated network latency for client loading states
    if !state.cursor_latency.is_zero() {
        tokio::time::sleep(state.cursor_latency).await;
    }

    let term = (!search.is_empty()).then_some(search);
    let (items, total) = fetch_users(&state.directory, term, start_index, limit).await?;

    let next_index = start_index + items.len() as u64;
    let has_next = next_index < total;
    let cursor = has_next.then(|| state.cursors.encode(next_index, limit, search));

    Ok(Json(Page {
        items,
        meta: CursorMeta {
            cursor,
            has_next,
            total,
        },
    }))
}

/// Single user lookup, 404 for anything but an ID inside the dataset
async fn get_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = id
        .parse::<u64>()
        .ok()
        .and_then(|id| state.directory.user(id))
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(user))
}

/// Known API path, unsupported method
async fn endpoint_not_found() -> ApiError {
    ApiError::EndpointNotFound
}

/// One page of users and the total they are drawn from.
///
/// Searches scan the synthetic dataset on the blocking pool; plain paging
/// synthesizes only the requested rows.
async fn fetch_users(
    directory: &UserDirectory,
    search: Option<&str>,
    start_index: u64,
    limit: u64,
) -> Result<(Vec<User>, u64), ApiError> {
    let Some(term) = search else {
        return Ok((directory.batch(start_index, limit), directory.total_users()));
    };

    let directory = directory.clone();
    let term = term.to_owned();
    let page = tokio::task::spawn_blocking(move || {
        directory.search(&term, start_index, limit as usize)
    })
    .await?;

    metrics::record_search(page.exact);
    Ok((page.users, page.total_matches))
}
