//! HTTP API over the catalog
//!
//! Thin glue: routes, JSON shapes, and an embedded browser page. All real
//! work happens in the store and the scan engine.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use crate::config::ScanConfig;
use crate::db::CatalogStore;
use crate::error::CatalogError;
use crate::models::{CatalogStats, MediaKind, MediaRecord};
use crate::scanner;

static INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared handler state: one explicitly constructed store handle
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<CatalogStore>>,
}

impl AppState {
    /// Wrap a store for sharing across handlers
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// Query parameters for `GET /api/media`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Optional kind filter (`video` or `image`)
    pub kind: Option<MediaKind>,
}

/// Request body for `POST /api/scan`
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Directory (or file) to scan
    pub path: String,
}

/// Response body for `POST /api/scan`
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub added: u64,
    pub message: String,
}

/// Error response: status code plus plain-text message
#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

fn lock_poisoned() -> CatalogError {
    CatalogError::database("catalog store lock poisoned")
}

/// `GET /` - embedded browser page
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /api/media?kind=video|image`
async fn list_media(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<MediaRecord>>, ApiError> {
    let store = state.store.lock().map_err(|_| lock_poisoned())?;
    let records = store.list_all(query.kind)?;
    Ok(Json(records))
}

/// `GET /api/stats`
async fn stats(State(state): State<AppState>) -> Result<Json<CatalogStats>, ApiError> {
    let store = state.store.lock().map_err(|_| lock_poisoned())?;
    let stats = store.count_by_kind()?;
    Ok(Json(stats))
}

/// `POST /api/scan` with body `{"path": "..."}`
///
/// Runs the synchronous scan on a blocking task. The store mutex serializes
/// concurrent scan requests; the engine itself does not guard against them.
async fn trigger_scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    if req.path.trim().is_empty() {
        return Err(ApiError(
            StatusCode::BAD_REQUEST,
            "path is required".to_string(),
        ));
    }

    let store = state.store.clone();
    let config = ScanConfig::new(req.path);
    let report = tokio::task::spawn_blocking(move || {
        let mut store = store.lock().map_err(|_| lock_poisoned())?;
        scanner::scan(&mut store, &config)
    })
    .await
    .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))??;

    Ok(Json(ScanResponse {
        success: true,
        added: report.added,
        message: format!("scanned and added {} new items", report.added),
    }))
}

/// Build the application router around a shared state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/media", get(list_media))
        .route("/api/scan", post(trigger_scan))
        .route("/api/stats", get(stats))
        .with_state(state)
}

/// Bind and serve the API until the process is stopped
pub async fn serve(addr: SocketAddr, store: CatalogStore) -> Result<(), CatalogError> {
    let state = AppState::new(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("listening on http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewMediaRecord;
    use std::fs;
    use tempfile::TempDir;

    fn seeded_state() -> AppState {
        let mut store = CatalogStore::open_memory().unwrap();
        store
            .insert(&NewMediaRecord::new(
                "/media/a.mp4",
                "a.mp4",
                10,
                MediaKind::Video,
            ))
            .unwrap();
        store
            .insert(&NewMediaRecord::new(
                "/media/b.jpg",
                "b.jpg",
                20,
                MediaKind::Image,
            ))
            .unwrap();
        AppState::new(store)
    }

    #[tokio::test]
    async fn test_list_media_with_filter() {
        let state = seeded_state();

        let Json(all) = list_media(State(state.clone()), Query(ListQuery::default()))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let query = ListQuery {
            kind: Some(MediaKind::Video),
        };
        let Json(videos) = list_media(State(state), Query(query)).await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].filename, "a.mp4");
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let state = seeded_state();
        let Json(stats) = stats(State(state)).await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.video, 1);
        assert_eq!(stats.image, 1);
    }

    #[tokio::test]
    async fn test_scan_endpoint_rejects_empty_path() {
        let state = AppState::new(CatalogStore::open_memory().unwrap());
        let req = ScanRequest {
            path: "  ".to_string(),
        };
        let err = trigger_scan(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_scan_endpoint_indexes_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("clip.mp4"), b"0123456789").unwrap();
        fs::write(dir.path().join("notes.txt"), b"hello").unwrap();

        let state = AppState::new(CatalogStore::open_memory().unwrap());
        let req = ScanRequest {
            path: dir.path().to_string_lossy().to_string(),
        };
        let Json(resp) = trigger_scan(State(state.clone()), Json(req)).await.unwrap();
        assert!(resp.success);
        assert_eq!(resp.added, 1);

        let Json(stats) = stats(State(state)).await.unwrap();
        assert_eq!(stats.total, 1);
    }
}
