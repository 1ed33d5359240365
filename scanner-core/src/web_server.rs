use crate::channel::Band;
use crate::scanner::WifiScanner;
use crate::sort::{sort_records, SortColumn, SortDirection, SortSpec};
use crate::ssid::Ssid;
use crate::structs::{ScanSnapshot, SignalQuality};
use crate::traits::UiAssetProvider;
use axum::body::Body;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

// The shared state for the web server.
// The scanner owns the current snapshot; handlers only read or refresh it.
pub type WebServerState = State<Arc<AppState>>;

pub struct AppState {
    pub scanner: Arc<WifiScanner>,
    pub frontend: Arc<dyn UiAssetProvider>,
    /// 导出 CSV 的目录
    pub export_dir: PathBuf,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/networks", get(api_list_networks))
        .route("/api/refresh", post(api_refresh))
        .route("/api/export", post(api_export))
        .fallback(serve_static_asset)
        .with_state(state)
}

/// Binds `addr` and serves until the listener fails.
pub async fn run_server(state: Arc<AppState>, addr: SocketAddr) -> crate::Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🌐 Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(|e| crate::Error::WebServer(e.into()))
}

// --- Response types ---

#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    sort: Option<SortColumn>,
    dir: Option<SortDirection>,
}

impl SortQuery {
    fn spec(&self) -> SortSpec {
        SortSpec::new(self.sort.unwrap_or_default(), self.dir.unwrap_or_default())
    }
}

/// One table row as the page sees it.
#[derive(Debug, Serialize)]
struct NetworkEntry {
    ssid: Ssid,
    bssid: String,
    channel: i32,
    band: Option<Band>,
    signal: i32,
    quality: SignalQuality,
}

#[derive(Debug, Serialize)]
struct NetworksResponse {
    count: usize,
    /// RFC 3339，尚未扫描过时为 null
    taken_at: Option<String>,
    backend: &'static str,
    networks: Vec<NetworkEntry>,
}

impl NetworksResponse {
    /// 快照本身不排序，只对副本排序后返回
    fn new(snapshot: &ScanSnapshot, backend: &'static str, spec: SortSpec) -> Self {
        let mut records = snapshot.records().to_vec();
        sort_records(&mut records, spec);

        let networks = records
            .into_iter()
            .map(|ap| NetworkEntry {
                quality: ap.quality(),
                ssid: ap.ssid,
                bssid: ap.bssid,
                channel: ap.channel,
                band: ap.band,
                signal: ap.signal,
            })
            .collect();

        Self {
            count: snapshot.len(),
            taken_at: snapshot.taken_at().map(|t| t.to_rfc3339()),
            backend,
            networks,
        }
    }
}

fn error_response(error: impl std::fmt::Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "status": "error", "error": error.to_string() })),
    )
        .into_response()
}

// --- Route Handlers ---

/// Serves a static asset (index.html, app.js, style.css) from the frontend provider.
async fn serve_static_asset(State(state): WebServerState, uri: Uri) -> Response {
    let path = uri.path();
    match state.frontend.get_asset(path).await {
        Ok((data, mime)) => ([(header::CONTENT_TYPE, mime)], Body::from(data)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, format!("Asset not found: {}", path)).into_response(),
    }
}

/// The current snapshot, sorted as requested (SSID ascending by default).
async fn api_list_networks(
    State(state): WebServerState,
    Query(query): Query<SortQuery>,
) -> Json<NetworksResponse> {
    let snapshot = state.scanner.snapshot().await;
    Json(NetworksResponse::new(
        &snapshot,
        state.scanner.backend_name(),
        query.spec(),
    ))
}

/// Runs a full scan cycle and returns the new snapshot.
async fn api_refresh(State(state): WebServerState, Query(query): Query<SortQuery>) -> Response {
    match state.scanner.refresh().await {
        Ok(snapshot) => Json(NetworksResponse::new(
            &snapshot,
            state.scanner.backend_name(),
            query.spec(),
        ))
        .into_response(),
        Err(e) => {
            tracing::error!("Refresh failed: {}", e);
            error_response(e)
        }
    }
}

/// Writes the current snapshot (unsorted) to a timestamped CSV file.
async fn api_export(State(state): WebServerState) -> Response {
    let snapshot = state.scanner.snapshot().await;
    let dir = state.export_dir.clone();

    // 文件写入是阻塞操作
    let result =
        tokio::task::spawn_blocking(move || crate::export::export_snapshot(&snapshot, &dir)).await;

    match result {
        Ok(Ok(path)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "path": path.display().to_string(),
            })),
        )
            .into_response(),
        Ok(Err(e)) => {
            tracing::error!("Export failed: {}", e);
            error_response(e)
        }
        Err(e) => {
            tracing::error!("Export task panicked: {}", e);
            error_response(e)
        }
    }
}

#[cfg(all(test, feature = "backend_mock"))]
mod tests {
    use super::*;
    use crate::backends::mock::MockProvider;
    use crate::frontends::embed_frontend::EmbedFrontend;
    use axum::body::to_bytes;
    use axum::http::{Method, Request};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn state(export_dir: PathBuf) -> Arc<AppState> {
        let provider = Arc::new(MockProvider::with_delay(Duration::ZERO));
        let scanner = Arc::new(WifiScanner::new(provider, Duration::from_secs(1)));
        scanner.refresh().await.unwrap();
        Arc::new(AppState {
            scanner,
            frontend: Arc::new(EmbedFrontend::new()),
            export_dir,
        })
    }

    async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> Value {
        let (status, body) = send(app, Method::GET, uri).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    fn column<'a>(body: &'a Value, key: &str) -> Vec<&'a Value> {
        body["networks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| &n[key])
            .collect()
    }

    #[tokio::test]
    async fn networks_default_to_ssid_ascending() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state(dir.path().to_path_buf()).await);

        let body = get_json(app, "/api/networks").await;
        assert_eq!(body["count"], 7);
        assert_eq!(body["backend"], "mock");
        assert!(body["taken_at"].is_string());

        let ssids: Vec<&str> = column(&body, "ssid")
            .into_iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        // 隐藏网络的空 SSID 排在最前
        assert_eq!(ssids[0], "");
        let mut sorted = ssids.clone();
        sorted.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
        assert_eq!(ssids, sorted);
    }

    #[tokio::test]
    async fn networks_sorted_by_signal() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path().to_path_buf()).await;

        let body = get_json(build_router(state.clone()), "/api/networks?sort=signal&dir=asc").await;
        let signals: Vec<i64> = column(&body, "signal")
            .into_iter()
            .map(|v| v.as_i64().unwrap())
            .collect();
        assert!(signals.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(signals[0], -90);

        let body = get_json(build_router(state), "/api/networks?sort=signal&dir=desc").await;
        assert_eq!(body["networks"][0]["signal"], -38);
        assert_eq!(body["networks"][0]["quality"], "strong");
    }

    #[tokio::test]
    async fn network_rows_carry_display_fields() {
        let dir = tempfile::tempdir().unwrap();
        let body = get_json(
            build_router(state(dir.path().to_path_buf()).await),
            "/api/networks?sort=bssid",
        )
        .await;

        // 00:1A:... 排在第一位
        let lab = &body["networks"][1];
        assert_eq!(lab["bssid"], "02:00:00:DE:AD:01");
        assert_eq!(lab["ssid"], "Lab?Net");
        assert_eq!(lab["channel"], 33);
        assert_eq!(lab["band"], "6GHz");
        assert_eq!(lab["quality"], "weak");
    }

    #[tokio::test]
    async fn bad_sort_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state(dir.path().to_path_buf()).await);
        let (status, _) = send(app, Method::GET, "/api/networks?sort=vendor").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn refresh_returns_the_new_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state(dir.path().to_path_buf()).await);
        let (status, body) = send(app, Method::POST, "/api/refresh").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["count"], 7);
    }

    #[tokio::test]
    async fn export_writes_csv_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let export_dir = dir.path().join("WIFI");
        let app = build_router(state(export_dir.clone()).await);

        let (status, body) = send(app, Method::POST, "/api/export").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "success");

        let path = PathBuf::from(body["path"].as_str().unwrap());
        assert!(path.starts_with(&export_dir));
        let csv = std::fs::read(&path).unwrap();
        let lines = csv.split(|&b| b == b'\n').filter(|l| !l.is_empty()).count();
        assert_eq!(lines, 8);
    }

    #[tokio::test]
    async fn export_failure_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        // 目标路径是一个普通文件，无法创建目录
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"x").unwrap();
        let app = build_router(state(blocker).await);

        let (status, body) = send(app, Method::POST, "/api/export").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "error");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn root_serves_index_page() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state(dir.path().to_path_buf()).await);
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
    }

    #[tokio::test]
    async fn unknown_asset_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state(dir.path().to_path_buf()).await);
        let (status, _) = send(app, Method::GET, "/missing.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
