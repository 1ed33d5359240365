//! 扫描器：触发扫描、等待完成、读取结果，并整体替换当前快照。

use crate::structs::ScanSnapshot;
use crate::traits::ScanProvider;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Owns a scan provider and the latest snapshot.
///
/// Shared as `Arc<WifiScanner>` by whoever composes the application.
pub struct WifiScanner {
    provider: Arc<dyn ScanProvider>,
    scan_timeout: Duration,
    snapshot: RwLock<Arc<ScanSnapshot>>,
    // 同一时间只允许一次刷新
    refresh_lock: Mutex<()>,
}

impl WifiScanner {
    pub fn new(provider: Arc<dyn ScanProvider>, scan_timeout: Duration) -> Self {
        Self {
            provider,
            scan_timeout,
            snapshot: RwLock::new(Arc::new(ScanSnapshot::default())),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.provider.name()
    }

    /// The latest snapshot. Empty until the first successful refresh.
    pub async fn snapshot(&self) -> Arc<ScanSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Runs one full scan cycle and swaps in the new snapshot.
    ///
    /// A completion timeout is not an error: the results are read anyway.
    /// On a trigger or fetch failure the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<ScanSnapshot>> {
        let _guard = self.refresh_lock.lock().await;
        let backend = self.provider.name();

        tracing::debug!(backend, "Triggering scan...");
        self.provider.trigger_scan().await?;

        if self.provider.wait_for_scan(self.scan_timeout).await {
            tracing::debug!(backend, "Scan completed, fetching results.");
        } else {
            tracing::warn!(
                backend,
                timeout_secs = self.scan_timeout.as_secs(),
                "Scan did not complete in time, reading current results"
            );
        }

        let entries = self.provider.fetch_results().await?;
        let snapshot = Arc::new(ScanSnapshot::from_raw_entries(&entries));
        tracing::info!(backend, count = snapshot.len(), "Scan snapshot updated");

        *self.snapshot.write().await = snapshot.clone();
        Ok(snapshot)
    }
}
