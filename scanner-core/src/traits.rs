use crate::structs::RawBssEntry;
use async_trait::async_trait;
use std::borrow::Cow;
use std::time::Duration;

// 后端与前端的共享接口。

/// 无线扫描提供者接口。
///
/// A scan is three steps: `trigger_scan`, then `wait_for_scan`, then
/// `fetch_results`. Implementations must subscribe to their completion
/// notification before the trigger goes out, so a fast scan cannot
/// complete unobserved.
#[async_trait]
pub trait ScanProvider: Send + Sync {
    /// Short backend name for logs and the API ("wpa_dbus", "mock", ...).
    fn name(&self) -> &'static str;

    /// Starts a scan on every wireless interface the provider manages.
    /// Fails with `Error::Scan` when no scan could be started at all.
    async fn trigger_scan(&self) -> crate::Result<()>;

    /// Waits for the scan started by the last `trigger_scan`.
    /// Returns `false` if `timeout` elapsed first.
    async fn wait_for_scan(&self, timeout: Duration) -> bool;

    /// Reads the complete, current BSS list.
    async fn fetch_results(&self) -> crate::Result<Vec<RawBssEntry>>;
}

/// 前端资源提供者接口。
#[async_trait]
pub trait UiAssetProvider: Send + Sync {
    /// Retrieves a single UI asset.
    ///
    /// # Arguments
    /// * `path` - The path to the asset (e.g., "index.html", "app.js").
    ///
    /// # Returns
    /// The asset's content and its MIME type, or `Error::AssetNotFound`.
    async fn get_asset(&self, path: &str) -> crate::Result<(Cow<'static, [u8]>, String)>;
}
