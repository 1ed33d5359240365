use crate::structs::RawBssEntry;
use crate::traits::ScanProvider;
use crate::{Error, Result};
use async_trait::async_trait;
use futures_util::stream::StreamExt;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify, oneshot};
use tokio::task::JoinHandle;
use zbus::zvariant::{OwnedObjectPath, Value};
use zbus::{Connection, Proxy};

// 通过系统 D-Bus 与 wpa_supplicant 通信的扫描后端。
// 流程: Interfaces -> (订阅 ScanDone) -> Scan -> 等待 ScanDone -> BSSs -> 读取 BSS 属性

const WPA_S_SERVICE: &str = "fi.w1.wpa_supplicant1";
const WPA_S_PATH: &str = "/fi/w1/wpa_supplicant1";
const WPA_S_INTERFACE: &str = "fi.w1.wpa_supplicant1";
const WPA_S_IFACE_INTERFACE: &str = "fi.w1.wpa_supplicant1.Interface";
const WPA_S_BSS_INTERFACE: &str = "fi.w1.wpa_supplicant1.BSS";

#[derive(Debug)]
pub struct WpaDbusProvider {
    /// `None` 表示扫描 wpa_supplicant 管理的所有接口
    interface: Option<String>,
    // Lazily connected on first use
    conn: Mutex<Option<Connection>>,
    // Fired by any interface's ScanDone for the current scan
    scan_done: Mutex<Arc<Notify>>,
    listeners: Mutex<Vec<JoinHandle<()>>>,
}

impl WpaDbusProvider {
    pub fn new(interface: Option<String>) -> Self {
        Self {
            interface,
            conn: Mutex::new(None),
            scan_done: Mutex::new(Arc::new(Notify::new())),
            listeners: Mutex::new(Vec::new()),
        }
    }

    async fn ensure_conn(&self) -> Result<Connection> {
        let mut guard = self.conn.lock().await;
        if let Some(c) = guard.as_ref() {
            return Ok(c.clone());
        }
        let c = Connection::system()
            .await
            .map_err(|e| Error::CommandFailed(format!("DBus connect failed: {}", e)))?;
        *guard = Some(c.clone());
        Ok(c)
    }

    /// 列出 wpa_supplicant 管理的接口 (接口名, 对象路径)，按配置过滤
    async fn wireless_interfaces(&self, conn: &Connection) -> Result<Vec<(String, OwnedObjectPath)>> {
        let root = Proxy::new(conn, WPA_S_SERVICE, WPA_S_PATH, WPA_S_INTERFACE).await?;
        let paths: Vec<OwnedObjectPath> = root.get_property("Interfaces").await?;

        let mut ifaces = Vec::new();
        for path in paths {
            let iface = Proxy::new(conn, WPA_S_SERVICE, path.as_ref(), WPA_S_IFACE_INTERFACE).await?;
            let ifname: String = iface.get_property("Ifname").await?;
            if self.interface.as_deref().is_none_or(|want| want == ifname) {
                ifaces.push((ifname, path));
            }
        }
        Ok(ifaces)
    }

    /// 在后台任务中订阅某个接口的 ScanDone 信号；订阅建立后才返回
    async fn spawn_scan_done_listener(
        conn: Connection,
        path: OwnedObjectPath,
        done: Arc<Notify>,
    ) -> Result<JoinHandle<()>> {
        let (ready_tx, ready_rx) = oneshot::channel::<std::result::Result<(), String>>();

        let handle = tokio::spawn(async move {
            let proxy = match Proxy::new(&conn, WPA_S_SERVICE, path.as_ref(), WPA_S_IFACE_INTERFACE).await {
                Ok(p) => p,
                Err(e) => {
                    let _ = ready_tx.send(Err(format!("interface proxy error: {}", e)));
                    return;
                }
            };
            let mut stream = match proxy.receive_signal("ScanDone").await {
                Ok(s) => s,
                Err(e) => {
                    let _ = ready_tx.send(Err(format!("failed to listen for ScanDone: {}", e)));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));

            if let Some(msg) = stream.next().await {
                match msg.body().deserialize::<(bool,)>() {
                    Ok((true,)) => tracing::debug!(path = %path.as_str(), "ScanDone received"),
                    Ok((false,)) => tracing::warn!(path = %path.as_str(), "ScanDone reported failure"),
                    Err(e) => tracing::warn!(path = %path.as_str(), "Invalid ScanDone body: {}", e),
                }
                done.notify_one();
            }
        });

        match ready_rx.await {
            Ok(Ok(())) => Ok(handle),
            Ok(Err(e)) => Err(Error::Scan(e)),
            Err(_) => Err(Error::Scan("ScanDone listener exited early".into())),
        }
    }

    async fn request_scan(conn: &Connection, path: &OwnedObjectPath) -> Result<()> {
        let iface = Proxy::new(conn, WPA_S_SERVICE, path.as_ref(), WPA_S_IFACE_INTERFACE).await?;
        let mut args: HashMap<&str, Value<'_>> = HashMap::new();
        args.insert("Type", Value::from("active"));
        iface.call_method("Scan", &(args,)).await?;
        Ok(())
    }

    /// 读取单个 BSS；BSSID 长度不对时返回 None
    async fn read_bss(conn: &Connection, path: &OwnedObjectPath) -> Result<Option<RawBssEntry>> {
        let bss = Proxy::new(conn, WPA_S_SERVICE, path.as_ref(), WPA_S_BSS_INTERFACE).await?;

        let bssid: Vec<u8> = bss.get_property("BSSID").await?;
        let Ok(mac) = <[u8; 6]>::try_from(bssid.as_slice()) else {
            return Ok(None);
        };
        let ssid: Vec<u8> = bss.get_property("SSID").await?;
        let frequency_mhz: u16 = bss.get_property("Frequency").await?;
        let signal: i16 = bss.get_property("Signal").await?;

        Ok(Some(RawBssEntry {
            frequency_khz: u32::from(frequency_mhz) * 1000,
            rssi: i32::from(signal),
            ssid,
            mac,
        }))
    }
}

#[async_trait]
impl ScanProvider for WpaDbusProvider {
    fn name(&self) -> &'static str {
        "wpa_dbus"
    }

    async fn trigger_scan(&self) -> Result<()> {
        let conn = self.ensure_conn().await?;
        let ifaces = self.wireless_interfaces(&conn).await?;
        if ifaces.is_empty() {
            return Err(Error::Scan(match &self.interface {
                Some(name) => format!("Wi-Fi interface '{}' not found.", name),
                None => "wpa_supplicant manages no interfaces".to_string(),
            }));
        }

        // 上一次扫描遗留的监听任务不再需要
        let mut listeners = self.listeners.lock().await;
        for handle in listeners.drain(..) {
            handle.abort();
        }
        let done = Arc::new(Notify::new());
        *self.scan_done.lock().await = done.clone();

        for (ifname, path) in ifaces {
            let listener =
                match Self::spawn_scan_done_listener(conn.clone(), path.clone(), done.clone()).await {
                    Ok(h) => h,
                    Err(e) => {
                        tracing::warn!(iface = %ifname, "Cannot watch scan completion: {}", e);
                        continue;
                    }
                };
            match Self::request_scan(&conn, &path).await {
                Ok(()) => {
                    tracing::debug!(iface = %ifname, "Scan requested");
                    listeners.push(listener);
                }
                Err(e) => {
                    tracing::warn!(iface = %ifname, "Scan failed: {}", e);
                    listener.abort();
                }
            }
        }

        if listeners.is_empty() {
            return Err(Error::Scan("scan could not be started on any interface".into()));
        }
        Ok(())
    }

    async fn wait_for_scan(&self, timeout: Duration) -> bool {
        let done = self.scan_done.lock().await.clone();
        tokio::time::timeout(timeout, done.notified()).await.is_ok()
    }

    async fn fetch_results(&self) -> Result<Vec<RawBssEntry>> {
        let conn = self.ensure_conn().await?;
        let mut entries = Vec::new();

        for (ifname, path) in self.wireless_interfaces(&conn).await? {
            let iface = Proxy::new(&conn, WPA_S_SERVICE, path.as_ref(), WPA_S_IFACE_INTERFACE).await?;
            let bss_paths: Vec<OwnedObjectPath> = iface.get_property("BSSs").await?;

            for bss_path in bss_paths {
                match Self::read_bss(&conn, &bss_path).await {
                    Ok(Some(entry)) => entries.push(entry),
                    Ok(None) => tracing::debug!(iface = %ifname, "Skipping BSS with malformed BSSID"),
                    // BSS 可能在读取过程中过期消失
                    Err(e) => tracing::warn!(iface = %ifname, "Failed to read BSS {}: {}", bss_path.as_str(), e),
                }
            }
        }
        Ok(entries)
    }
}
