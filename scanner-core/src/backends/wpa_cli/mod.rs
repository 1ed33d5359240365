use crate::backends::utils::parse_scan_results;
use crate::structs::RawBssEntry;
use crate::traits::ScanProvider;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

// 通过调用 wpa_cli 命令行工具实现的扫描后端。
// wpa_cli 没有扫描完成通知，只能固定等待一段时间再读取结果。
const SCAN_SETTLE: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct WpaCliProvider {
    /// `None` 表示使用 wpa_supplicant 管理的所有接口
    interface: Option<String>,
}

impl WpaCliProvider {
    pub fn new(interface: Option<String>) -> Self {
        Self { interface }
    }

    async fn run(iface: Option<&str>, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("wpa_cli");
        if let Some(iface) = iface {
            cmd.arg("-i").arg(iface);
        }
        let output = cmd.args(args).output().await?;
        if !output.status.success() {
            let err = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CommandFailed(format!(
                "wpa_cli {} failed: {}",
                args.join(" "),
                err.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// 要操作的接口列表；`None` 元素表示让 wpa_cli 自行选择默认接口
    async fn interfaces(&self) -> Vec<Option<String>> {
        if let Some(name) = &self.interface {
            return vec![Some(name.clone())];
        }
        match Self::run(None, &["interface"]).await {
            Ok(out) => {
                let names = parse_interface_list(&out);
                if names.is_empty() {
                    vec![None]
                } else {
                    names.into_iter().map(Some).collect()
                }
            }
            Err(e) => {
                tracing::warn!("Failed to list wpa_supplicant interfaces: {}", e);
                vec![None]
            }
        }
    }
}

/// Parses the reply of `wpa_cli interface`:
/// ```text
/// Selected interface 'wlan0'
/// Available interfaces:
/// wlan0
/// p2p-dev-wlan0
/// ```
fn parse_interface_list(output: &str) -> Vec<String> {
    output
        .lines()
        .skip_while(|line| !line.starts_with("Available interfaces"))
        .skip(1)
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.starts_with("p2p-dev-"))
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl ScanProvider for WpaCliProvider {
    fn name(&self) -> &'static str {
        "wpa_cli"
    }

    async fn trigger_scan(&self) -> Result<()> {
        let mut started = 0;
        for iface in self.interfaces().await {
            let label = iface.as_deref().unwrap_or("(default)");
            match Self::run(iface.as_deref(), &["scan"]).await {
                Ok(reply) if reply.trim() == "OK" => started += 1,
                Ok(reply) => {
                    tracing::warn!(iface = label, "Scan request rejected: {}", reply.trim())
                }
                Err(e) => tracing::warn!(iface = label, "Scan request failed: {}", e),
            }
        }
        if started == 0 {
            return Err(Error::Scan("wpa_cli could not start a scan on any interface".into()));
        }
        Ok(())
    }

    async fn wait_for_scan(&self, timeout: Duration) -> bool {
        tokio::time::sleep(SCAN_SETTLE.min(timeout)).await;
        SCAN_SETTLE <= timeout
    }

    async fn fetch_results(&self) -> Result<Vec<RawBssEntry>> {
        let mut entries = Vec::new();
        for iface in self.interfaces().await {
            let output = Self::run(iface.as_deref(), &["scan_results"]).await?;
            entries.extend(parse_scan_results(&output));
        }
        Ok(entries)
    }
}
