use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// 编译时嵌入的默认配置
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../configs.toml");

/// 顶层应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scanner: ScannerConfig,
    pub export: ExportConfig,
    pub web: WebConfig,
}

/// Which scan backend to use. Only backends compiled in via features can
/// actually be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    WpaDbus,
    WpaCli,
    Mock,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::WpaDbus => "wpa_dbus",
            BackendKind::WpaCli => "wpa_cli",
            BackendKind::Mock => "mock",
        }
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wpa_dbus" => Ok(BackendKind::WpaDbus),
            "wpa_cli" => Ok(BackendKind::WpaCli),
            "mock" => Ok(BackendKind::Mock),
            other => Err(Error::InvalidConfig(format!(
                "unknown backend '{}' (expected wpa_dbus, wpa_cli or mock)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub backend: BackendKind,
    /// `None` 表示扫描所有无线接口
    pub interface: Option<String>,
    pub scan_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_addr: SocketAddr,
}

// ============= TOML 文件结构 =============

/// 用于解析 TOML 的临时结构
#[derive(Deserialize)]
struct AppConfigFile {
    scanner: ScannerConfigToml,
    #[serde(default)]
    export: ExportConfigToml,
    web: WebConfigToml,
}

#[derive(Deserialize)]
struct ScannerConfigToml {
    backend: String,
    #[serde(default)]
    interface: String,
    #[serde(default = "default_scan_timeout_secs")]
    scan_timeout_secs: u64,
}

#[derive(Deserialize)]
struct ExportConfigToml {
    directory: String,
}

impl Default for ExportConfigToml {
    fn default() -> Self {
        Self {
            directory: "WIFI".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct WebConfigToml {
    bind_addr: String,
}

fn default_scan_timeout_secs() -> u64 {
    10
}

impl TryFrom<AppConfigFile> for AppConfig {
    type Error = Error;

    fn try_from(t: AppConfigFile) -> Result<Self> {
        let bind_addr = SocketAddr::from_str(&t.web.bind_addr).map_err(|e| {
            Error::InvalidConfig(format!("invalid bind_addr '{}': {}", t.web.bind_addr, e))
        })?;
        if t.scanner.scan_timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "scan_timeout_secs must be greater than 0".into(),
            ));
        }
        let interface = match t.scanner.interface.trim() {
            "" => None,
            name => Some(name.to_string()),
        };

        Ok(AppConfig {
            scanner: ScannerConfig {
                backend: t.scanner.backend.parse()?,
                interface,
                scan_timeout: Duration::from_secs(t.scanner.scan_timeout_secs),
            },
            export: ExportConfig {
                directory: PathBuf::from(t.export.directory),
            },
            web: WebConfig { bind_addr },
        })
    }
}

// ============= 配置加载函数 =============

impl AppConfig {
    /// 从 TOML 字符串加载应用配置
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let parsed: AppConfigFile = toml::from_str(s)?;
        AppConfig::try_from(parsed)
    }

    /// 加载指定文件；未指定时使用嵌入的默认配置
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading config file");
                let content = std::fs::read_to_string(path)?;
                Self::from_toml_str(&content)
            }
            None => Self::from_toml_str(DEFAULT_CONFIG_TOML),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_parses() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.scanner.backend, BackendKind::WpaDbus);
        assert_eq!(config.scanner.interface, None);
        assert_eq!(config.scanner.scan_timeout, Duration::from_secs(10));
        assert_eq!(config.export.directory, PathBuf::from("WIFI"));
        assert_eq!(config.web.bind_addr.port(), 8080);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [scanner]
            backend = "wpa_cli"
            interface = "wlan1"
            [web]
            bind_addr = "0.0.0.0:80"
            "#,
        )
        .unwrap();
        assert_eq!(config.scanner.backend, BackendKind::WpaCli);
        assert_eq!(config.scanner.interface.as_deref(), Some("wlan1"));
        assert_eq!(config.scanner.scan_timeout, Duration::from_secs(10));
        assert_eq!(config.export.directory, PathBuf::from("WIFI"));
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = AppConfig::from_toml_str(
            "[scanner]\nbackend = \"iwlist\"\n[web]\nbind_addr = \"127.0.0.1:8080\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_bad_bind_addr_and_zero_timeout() {
        let bad_addr = "[scanner]\nbackend = \"mock\"\n[web]\nbind_addr = \"localhost\"\n";
        assert!(matches!(
            AppConfig::from_toml_str(bad_addr),
            Err(Error::InvalidConfig(_))
        ));

        let zero = "[scanner]\nbackend = \"mock\"\nscan_timeout_secs = 0\n[web]\nbind_addr = \"127.0.0.1:1\"\n";
        assert!(matches!(
            AppConfig::from_toml_str(zero),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml_str("[scanner"),
            Err(Error::Config(_))
        ));
    }
}
