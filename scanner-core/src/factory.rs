use crate::config::{BackendKind, ScannerConfig};
use crate::traits::{ScanProvider, UiAssetProvider};
use crate::{Error, Result};
use std::sync::Arc;

/// 根据配置创建扫描后端；只有编译时启用了对应 feature 的后端可用
pub fn create_provider(config: &ScannerConfig) -> Result<Arc<dyn ScanProvider>> {
    let interface = config.interface.clone();
    match config.backend {
        #[cfg(feature = "backend_wpa_dbus")]
        BackendKind::WpaDbus => {
            tracing::info!("📡 Backend: wpa_supplicant D-Bus selected");
            Ok(Arc::new(crate::backends::wpa_supplicant_dbus::WpaDbusProvider::new(interface)))
        }
        #[cfg(feature = "backend_wpa_cli")]
        BackendKind::WpaCli => {
            tracing::info!("📡 Backend: wpa_cli selected");
            Ok(Arc::new(crate::backends::wpa_cli::WpaCliProvider::new(interface)))
        }
        #[cfg(feature = "backend_mock")]
        BackendKind::Mock => {
            tracing::info!("🤖 Backend: Mock selected (for local development)");
            Ok(Arc::new(crate::backends::mock::MockProvider::new()))
        }
        #[allow(unreachable_patterns)]
        other => {
            let _ = interface;
            Err(Error::InvalidConfig(format!(
                "backend '{}' was not compiled in (enable feature backend_{})",
                other.as_str(),
                other.as_str()
            )))
        }
    }
}

pub fn create_frontend() -> Arc<dyn UiAssetProvider> {
    tracing::debug!("📦 Frontend: Embed Provider selected");
    Arc::new(crate::frontends::embed_frontend::EmbedFrontend::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(backend: BackendKind) -> ScannerConfig {
        ScannerConfig {
            backend,
            interface: None,
            scan_timeout: Duration::from_secs(10),
        }
    }

    #[cfg(feature = "backend_mock")]
    #[test]
    fn creates_mock_provider() {
        let provider = create_provider(&config(BackendKind::Mock)).unwrap();
        assert_eq!(provider.name(), "mock");
    }

    #[cfg(feature = "backend_wpa_cli")]
    #[test]
    fn creates_wpa_cli_provider() {
        let provider = create_provider(&config(BackendKind::WpaCli)).unwrap();
        assert_eq!(provider.name(), "wpa_cli");
    }

    #[cfg(not(feature = "backend_wpa_dbus"))]
    #[test]
    fn missing_backend_is_a_config_error() {
        assert!(matches!(
            create_provider(&config(BackendKind::WpaDbus)),
            Err(Error::InvalidConfig(_))
        ));
    }
}
