use crate::traits::UiAssetProvider;
use crate::{Error, Result};
use async_trait::async_trait;
use rust_embed::RustEmbed;
use std::borrow::Cow;

// 扫描结果页面 (index.html / app.js / style.css) 编译进二进制

#[derive(RustEmbed)]
#[folder = "ui/"]
struct ScannerUi;

const INDEX: &str = "index.html";

/// Serves the scanner page from files embedded at compile time.
#[derive(Debug, Default)]
pub struct EmbedFrontend;

impl EmbedFrontend {
    pub fn new() -> Self {
        Self
    }

    /// "" 和 "dir/" 都指向对应目录下的 index.html
    fn resolve(path: &str) -> Cow<'_, str> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            Cow::Borrowed(INDEX)
        } else if path.ends_with('/') {
            Cow::Owned(format!("{path}{INDEX}"))
        } else {
            Cow::Borrowed(path)
        }
    }
}

#[async_trait]
impl UiAssetProvider for EmbedFrontend {
    async fn get_asset(&self, path: &str) -> Result<(Cow<'static, [u8]>, String)> {
        let name = Self::resolve(path);
        let Some(file) = ScannerUi::get(&name) else {
            tracing::debug!("UI asset not found: {}", name);
            return Err(Error::AssetNotFound(name.into_owned()));
        };
        let mime = mime_guess::from_path(name.as_ref())
            .first_or_octet_stream()
            .to_string();

        Ok((file.data, mime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn root_resolves_to_index() {
        let (data, mime) = EmbedFrontend::new().get_asset("").await.unwrap();
        assert_eq!(mime, "text/html");
        assert!(String::from_utf8_lossy(&data).contains("AP Count"));
    }

    #[tokio::test]
    async fn script_and_stylesheet_are_embedded() {
        let frontend = EmbedFrontend::new();
        let (_, js) = frontend.get_asset("/app.js").await.unwrap();
        assert!(js.contains("javascript"));
        let (_, css) = frontend.get_asset("style.css").await.unwrap();
        assert_eq!(css, "text/css");
    }

    #[tokio::test]
    async fn unknown_asset_is_not_found() {
        let err = EmbedFrontend::new().get_asset("nope.txt").await.unwrap_err();
        assert!(matches!(err, Error::AssetNotFound(name) if name == "nope.txt"));
    }
}
