use crate::Cli;
use anyhow::Context;
use scanner_core::{
    config::{AppConfig, BackendKind},
    export, factory,
    scanner::WifiScanner,
    web_server::{self, AppState},
};
use std::sync::Arc;

/// 应用命令行覆盖项后的最终配置
fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(backend) = &cli.backend {
        config.scanner.backend = backend.parse::<BackendKind>()?;
    }
    if let Some(bind) = cli.bind {
        config.web.bind_addr = bind;
    }
    Ok(config)
}

/// 组装扫描器和前端，然后导出一次或者启动 Web 服务器
pub async fn run_scanner(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    let provider = factory::create_provider(&config.scanner)?;
    let scanner = Arc::new(WifiScanner::new(provider, config.scanner.scan_timeout));

    tracing::info!(backend = scanner.backend_name(), "📡 Runner: initial scan...");
    if cli.export_only {
        let snapshot = scanner.refresh().await.context("scan failed")?;
        let dir = config.export.directory.clone();
        let path = tokio::task::spawn_blocking(move || export::export_snapshot(&snapshot, &dir))
            .await??;
        println!("{}", path.display());
        return Ok(());
    }

    // 首次扫描失败不影响启动，页面上可以手动刷新
    if let Err(e) = scanner.refresh().await {
        tracing::warn!("Initial scan failed: {}", e);
    }

    let state = Arc::new(AppState {
        scanner,
        frontend: factory::create_frontend(),
        export_dir: config.export.directory,
    });
    web_server::run_server(state, config.web.bind_addr).await?;
    Ok(())
}
