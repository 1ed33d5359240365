mod runner;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// WiFi scanner: lists nearby access points in a sortable web table
/// and saves them as CSV.
#[derive(Parser, Debug)]
#[command(name = "wifi-scanner", version, about, long_about = None)]
pub struct Cli {
    /// TOML config file (defaults to the built-in configs.toml)
    #[arg(long, short = 'c', env = "WIFI_SCANNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override `[web] bind_addr`
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Override `[scanner] backend` (wpa_dbus, wpa_cli or mock)
    #[arg(long)]
    pub backend: Option<String>,

    /// Scan once, write the CSV file, print its path and exit
    #[arg(long)]
    pub export_only: bool,
}

#[tokio::main]
async fn main() {
    // 1. 初始化日志（入口点的职责），默认 info 级别
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    // 2. 调用核心逻辑，3. 处理顶层错误
    if let Err(e) = runner::run_scanner(cli).await {
        tracing::error!("❌ WiFi scanner failed: {:#}", e);
        std::process::exit(1);
    }
}
