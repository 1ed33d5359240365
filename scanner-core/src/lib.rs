//! Core library for the WiFi scanner.
//! This crate defines the data model and the pure helpers that turn raw BSS
//! entries into displayable records, the `ScanProvider` seam with its
//! backends (selected by feature flags and configuration), the CSV export
//! sink, and the web server that renders the table.

pub mod address;
pub mod backends;
pub mod channel;
pub mod config;
pub mod export;
pub mod factory;
pub mod frontends;
pub mod scanner;
pub mod sort;
pub mod ssid;
pub mod structs;
pub mod traits;
pub mod web_server;

// Define a shared Error and Result type for the entire crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Scan failed: {0}")]
    Scan(String),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "backend_wpa_dbus")]
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    #[error("Web server error: {0}")]
    WebServer(#[from] axum::BoxError),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),
}

/// A specialized `Result` type for this crate's operations.
pub type Result<T> = std::result::Result<T, Error>;
