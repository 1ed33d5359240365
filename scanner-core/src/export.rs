//! 将扫描快照导出为 CSV 文件。

use crate::structs::ScanSnapshot;
use crate::Result;
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "SSID,BSSID,Channel,Signal (dBm)";

/// Writes the header line and one row per record, in snapshot order.
pub fn write_csv<W: Write>(snapshot: &ScanSnapshot, mut writer: W) -> Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for ap in snapshot.records() {
        write_field(&mut writer, ap.ssid.as_bytes())?;
        writeln!(writer, ",{},{},{}", ap.bssid, ap.channel, ap.signal)?;
    }
    writer.flush()?;
    Ok(())
}

/// SSID 可能包含逗号或引号，按 RFC 4180 加引号，保证每行恰好四列。
fn write_field<W: Write>(writer: &mut W, field: &[u8]) -> std::io::Result<()> {
    let needs_quotes = field
        .iter()
        .any(|&b| matches!(b, b',' | b'"' | b'\n' | b'\r'));
    if !needs_quotes {
        return writer.write_all(field);
    }
    writer.write_all(b"\"")?;
    for chunk in field.split_inclusive(|&b| b == b'"') {
        writer.write_all(chunk)?;
        if chunk.last() == Some(&b'"') {
            writer.write_all(b"\"")?;
        }
    }
    writer.write_all(b"\"")
}

/// `WiFi_<YYYYMMDD_HHMMSS>.csv`, local time.
pub fn export_file_name() -> String {
    format!("WiFi_{}.csv", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Creates `dir` if needed and writes the snapshot to a timestamped file.
/// Returns the path of the written file.
pub fn export_snapshot(snapshot: &ScanSnapshot, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name());
    let file = File::create(&path)?;
    write_csv(snapshot, BufWriter::new(file))?;
    tracing::info!(path = %path.display(), count = snapshot.len(), "Scan results exported");
    Ok(path)
}
