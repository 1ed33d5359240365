use crate::address::format_address;
use crate::channel::{Band, channel_for};
use crate::ssid::Ssid;
use chrono::{DateTime, Local};
use serde::Serialize;

/// 后端返回的单个 BSS 原始数据，尚未清洗。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBssEntry {
    pub frequency_khz: u32,
    /// 信号强度 (dBm)
    pub rssi: i32,
    pub ssid: Vec<u8>,
    pub mac: [u8; 6],
}

/// 扫描到的单个接入点，创建后不再修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub ssid: Ssid,
    /// `AA:BB:CC:DD:EE:FF`
    pub bssid: String,
    /// 信道（-1 表示未知频段）
    pub channel: i32,
    pub band: Option<Band>,
    /// 信号强度 (dBm)
    pub signal: i32,
}

impl AccessPoint {
    pub fn from_raw(entry: &RawBssEntry) -> Self {
        Self {
            ssid: Ssid::sanitize(&entry.ssid),
            bssid: format_address(&entry.mac),
            channel: channel_for(entry.frequency_khz),
            band: Band::from_frequency_khz(entry.frequency_khz),
            signal: entry.rssi,
        }
    }

    pub fn quality(&self) -> SignalQuality {
        SignalQuality::from_dbm(self.signal)
    }
}

/// Coarse signal bucket used to color the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalQuality {
    Strong,
    Fair,
    Weak,
}

impl SignalQuality {
    pub fn from_dbm(signal: i32) -> Self {
        if signal >= -50 {
            SignalQuality::Strong
        } else if signal >= -70 {
            SignalQuality::Fair
        } else {
            SignalQuality::Weak
        }
    }
}

/// One point-in-time scan result. A refresh replaces the whole snapshot.
#[derive(Debug, Clone, Default)]
pub struct ScanSnapshot {
    records: Vec<AccessPoint>,
    taken_at: Option<DateTime<Local>>,
}

impl ScanSnapshot {
    pub fn new(records: Vec<AccessPoint>) -> Self {
        Self {
            records,
            taken_at: Some(Local::now()),
        }
    }

    pub fn from_raw_entries(entries: &[RawBssEntry]) -> Self {
        Self::new(entries.iter().map(AccessPoint::from_raw).collect())
    }

    pub fn records(&self) -> &[AccessPoint] {
        &self.records
    }

    /// `None` until the first scan has completed.
    pub fn taken_at(&self) -> Option<DateTime<Local>> {
        self.taken_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
