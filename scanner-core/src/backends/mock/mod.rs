use crate::Result;
use crate::structs::RawBssEntry;
use crate::traits::ScanProvider;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// A mock backend for local development and tests.
/// It simulates a scan without any real hardware interaction.
#[derive(Debug)]
pub struct MockProvider {
    scan_delay: Duration,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_secs(2))
    }

    /// `delay` is how long the simulated scan takes to complete.
    pub fn with_delay(delay: Duration) -> Self {
        Self { scan_delay: delay }
    }

    /// Return a fixed list of fake networks
    fn fake_entries() -> Vec<RawBssEntry> {
        vec![
            RawBssEntry {
                frequency_khz: 2_437_000,
                rssi: -38,
                ssid: b"MyHomeWiFi".to_vec(),
                mac: [0x3c, 0x84, 0x6a, 0x12, 0x34, 0x56],
            },
            RawBssEntry {
                frequency_khz: 5_180_000,
                rssi: -57,
                ssid: b"CafeGuest".to_vec(),
                mac: [0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e],
            },
            RawBssEntry {
                frequency_khz: 2_462_000,
                rssi: -71,
                ssid: b"Neighbor's Network".to_vec(),
                mac: [0xf4, 0xec, 0x38, 0xaa, 0xbb, 0xcc],
            },
            RawBssEntry {
                frequency_khz: 5_745_000,
                rssi: -64,
                ssid: "咖啡店-5G".as_bytes().to_vec(),
                mac: [0x8c, 0x3b, 0xad, 0x01, 0x02, 0x03],
            },
            RawBssEntry {
                frequency_khz: 6_115_000,
                rssi: -82,
                ssid: b"Lab\x07Net".to_vec(),
                mac: [0x02, 0x00, 0x00, 0xde, 0xad, 0x01],
            },
            RawBssEntry {
                frequency_khz: 2_484_000,
                rssi: -90,
                ssid: b"AVeryLongNetworkNameThatExceedsThirtyTwoBytes".to_vec(),
                mac: [0x02, 0x00, 0x00, 0xde, 0xad, 0x02],
            },
            RawBssEntry {
                frequency_khz: 5_240_000,
                rssi: -76,
                ssid: Vec::new(),
                mac: [0x02, 0x00, 0x00, 0xde, 0xad, 0x03],
            },
        ]
    }
}

#[async_trait]
impl ScanProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn trigger_scan(&self) -> Result<()> {
        tracing::info!("🤖 [MockProvider] Scanning for networks (simulated)...");
        Ok(())
    }

    async fn wait_for_scan(&self, timeout: Duration) -> bool {
        if self.scan_delay > timeout {
            sleep(timeout).await;
            return false;
        }
        sleep(self.scan_delay).await;
        true
    }

    async fn fetch_results(&self) -> Result<Vec<RawBssEntry>> {
        let entries = Self::fake_entries();
        tracing::info!("🤖 [MockProvider] Found {} networks.", entries.len());
        Ok(entries)
    }
}
