use crate::address::parse_address;
use crate::structs::RawBssEntry;

/// 将 wpa_supplicant 输出中的转义序列反转义回原始字节。
/// `\xHH` 用于非 ASCII 和不可打印字节，另外还有 `\\`、`\"`、`\e`、`\n`、`\r`、`\t`。
pub fn unescape_wpa_ssid(s: &str) -> Vec<u8> {
    fn hex_val(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(10 + b - b'a'),
            b'A'..=b'F' => Some(10 + b - b'A'),
            _ => None,
        }
    }

    let bs = s.as_bytes();
    let mut out = Vec::with_capacity(bs.len());
    let mut i = 0;
    while i < bs.len() {
        if bs[i] != b'\\' || i + 1 >= bs.len() {
            // 普通字节，或字符串以单个 '\' 结尾
            out.push(bs[i]);
            i += 1;
            continue;
        }
        match bs[i + 1] {
            b'x' | b'X' => {
                let hex = bs
                    .get(i + 2)
                    .zip(bs.get(i + 3))
                    .and_then(|(&h1, &h2)| Some((hex_val(h1)?, hex_val(h2)?)));
                match hex {
                    Some((v1, v2)) => {
                        out.push((v1 << 4) | v2);
                        i += 4;
                    }
                    None => {
                        // 格式不正确，按字面量保留反斜杠
                        out.push(b'\\');
                        i += 1;
                    }
                }
            }
            b'\\' => {
                out.push(b'\\');
                i += 2;
            }
            b'"' => {
                out.push(b'"');
                i += 2;
            }
            b'e' => {
                out.push(0x1b);
                i += 2;
            }
            b'n' => {
                out.push(b'\n');
                i += 2;
            }
            b'r' => {
                out.push(b'\r');
                i += 2;
            }
            b't' => {
                out.push(b'\t');
                i += 2;
            }
            other => {
                // 未知的转义序列，保留反斜杠和后面的字符
                out.push(b'\\');
                out.push(other);
                i += 2;
            }
        }
    }

    out
}

/// 解析 `wpa_cli scan_results` 的输出
/// 格式: bssid / frequency / signal level / flags / ssid
///
/// Hidden networks have an empty SSID column and are kept. Lines with a bad
/// BSSID, frequency or signal level are skipped.
pub fn parse_scan_results(output: &str) -> Vec<RawBssEntry> {
    let mut entries = Vec::new();
    for line in output.lines() {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 4 {
            continue;
        }

        let Some(mac) = parse_address(parts[0].trim()) else {
            tracing::debug!("Skipping scan_results line: {}", line);
            continue;
        };
        let Some(frequency_khz) = parts[1]
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|mhz| mhz.checked_mul(1000))
        else {
            tracing::debug!("Skipping scan_results line (frequency): {}", line);
            continue;
        };
        let Ok(rssi) = parts[2].trim().parse::<i32>() else {
            tracing::debug!("Skipping scan_results line (signal): {}", line);
            continue;
        };
        // SSID 本身可能包含制表符，把剩余部分重新拼接
        let ssid = if parts.len() > 4 {
            unescape_wpa_ssid(&parts[4..].join("\t"))
        } else {
            Vec::new()
        };

        entries.push(RawBssEntry {
            frequency_khz,
            rssi,
            ssid,
            mac,
        });
    }
    entries
}
