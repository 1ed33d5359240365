//! MAC 地址 (BSSID) 格式化与解析。

/// Length of a formatted address, e.g. `AA:BB:CC:DD:EE:FF`.
pub const ADDRESS_STR_LEN: usize = 17;

/// Formats a hardware address as six uppercase hex octets joined by colons.
pub fn format_address(mac: &[u8; 6]) -> String {
    format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}

/// Parses the `xx:xx:xx:xx:xx:xx` form printed by wpa_cli. Either case is
/// accepted.
pub fn parse_address(s: &str) -> Option<[u8; 6]> {
    if s.len() != ADDRESS_STR_LEN {
        return None;
    }
    let mut mac = [0u8; 6];
    let mut parts = s.split(':');
    for octet in mac.iter_mut() {
        let part = parts.next()?;
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        *octet = u8::from_str_radix(part, 16).ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(mac)
}
