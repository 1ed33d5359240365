//! SSID 清洗：把任意字节序列变成可显示的、最多 32 字节的名称。

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Maximum SSID length in bytes (IEEE 802.11).
pub const SSID_MAX_LEN: usize = 32;

/// Substituted for bytes that cannot be displayed.
pub const PLACEHOLDER: u8 = b'?';

/// A sanitized SSID held in a fixed buffer with room for a NUL terminator.
///
/// Every byte is either printable ASCII or part of a well-formed UTF-8
/// lead/continuation sequence. Ordering compares the raw bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ssid {
    buf: [u8; SSID_MAX_LEN + 1],
    len: usize,
}

impl Ssid {
    /// Copies at most [`SSID_MAX_LEN`] bytes of `raw` and normalizes them.
    ///
    /// High-bit bytes are kept only when they start a complete 2, 3 or
    /// 4 byte sequence inside the copied range. Otherwise the lead byte
    /// becomes [`PLACEHOLDER`] and the following bytes are checked on their
    /// own. ASCII control characters and DEL are replaced as well.
    pub fn sanitize(raw: &[u8]) -> Self {
        let len = raw.len().min(SSID_MAX_LEN);
        let mut buf = [0u8; SSID_MAX_LEN + 1];
        buf[..len].copy_from_slice(&raw[..len]);

        let out = &mut buf[..len];
        let mut i = 0;
        while i < out.len() {
            let b = out[i];
            if b & 0x80 != 0 {
                if let Some(n) = utf8_sequence_len(b) {
                    if has_continuations(&out[i + 1..], n - 1) {
                        i += n;
                        continue;
                    }
                }
                out[i] = PLACEHOLDER;
            } else if !(32..=126).contains(&b) {
                out[i] = PLACEHOLDER;
            }
            i += 1;
        }

        Self { buf, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The sanitized bytes followed by the NUL terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decodes the bytes as UTF-8. Lead/continuation patterns that are not
    /// valid scalar values (overlong forms, surrogates) show up as U+FFFD.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

/// Expected sequence length for a UTF-8 lead byte, `None` if `b` cannot lead.
fn utf8_sequence_len(b: u8) -> Option<usize> {
    if b & 0xE0 == 0xC0 {
        Some(2)
    } else if b & 0xF0 == 0xE0 {
        Some(3)
    } else if b & 0xF8 == 0xF0 {
        Some(4)
    } else {
        None
    }
}

fn has_continuations(tail: &[u8], count: usize) -> bool {
    tail.len() >= count && tail[..count].iter().all(|&c| c & 0xC0 == 0x80)
}

impl Default for Ssid {
    fn default() -> Self {
        Self::sanitize(&[])
    }
}

impl Ord for Ssid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl PartialOrd for Ssid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ssid({:?})", self.to_string_lossy())
    }
}

impl Serialize for Ssid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}
