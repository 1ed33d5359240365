//! 802.11 频率与信道换算。

use serde::Serialize;

/// Returned by [`channel_for`] when the frequency is outside every known band.
pub const UNKNOWN_CHANNEL: i32 = -1;

/// Maps a center frequency in kHz to its 802.11 channel number.
///
/// The fractional MHz part is dropped before lookup. Frequencies outside the
/// 2.4, 5 and 6 GHz bands map to [`UNKNOWN_CHANNEL`].
pub fn channel_for(frequency_khz: u32) -> i32 {
    // u32::MAX / 1000 still fits in an i32.
    let mhz = (frequency_khz / 1000) as i32;

    match mhz {
        // 日本特殊频道，不在 5 MHz 网格上
        2484 => 14,
        2412..=2483 => (mhz - 2407) / 5,
        // 5 GHz 分三段，各自有不同的偏移
        5180..=5320 => (mhz - 5180) / 5 + 36,
        5321..=5720 => (mhz - 5500) / 5 + 100,
        5721..=5885 => (mhz - 5745) / 5 + 149,
        // 6 GHz (WiFi 6E)
        5955..=7115 => (mhz - 5955) / 5 + 1,
        _ => UNKNOWN_CHANNEL,
    }
}

/// Frequency band of an access point, using the same ranges as [`channel_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Band {
    #[serde(rename = "2.4GHz")]
    TwoPointFour,
    #[serde(rename = "5GHz")]
    Five,
    #[serde(rename = "6GHz")]
    Six,
}

impl Band {
    pub fn from_frequency_khz(frequency_khz: u32) -> Option<Self> {
        match frequency_khz / 1000 {
            2412..=2484 => Some(Band::TwoPointFour),
            5180..=5885 => Some(Band::Five),
            5955..=7115 => Some(Band::Six),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mhz(f: u32) -> u32 {
        f * 1000
    }

    #[test]
    fn two_point_four_ghz_band_follows_the_5mhz_grid() {
        for f in 2412..2484 {
            assert_eq!(channel_for(mhz(f)), (f as i32 - 2407) / 5, "freq {f}");
        }
        assert_eq!(channel_for(mhz(2412)), 1);
        assert_eq!(channel_for(mhz(2437)), 6);
        assert_eq!(channel_for(mhz(2472)), 13);
    }

    #[test]
    fn channel_14_is_special_cased() {
        assert_eq!(channel_for(mhz(2484)), 14);
        assert_eq!(channel_for(2_484_999), 14);
    }

    #[test]
    fn kilohertz_remainder_is_discarded() {
        assert_eq!(channel_for(2_412_999), 1);
        assert_eq!(channel_for(2_411_999), UNKNOWN_CHANNEL);
    }

    #[test]
    fn five_ghz_sub_range_boundaries() {
        assert_eq!(channel_for(mhz(5179)), UNKNOWN_CHANNEL);
        assert_eq!(channel_for(mhz(5180)), 36);
        assert_eq!(channel_for(mhz(5320)), 64);

        // 5321..5499 sits below the second offset and truncates toward zero.
        assert_eq!(channel_for(mhz(5321)), (5321 - 5500) / 5 + 100);
        assert_eq!(channel_for(mhz(5321)), 65);
        assert_eq!(channel_for(mhz(5500)), 100);
        assert_eq!(channel_for(mhz(5720)), 144);

        assert_eq!(channel_for(mhz(5721)), (5721 - 5745) / 5 + 149);
        assert_eq!(channel_for(mhz(5745)), 149);
        assert_eq!(channel_for(mhz(5825)), 165);
        assert_eq!(channel_for(mhz(5885)), 177);
        assert_eq!(channel_for(mhz(5886)), UNKNOWN_CHANNEL);
    }

    #[test]
    fn six_ghz_band() {
        assert_eq!(channel_for(mhz(5954)), UNKNOWN_CHANNEL);
        assert_eq!(channel_for(mhz(5955)), 1);
        assert_eq!(channel_for(mhz(6115)), 33);
        assert_eq!(channel_for(mhz(7115)), 233);
        assert_eq!(channel_for(mhz(7116)), UNKNOWN_CHANNEL);
    }

    #[test]
    fn frequencies_outside_every_band_are_unknown() {
        assert_eq!(channel_for(0), UNKNOWN_CHANNEL);
        assert_eq!(channel_for(3_000_000), UNKNOWN_CHANNEL);
        assert_eq!(channel_for(mhz(2411)), UNKNOWN_CHANNEL);
        assert_eq!(channel_for(mhz(2485)), UNKNOWN_CHANNEL);
        assert_eq!(channel_for(mhz(5900)), UNKNOWN_CHANNEL);
        assert_eq!(channel_for(u32::MAX), UNKNOWN_CHANNEL);
    }

    #[test]
    fn band_classification_matches_channel_ranges() {
        assert_eq!(Band::from_frequency_khz(mhz(2412)), Some(Band::TwoPointFour));
        assert_eq!(Band::from_frequency_khz(mhz(2484)), Some(Band::TwoPointFour));
        assert_eq!(Band::from_frequency_khz(mhz(5500)), Some(Band::Five));
        assert_eq!(Band::from_frequency_khz(mhz(6000)), Some(Band::Six));
        assert_eq!(Band::from_frequency_khz(mhz(5900)), None);
        assert_eq!(Band::from_frequency_khz(3_000_000), None);
    }
}
