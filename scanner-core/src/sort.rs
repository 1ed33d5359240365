//! 表格排序：按列和方向比较两条接入点记录。

use crate::structs::AccessPoint;
use serde::Deserialize;
use std::cmp::Ordering;

/// Table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    #[default]
    Ssid,
    Bssid,
    Channel,
    Signal,
}

impl SortColumn {
    /// Maps a table column index (0 = SSID .. 3 = Signal) to a column.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SortColumn::Ssid),
            1 => Some(SortColumn::Bssid),
            2 => Some(SortColumn::Channel),
            3 => Some(SortColumn::Signal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// Text columns compare raw bytes, numeric columns compare values.
/// `Descending` reverses the result.
pub fn compare(
    a: &AccessPoint,
    b: &AccessPoint,
    column: SortColumn,
    direction: SortDirection,
) -> Ordering {
    let ord = match column {
        SortColumn::Ssid => a.ssid.as_bytes().cmp(b.ssid.as_bytes()),
        SortColumn::Bssid => a.bssid.as_bytes().cmp(b.bssid.as_bytes()),
        SortColumn::Channel => a.channel.cmp(&b.channel),
        SortColumn::Signal => a.signal.cmp(&b.signal),
    };
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Stable sort: equal records keep their input order.
pub fn sort_records(records: &mut [AccessPoint], spec: SortSpec) {
    records.sort_by(|a, b| compare(a, b, spec.column, spec.direction));
}
