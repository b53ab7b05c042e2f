//! Compact pointer event log
//!
//! One record per sample, `index,device,timestamp_ms,x,y,-1`, with every
//! value truncated to an integer. Fields are separated by `,` and records
//! by `;`.

use crate::plan::Point;

/// Device type written into every record (pointer)
pub const POINTER_DEVICE_TYPE: i64 = 3;

/// Trailing field of every record
pub const RECORD_TERMINATOR: i64 = -1;

/// Serialize samples into the event log format
pub fn serialize(positions: &[Point], times: &[f64]) -> String {
    debug_assert_eq!(positions.len(), times.len());
    positions
        .iter()
        .zip(times)
        .enumerate()
        .map(|(index, (position, &t))| record(index, position, t))
        .collect::<Vec<_>>()
        .join(";")
}

fn record(index: usize, position: &Point, t: f64) -> String {
    format!(
        "{},{},{},{},{},{}",
        index,
        POINTER_DEVICE_TYPE,
        (t * 1000.0) as i64,
        position.x as i64,
        position.y as i64,
        RECORD_TERMINATOR
    )
}
