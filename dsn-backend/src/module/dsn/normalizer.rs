//! Turns raw link records into display-ready [`Signal`]s.

use regex::Regex;
use std::sync::LazyLock;

use super::directory::SpacecraftDirectory;
use super::types::{Direction, RawSignalRecord, Signal};

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid leading-integer regex"));

/// Normalize every record, dropping the ones that are not live.
/// Output order follows input order.
pub fn normalize_signals(
    records: &[RawSignalRecord],
    directory: &SpacecraftDirectory,
) -> Vec<Signal> {
    records
        .iter()
        .filter_map(|record| normalize_record(record, directory))
        .collect()
}

/// Up-links need `active` and a power other than the literal "0";
/// down-links only need `active`.
pub fn normalize_record(record: &RawSignalRecord, directory: &SpacecraftDirectory) -> Option<Signal> {
    if !record.active {
        return None;
    }

    let (power, data_rate) = match record.direction {
        Direction::Up => {
            if record.power == "0" {
                return None;
            }
            (format!("{} kW", record.power), None)
        }
        Direction::Down => {
            let rate = format_data_rate(record.data_rate.as_deref().unwrap_or(""));
            (format!("{} dBm", record.power), Some(rate))
        }
    };

    Some(Signal {
        dir: record.direction,
        station: record.station.clone(),
        band: record.band.clone(),
        power,
        data_rate,
        craft: directory.display_name(&record.spacecraft),
    })
}

/// Format a raw `dataRate` attribute (bits per second).
///
/// Only the leading integer counts; anything unparsable is 0. Bucket
/// boundaries are exclusive, so exactly 1000 stays "1000 bps".
pub fn format_data_rate(raw: &str) -> String {
    let baud = parse_leading_integer(raw);

    if baud > 1_000_000 {
        format!("{} Mbps", baud / 1_000_000)
    } else if baud > 1_000 {
        format!("{} kbps", baud / 1_000)
    } else {
        format!("{} bps", baud)
    }
}

fn parse_leading_integer(raw: &str) -> i64 {
    LEADING_INTEGER
        .captures(raw)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .unwrap_or(0)
}
