//! Deep Space Network snapshot data types

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Signal direction relative to the ground station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Transmission from the ground to the spacecraft
    Up,
    /// Reception from the spacecraft
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `<upSignal>` / `<downSignal>` element as read from the telemetry feed,
/// before filtering and formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSignalRecord {
    pub direction: Direction,
    /// `active="true"` on the element
    pub active: bool,
    /// Power attribute, verbatim
    pub power: String,
    /// Spacecraft identifier as written in the feed, e.g. "VGR1" or "mro"
    pub spacecraft: String,
    /// Frequency band, e.g. "X", "S", "Ka"
    pub band: String,
    /// Raw `dataRate` attribute (down-links only)
    pub data_rate: Option<String>,
    /// Identifier of the most recent `<station>` preceding the dish
    pub station: String,
}

impl RawSignalRecord {
    pub fn new(direction: Direction, station: &str) -> Self {
        Self {
            direction,
            active: false,
            power: String::new(),
            spacecraft: String::new(),
            band: String::new(),
            data_rate: None,
            station: station.to_string(),
        }
    }
}

/// A normalized signal.
///
/// Every field takes part in equality and hashing, so two signals compare
/// equal exactly when their dedup keys match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Signal {
    pub dir: Direction,
    pub station: String,
    pub band: String,
    /// e.g. "20.0 kW" or "-155.2 dBm"
    pub power: String,
    /// e.g. "160 bps", only present on down-links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_rate: Option<String>,
    /// Resolved display name of the spacecraft
    pub craft: String,
}

/// All signals of one spacecraft, ups first, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Craft {
    pub name: String,
    pub signals: Vec<Signal>,
}

impl Craft {
    /// Number of distinct directions among the craft's signals (0, 1 or 2).
    pub fn direction_count(&self) -> usize {
        let has_up = self.signals.iter().any(|s| s.dir == Direction::Up);
        let has_down = self.signals.iter().any(|s| s.dir == Direction::Down);
        usize::from(has_up) + usize::from(has_down)
    }

    /// Icon variant, e.g. "dsn-2.png" for a craft with both up- and down-links.
    pub fn icon(&self) -> String {
        format!("dsn-{}.png", self.direction_count())
    }

    pub fn has_signal_at(&self, station_id: &str) -> bool {
        self.signals.iter().any(|s| s.station == station_id)
    }
}

impl Serialize for Craft {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Craft", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("icon", &self.icon())?;
        state.serialize_field("signals", &self.signals)?;
        state.end()
    }
}

/// A ground station with the crafts it is currently talking to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    pub name: String,
    pub icon: String,
    /// Alphabetical by craft name
    pub crafts: Vec<Craft>,
}

/// The full snapshot served at `/api/dsn`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DsnSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Madrid, Goldstone, Canberra
    pub stations: Vec<Station>,
    /// RFC 3339 UTC, e.g. "2026-10-15T08:30:00Z"
    pub updated_at: String,
}
