//! Telemetry stream parser
//!
//! In `dsn.xml`, `<station>` and `<dish>` are flat siblings under `<dsn>`:
//!
//! ```xml
//! <dsn>
//!   <station name="gdscc" friendlyName="Goldstone"/>
//!   <dish name="DSS24">
//!     <upSignal active="true" power="20.0" spacecraft="MRO" band="X"/>
//!     <downSignal active="true" power="-120.5" spacecraft="MRO" band="X" dataRate="2000"/>
//!   </dish>
//!   <station name="mdscc" friendlyName="Madrid"/>
//!   ...
//! </dsn>
//! ```
//!
//! A dish belongs to the last station seen before it, so the document is read
//! as an event stream with the current station identifier as scan state.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::{DishError, ScanError};
use super::types::{Direction, RawSignalRecord};

/// Everything a telemetry scan produced.
#[derive(Debug, Default)]
pub struct TelemetryScan {
    /// Records in document order, tagged with their station
    pub records: Vec<RawSignalRecord>,
    /// Dishes dropped because they could not be decoded
    pub skipped_dishes: usize,
    /// Set when the document broke off before its end; `records` then holds
    /// everything collected up to that point.
    pub halted: Option<ScanError>,
}

/// Scan `data` and collect every up/down-link record.
///
/// Never fails: structural errors stop the scan and are reported through
/// [`TelemetryScan::halted`].
pub fn scan_telemetry(data: &[u8]) -> TelemetryScan {
    let mut scanner = TelemetryScanner::new(data);
    scanner.run();
    scanner.scan
}

struct TelemetryScanner<'a> {
    reader: Reader<&'a [u8]>,
    /// Identifier of the most recent `<station>`, empty before the first one
    station: String,
    scan: TelemetryScan,
}

impl<'a> TelemetryScanner<'a> {
    fn new(data: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(data);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            station: String::new(),
            scan: TelemetryScan::default(),
        }
    }

    fn run(&mut self) {
        if let Err(e) = self.scan_events() {
            tracing::warn!(
                "Telemetry scan stopped at byte {}: {} ({} records kept)",
                self.reader.buffer_position(),
                e,
                self.scan.records.len()
            );
            self.scan.halted = Some(e);
        }
    }

    fn scan_events(&mut self) -> Result<(), ScanError> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"station" => self.enter_station(&e)?,
                    b"dish" => {
                        let dish = decode_dish(&mut self.reader, &self.station)?;
                        self.accept_dish(dish);
                    }
                    _ => {}
                },
                Event::Empty(e) => {
                    // A self-closing <dish/> has no links, nothing to record.
                    if e.local_name().as_ref() == b"station" {
                        self.enter_station(&e)?;
                    }
                }
                Event::Eof => return Ok(()),
                _ => {}
            }
        }
    }

    fn enter_station(&mut self, e: &BytesStart<'_>) -> Result<(), ScanError> {
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
            if attr.key.local_name().as_ref() == b"name" {
                self.station = attr.unescape_value()?.into_owned();
            }
        }
        tracing::trace!("Entering station {}", self.station);
        Ok(())
    }

    fn accept_dish(&mut self, dish: Result<Vec<RawSignalRecord>, DishError>) {
        match dish {
            Ok(mut records) => self.scan.records.append(&mut records),
            Err(e) => {
                tracing::warn!("Skipping malformed dish at station '{}': {}", self.station, e);
                self.scan.skipped_dishes += 1;
            }
        }
    }
}

/// Read the rest of a `<dish>` element, whose start tag was just consumed.
///
/// The outer error means the document itself is broken and scanning must
/// stop. The inner error means only this dish was bad; the reader is left
/// positioned after `</dish>` so scanning can continue.
fn decode_dish(
    reader: &mut Reader<&[u8]>,
    station: &str,
) -> Result<Result<Vec<RawSignalRecord>, DishError>, ScanError> {
    let mut ups = Vec::new();
    let mut downs = Vec::new();
    let mut failure: Option<DishError> = None;
    let mut depth = 1usize;

    loop {
        let (element, nested) = match reader.read_event()? {
            Event::Start(e) => (e, true),
            Event::Empty(e) => (e, false),
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
                continue;
            }
            Event::Eof => return Err(ScanError::TruncatedDish),
            _ => continue,
        };

        // Only direct children of the dish are links.
        if depth == 1 && failure.is_none() {
            let direction = match element.local_name().as_ref() {
                b"upSignal" => Some(Direction::Up),
                b"downSignal" => Some(Direction::Down),
                _ => None,
            };
            if let Some(direction) = direction {
                match decode_link(&element, direction, station) {
                    Ok(record) if direction == Direction::Up => ups.push(record),
                    Ok(record) => downs.push(record),
                    Err(e) => failure = Some(e),
                }
            }
        }

        if nested {
            depth += 1;
        }
    }

    if let Some(e) = failure {
        return Ok(Err(e));
    }

    ups.append(&mut downs);
    Ok(Ok(ups))
}

/// Decode the attributes of one `<upSignal>` / `<downSignal>`.
/// Missing attributes stay empty.
fn decode_link(
    element: &BytesStart<'_>,
    direction: Direction,
    station: &str,
) -> Result<RawSignalRecord, DishError> {
    let mut record = RawSignalRecord::new(direction, station);

    for attr in element.attributes() {
        let attr = attr?;
        match attr.key.local_name().as_ref() {
            b"active" => record.active = attr.unescape_value()? == "true",
            b"power" => record.power = attr.unescape_value()?.into_owned(),
            b"spacecraft" => record.spacecraft = attr.unescape_value()?.into_owned(),
            b"band" => record.band = attr.unescape_value()?.into_owned(),
            b"dataRate" if direction == Direction::Down => {
                record.data_rate = Some(attr.unescape_value()?.into_owned())
            }
            _ => {}
        }
    }

    Ok(record)
}
