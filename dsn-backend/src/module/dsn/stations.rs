//! The three Deep Space Network complexes and per-station craft selection.

use super::types::{Craft, Station};

/// A tracking complex as it appears in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundStation {
    /// Identifier used by `<station name="...">` in the telemetry feed
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Snapshot order. Any other station identifier in the feed is ignored.
pub const GROUND_STATIONS: [GroundStation; 3] = [
    GroundStation { id: "mdscc", name: "Madrid", icon: "flag-mdscc-bw.png" },
    GroundStation { id: "gdscc", name: "Goldstone", icon: "flag-gdscc-bw.png" },
    GroundStation { id: "cdscc", name: "Canberra", icon: "flag-cdscc-bw.png" },
];

/// Crafts with at least one signal at `station_id`, sorted by name.
///
/// The selected crafts keep their full signal list, including signals from
/// other stations.
pub fn select_station(crafts: &[Craft], station_id: &str) -> Vec<Craft> {
    let mut selected: Vec<Craft> = crafts
        .iter()
        .filter(|craft| craft.has_signal_at(station_id))
        .cloned()
        .collect();
    selected.sort_by(|a, b| a.name.cmp(&b.name));
    selected
}

/// Populate every entry of [`GROUND_STATIONS`].
pub fn build_stations(crafts: &[Craft]) -> Vec<Station> {
    GROUND_STATIONS
        .iter()
        .map(|gs| Station {
            name: gs.name.to_string(),
            icon: gs.icon.to_string(),
            crafts: select_station(crafts, gs.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::dsn::types::{Direction, Signal};

    fn craft(name: &str, stations: &[&str]) -> Craft {
        Craft {
            name: name.to_string(),
            signals: stations
                .iter()
                .map(|station| Signal {
                    dir: Direction::Down,
                    station: station.to_string(),
                    band: "X".to_string(),
                    power: "-150 dBm".to_string(),
                    data_rate: Some("40 bps".to_string()),
                    craft: name.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_select_station_sorts_by_name() {
        let crafts = vec![
            craft("Voyager 1", &["gdscc"]),
            craft("Juno", &["gdscc"]),
            craft("MAVEN", &["cdscc"]),
        ];
        let selected = select_station(&crafts, "gdscc");
        let names: Vec<&str> = selected.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Juno", "Voyager 1"]);
    }

    #[test]
    fn test_craft_only_listed_where_it_has_signals() {
        let crafts = vec![craft("Mars Express", &["mdscc"])];
        let stations = build_stations(&crafts);

        assert_eq!(stations[0].name, "Madrid");
        assert_eq!(stations[0].crafts.len(), 1);
        assert!(stations[1].crafts.is_empty());
        assert!(stations[2].crafts.is_empty());
    }

    #[test]
    fn test_multi_station_craft_shows_all_signals_everywhere() {
        let crafts = vec![craft("JWST", &["mdscc", "cdscc"])];
        let stations = build_stations(&crafts);

        assert_eq!(stations[0].crafts[0].signals.len(), 2);
        assert!(stations[1].crafts.is_empty());
        assert_eq!(stations[2].crafts[0].signals.len(), 2);
        assert_eq!(stations[2].crafts[0].signals[0].station, "mdscc");
    }

    #[test]
    fn test_unknown_station_ids_are_ignored() {
        let crafts = vec![craft("Test Craft", &["spdscc"]), craft("Orphan", &[""])];
        let stations = build_stations(&crafts);
        assert!(stations.iter().all(|s| s.crafts.is_empty()));
    }

    #[test]
    fn test_station_order_and_icons() {
        let stations = build_stations(&[]);
        let summary: Vec<(&str, &str)> = stations
            .iter()
            .map(|s| (s.name.as_str(), s.icon.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Madrid", "flag-mdscc-bw.png"),
                ("Goldstone", "flag-gdscc-bw.png"),
                ("Canberra", "flag-cdscc-bw.png"),
            ]
        );
    }
}
