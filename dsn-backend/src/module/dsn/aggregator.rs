//! Groups signals into crafts.

use std::collections::{HashMap, HashSet};

use super::types::{Craft, Direction, Signal};

/// Group `signals` by craft name.
///
/// Crafts come out in order of first appearance in `signals`. Each craft's
/// own list is ordered ups first (stable) and then deduplicated.
pub fn group_by_craft(signals: Vec<Signal>) -> Vec<Craft> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut crafts: Vec<Craft> = Vec::new();

    for signal in signals {
        let slot = *index.entry(signal.craft.clone()).or_insert_with(|| {
            crafts.push(Craft {
                name: signal.craft.clone(),
                signals: Vec::new(),
            });
            crafts.len() - 1
        });
        crafts[slot].signals.push(signal);
    }

    for craft in &mut crafts {
        order_ups_first(&mut craft.signals);
        dedup_signals(&mut craft.signals);
    }

    crafts
}

/// Move every up-link ahead of every down-link. Signals of the same
/// direction keep their relative order.
pub fn order_ups_first(signals: &mut [Signal]) {
    signals.sort_by_key(|s| s.dir != Direction::Up);
}

/// Drop repeated signals, keeping the first occurrence of each.
pub fn dedup_signals(signals: &mut Vec<Signal>) {
    let mut seen = HashSet::new();
    signals.retain(|s| seen.insert(s.clone()));
}
