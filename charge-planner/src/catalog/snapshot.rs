//! The in-memory station snapshot.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use crate::domain::{Station, StationId};
use crate::wire::StationRecord;

/// The full set of known stations.
///
/// The snapshot is only ever replaced wholesale; individual stations are
/// never edited locally, since occupancy is owned by the catalog source.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: Vec<Station>,
}

impl StationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole working set.
    pub fn load(&mut self, stations: Vec<Station>) {
        self.stations = stations;
    }

    /// Every station, in snapshot order.
    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Validate a JSON station list into stations.
///
/// Each element is decoded on its own, so an element that is not a
/// station record, breaks a station invariant, or repeats an id already
/// seen is dropped with a warning; the rest keep their source order.
pub(crate) fn build_snapshot(elements: Vec<Value>) -> Vec<Station> {
    let mut seen = HashSet::new();
    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let id = element
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("<missing>")
                .to_string();
            let record: StationRecord = match serde_json::from_value(element) {
                Ok(record) => record,
                Err(e) => {
                    warn!(index, station = %id, error = %e, "dropping undecodable station record");
                    return None;
                }
            };
            match Station::try_from(record) {
                Ok(station) if seen.insert(station.id().clone()) => Some(station),
                Ok(_) => {
                    warn!(station = %id, "dropping duplicate station id");
                    None
                }
                Err(e) => {
                    warn!(station = %id, error = %e, "dropping invalid station record");
                    None
                }
            }
        })
        .collect()
}
