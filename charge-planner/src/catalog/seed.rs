//! Loading a station snapshot from a local JSON file.

use std::path::Path;

use tracing::info;

use crate::domain::Station;

use super::error::CatalogError;
use super::snapshot::build_snapshot;

/// Read a JSON array of station records from `path`.
///
/// Invalid records are dropped the same way as for a remote fetch.
pub fn load_station_file(path: impl AsRef<Path>) -> Result<Vec<Station>, CatalogError> {
    let path = path.as_ref();
    let io_error = |message: String| CatalogError::Io {
        path: path.to_path_buf(),
        message,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| io_error(e.to_string()))?;
    let elements: Vec<serde_json::Value> =
        serde_json::from_str(&contents).map_err(|e| io_error(e.to_string()))?;

    let stations = build_snapshot(elements);
    info!(path = %path.display(), count = stations.len(), "loaded station file");
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "a", "name": "A", "location": {"lat": 1, "lng": 2},
                 "stalls": 4, "available": 2, "power": 150, "amenities": ["wifi"]},
                {"id": "b", "name": "B", "location": {"lat": 3, "lng": 4},
                 "stalls": 0, "available": 0, "power": 150}
            ]"#,
        )
        .unwrap();

        let stations = load_station_file(&path).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id().as_str(), "a");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_station_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_station_file(&path),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn bundled_seed_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/stations.json");
        let stations = load_station_file(path).unwrap();
        assert_eq!(stations.len(), 12);
    }
}
