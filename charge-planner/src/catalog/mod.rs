//! Station catalog: the snapshot, its remote source, and local seed files.

mod client;
mod error;
mod seed;
mod snapshot;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use seed::load_station_file;
pub use snapshot::StationCatalog;
