//! Domain types for the charging trip planner.
//!
//! All types enforce their invariants at construction time, so code that
//! receives a `GeoPoint` or `Station` can trust its validity.

mod geo;
mod station;
mod vehicle;

pub use geo::{GeoPoint, ParseError, parse_coordinates};
pub use station::{
    Address, Amenity, Station, StationError, StationId, StationParts, TimeRange, UnknownAmenity,
};
pub use vehicle::{UnknownVehicleModel, VehicleModel};

#[cfg(test)]
pub(crate) use station::test_support;
