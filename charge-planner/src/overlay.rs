//! Route overlay construction.

use crate::domain::GeoPoint;
use crate::planning::TripPlanResult;

/// The polyline for a plan: origin, each stop in plan order, destination.
///
/// No plan yields an empty polyline, which is a normal state rather than
/// an error.
pub fn build_overlay(result: Option<&TripPlanResult>) -> Vec<GeoPoint> {
    let Some(result) = result else {
        return Vec::new();
    };

    std::iter::once(result.origin)
        .chain(result.stops.iter().map(|s| s.location))
        .chain(std::iter::once(result.destination))
        .collect()
}
