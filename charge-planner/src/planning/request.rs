//! Plan request and result types.

use crate::domain::{GeoPoint, StationId, VehicleModel};

use super::error::PlanningError;

/// A request to plan a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlanRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub vehicle_model: VehicleModel,
    /// State of charge at departure, percent.
    pub current_charge: u8,
}

impl TripPlanRequest {
    pub fn new(
        origin: GeoPoint,
        destination: GeoPoint,
        vehicle_model: VehicleModel,
        current_charge: u8,
    ) -> Result<Self, PlanningError> {
        let request = Self {
            origin,
            destination,
            vehicle_model,
            current_charge,
        };
        request.validate()?;
        Ok(request)
    }

    /// Check the constraints that are not enforced by the field types.
    pub fn validate(&self) -> Result<(), PlanningError> {
        if self.current_charge > 100 {
            return Err(PlanningError::InvalidInput(format!(
                "current charge must be 0-100%, got {}",
                self.current_charge
            )));
        }
        Ok(())
    }
}

/// A planned stop at a charging station.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingStop {
    pub station_id: StationId,
    pub name: String,
    pub location: GeoPoint,
    /// Charge on arrival, percent.
    pub arrival_charge: u8,
    /// Charge on departure, percent.
    pub departure_charge: u8,
    pub charging_minutes: u32,
}

/// A successful plan.
///
/// Zero stops is a valid result: the trip needs no charging.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlanResult {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub vehicle_model: VehicleModel,
    pub starting_charge: u8,
    pub stops: Vec<ChargingStop>,
    pub total_distance_km: f64,
    /// Driving plus charging time.
    pub total_time_hours: f64,
}

impl TripPlanResult {
    pub fn is_direct(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn total_charging_minutes(&self) -> u32 {
        self.stops.iter().map(|s| s.charging_minutes).sum()
    }
}
