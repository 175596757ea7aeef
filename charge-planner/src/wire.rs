//! JSON shapes exchanged with the catalog source and the planning service.
//!
//! These records are the contract between the engine's clients and any
//! conforming service (including the reference one in [`crate::web`]).
//! Conversions into domain types re-check every invariant.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Address, Amenity, GeoPoint, Station, StationError, StationId, StationParts, TimeRange,
    VehicleModel,
};
use crate::planning::{ChargingStop, PlanningError, TripPlanRequest, TripPlanResult};

/// A busy period as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeRecord {
    pub start: String,
    pub end: String,
}

/// A station as served by the catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub stalls: u32,
    pub available: u32,
    pub power: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub busy_hours: Vec<TimeRangeRecord>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

impl TryFrom<StationRecord> for Station {
    type Error = StationError;

    fn try_from(r: StationRecord) -> Result<Self, Self::Error> {
        let amenities = r
            .amenities
            .iter()
            .map(|a| a.parse::<Amenity>())
            .collect::<Result<_, _>>()?;
        let busy_hours = r
            .busy_hours
            .iter()
            .map(|h| TimeRange::parse_hhmm(&h.start, &h.end))
            .collect::<Result<_, _>>()?;

        Station::new(StationParts {
            id: StationId::new(r.id)?,
            name: r.name,
            address: Address {
                street: r.address,
                city: r.city,
                state: r.state,
            },
            location: r.location,
            stalls: r.stalls,
            available: r.available,
            power_kw: r.power,
            amenities,
            busy_hours,
        })
    }
}

impl From<&Station> for StationRecord {
    fn from(s: &Station) -> Self {
        StationRecord {
            id: s.id().to_string(),
            name: s.name().to_string(),
            location: s.location(),
            stalls: s.stalls(),
            available: s.available(),
            power: s.power_kw(),
            amenities: s.amenities().iter().map(|a| a.key().to_string()).collect(),
            busy_hours: s
                .busy_hours()
                .iter()
                .map(|r| TimeRangeRecord {
                    start: r.start.format("%H:%M").to_string(),
                    end: r.end.format("%H:%M").to_string(),
                })
                .collect(),
            address: s.address().street.clone(),
            city: s.address().city.clone(),
            state: s.address().state.clone(),
        }
    }
}

/// Body of a plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequestBody {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub vehicle_model: String,
    pub current_charge: i64,
}

impl From<&TripPlanRequest> for PlanRequestBody {
    fn from(r: &TripPlanRequest) -> Self {
        PlanRequestBody {
            origin: r.origin,
            destination: r.destination,
            vehicle_model: r.vehicle_model.name().to_string(),
            current_charge: i64::from(r.current_charge),
        }
    }
}

impl TryFrom<PlanRequestBody> for TripPlanRequest {
    type Error = PlanningError;

    fn try_from(b: PlanRequestBody) -> Result<Self, Self::Error> {
        let vehicle_model: VehicleModel = b
            .vehicle_model
            .parse()
            .map_err(|e| PlanningError::InvalidInput(format!("{e}")))?;
        let current_charge = u8::try_from(b.current_charge)
            .ok()
            .filter(|c| *c <= 100)
            .ok_or_else(|| {
                PlanningError::InvalidInput(format!(
                    "current charge must be 0-100%, got {}",
                    b.current_charge
                ))
            })?;

        Ok(TripPlanRequest {
            origin: b.origin,
            destination: b.destination,
            vehicle_model,
            current_charge,
        })
    }
}

/// One charging stop in a plan response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRecord {
    pub supercharger_id: String,
    pub name: String,
    pub location: GeoPoint,
    pub arrival_charge: u8,
    pub departure_charge: u8,
    /// Minutes spent charging.
    pub charging_time: u32,
}

/// Body of a successful plan response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripBody {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub vehicle_model: String,
    pub current_charge: u8,
    pub stops: Vec<StopRecord>,
    /// Kilometres.
    pub total_distance: f64,
    /// Hours, including charging time.
    pub total_time: f64,
}

impl From<&TripPlanResult> for TripBody {
    fn from(r: &TripPlanResult) -> Self {
        TripBody {
            origin: r.origin,
            destination: r.destination,
            vehicle_model: r.vehicle_model.name().to_string(),
            current_charge: r.starting_charge,
            stops: r
                .stops
                .iter()
                .map(|s| StopRecord {
                    supercharger_id: s.station_id.to_string(),
                    name: s.name.clone(),
                    location: s.location,
                    arrival_charge: s.arrival_charge,
                    departure_charge: s.departure_charge,
                    charging_time: s.charging_minutes,
                })
                .collect(),
            total_distance: r.total_distance_km,
            total_time: r.total_time_hours,
        }
    }
}

impl TryFrom<TripBody> for TripPlanResult {
    /// Description of what is malformed.
    type Error = String;

    fn try_from(b: TripBody) -> Result<Self, Self::Error> {
        if !(b.total_distance.is_finite() && b.total_distance >= 0.0) {
            return Err(format!("invalid total distance {}", b.total_distance));
        }
        if !(b.total_time.is_finite() && b.total_time >= 0.0) {
            return Err(format!("invalid total time {}", b.total_time));
        }
        let current_charge = percent("current charge", b.current_charge)?;
        let vehicle_model = b.vehicle_model.parse().map_err(|e| format!("{e}"))?;
        let stops = b
            .stops
            .into_iter()
            .map(|s| {
                percent("arrival charge", s.arrival_charge)?;
                percent("departure charge", s.departure_charge)?;
                Ok(ChargingStop {
                    station_id: StationId::new(s.supercharger_id).map_err(|e| e.to_string())?,
                    name: s.name,
                    location: s.location,
                    arrival_charge: s.arrival_charge,
                    departure_charge: s.departure_charge,
                    charging_minutes: s.charging_time,
                })
            })
            .collect::<Result<_, String>>()?;

        Ok(TripPlanResult {
            origin: b.origin,
            destination: b.destination,
            vehicle_model,
            starting_charge: current_charge,
            stops,
            total_distance_km: b.total_distance,
            total_time_hours: b.total_time,
        })
    }
}

fn percent(what: &str, value: u8) -> Result<u8, String> {
    if value > 100 {
        return Err(format!("{what} {value}% is above 100%"));
    }
    Ok(value)
}

/// Error body returned by the reference service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::Tier;

    const FREMONT: &str = r#"{
        "id": "fremont",
        "name": "San Francisco - Fremont Supercharger",
        "location": {"lat": 37.5483, "lng": -121.9886},
        "stalls": 24,
        "available": 18,
        "power": 250,
        "amenities": ["restrooms", "food", "wifi", "shopping"],
        "busyHours": [{"start": "08:00", "end": "10:00"}, {"start": "17:00", "end": "19:00"}],
        "address": "46900 Fremont Blvd",
        "city": "Fremont",
        "state": "CA"
    }"#;

    #[test]
    fn station_record_converts() {
        let record: StationRecord = serde_json::from_str(FREMONT).unwrap();
        let station = Station::try_from(record).unwrap();

        assert_eq!(station.id().as_str(), "fremont");
        assert_eq!(station.power_kw(), 250.0);
        assert_eq!(station.amenities().len(), 4);
        assert!(!station.has_amenity(Amenity::Lounge));
        assert_eq!(station.busy_hours().len(), 2);
        assert_eq!(station.address().state, "CA");
        assert_eq!(station.availability().tier, Tier::Good);
    }

    #[test]
    fn station_record_rejects_unknown_amenity() {
        let mut record: StationRecord = serde_json::from_str(FREMONT).unwrap();
        record.amenities.push("spa".to_string());
        assert!(matches!(
            Station::try_from(record),
            Err(StationError::UnknownAmenity(_))
        ));
    }

    #[test]
    fn station_record_rejects_overfull() {
        let mut record: StationRecord = serde_json::from_str(FREMONT).unwrap();
        record.available = 30;
        assert!(matches!(
            Station::try_from(record),
            Err(StationError::AvailableExceedsStalls { .. })
        ));
    }

    #[test]
    fn station_record_survives_conversion_back() {
        let record: StationRecord = serde_json::from_str(FREMONT).unwrap();
        let station = Station::try_from(record).unwrap();
        let back = StationRecord::from(&station);
        assert_eq!(back.busy_hours[1].start, "17:00");
        assert_eq!(Station::try_from(back).unwrap(), station);
    }

    #[test]
    fn plan_request_body_validates() {
        let body: PlanRequestBody = serde_json::from_value(serde_json::json!({
            "origin": {"lat": 37.7749, "lng": -122.4194},
            "destination": {"lat": 34.0522, "lng": -118.2437},
            "vehicleModel": "Model Y",
            "currentCharge": 80
        }))
        .unwrap();
        let req = TripPlanRequest::try_from(body.clone()).unwrap();
        assert_eq!(req.vehicle_model, VehicleModel::ModelY);
        assert_eq!(req.current_charge, 80);

        let bad_model = PlanRequestBody {
            vehicle_model: "Roadster".to_string(),
            ..body.clone()
        };
        assert!(matches!(
            TripPlanRequest::try_from(bad_model),
            Err(PlanningError::InvalidInput(_))
        ));

        for charge in [-1, 101] {
            let bad_charge = PlanRequestBody {
                current_charge: charge,
                ..body.clone()
            };
            assert!(matches!(
                TripPlanRequest::try_from(bad_charge),
                Err(PlanningError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn trip_body_ignores_extra_fields() {
        let body: TripBody = serde_json::from_value(serde_json::json!({
            "id": "4f1c",
            "origin": {"lat": 37.7749, "lng": -122.4194},
            "destination": {"lat": 34.0522, "lng": -118.2437},
            "vehicleModel": "Model 3 Long Range",
            "currentCharge": 20,
            "stops": [{
                "superchargerId": "fremont",
                "arrivalCharge": 15,
                "departureCharge": 75,
                "chargingTime": 45,
                "name": "Fremont",
                "location": {"lat": 37.5483, "lng": -121.9886}
            }],
            "totalDistance": 559.1,
            "totalTime": 7.74
        }))
        .unwrap();
        let result = TripPlanResult::try_from(body).unwrap();
        assert_eq!(result.stops.len(), 1);
        assert_eq!(result.stops[0].charging_minutes, 45);
        assert_eq!(result.starting_charge, 20);
    }

    #[test]
    fn trip_body_rejects_negative_totals() {
        let body = TripBody {
            origin: GeoPoint::new(0.0, 0.0).unwrap(),
            destination: GeoPoint::new(1.0, 1.0).unwrap(),
            vehicle_model: "Model S".to_string(),
            current_charge: 50,
            stops: Vec::new(),
            total_distance: -3.0,
            total_time: 1.0,
        };
        assert!(TripPlanResult::try_from(body).is_err());
    }

    #[test]
    fn trip_body_rejects_charges_above_full() {
        let stop = StopRecord {
            supercharger_id: "fremont".to_string(),
            name: "Fremont".to_string(),
            location: GeoPoint::new(37.5483, -121.9886).unwrap(),
            arrival_charge: 15,
            departure_charge: 75,
            charging_time: 45,
        };
        let body = TripBody {
            origin: GeoPoint::new(37.7749, -122.4194).unwrap(),
            destination: GeoPoint::new(34.0522, -118.2437).unwrap(),
            vehicle_model: "Model S".to_string(),
            current_charge: 20,
            stops: vec![stop.clone()],
            total_distance: 559.1,
            total_time: 7.7,
        };
        assert!(TripPlanResult::try_from(body.clone()).is_ok());

        let overfull_start = TripBody {
            current_charge: 101,
            ..body.clone()
        };
        let err = TripPlanResult::try_from(overfull_start).unwrap_err();
        assert!(err.contains("current charge"));

        let overfull_arrival = TripBody {
            stops: vec![StopRecord {
                arrival_charge: 120,
                ..stop.clone()
            }],
            ..body.clone()
        };
        assert!(TripPlanResult::try_from(overfull_arrival).is_err());

        let overfull_departure = TripBody {
            stops: vec![StopRecord {
                departure_charge: 255,
                ..stop
            }],
            ..body
        };
        let err = TripPlanResult::try_from(overfull_departure).unwrap_err();
        assert!(err.contains("departure charge"));
    }
}
