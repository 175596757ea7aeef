//! Charging stop selection for the reference planner.
//!
//! The planner answers one question: given the straight-line distance and
//! the starting charge, how many top-ups are needed, and at which stations?
//! Stations are taken nearest-to-origin first.

use tracing::debug;

use crate::domain::Station;
use crate::planning::{ChargingStop, TripPlanRequest, TripPlanResult};

use super::config::PlannerConfig;

/// Plan a trip over `stations`.
///
/// A trip within range of the starting charge has no stops. Otherwise the
/// number of stops is the charge deficit divided by the charge one stop
/// adds, rounded up, capped by how many stations exist.
pub fn plan_route(
    config: &PlannerConfig,
    request: &TripPlanRequest,
    stations: &[Station],
) -> TripPlanResult {
    let distance_km = request.origin.distance_km(&request.destination);
    let needed_pct = distance_km * config.pct_per_km();
    let starting = f64::from(request.current_charge);

    let stops = if needed_pct > starting {
        let stop_count = ((needed_pct - starting) / config.charge_per_stop_pct).ceil() as usize;
        charging_stops(config, request, stations, stop_count)
    } else {
        Vec::new()
    };

    let charging_mins: u32 = stops.iter().map(|s| s.charging_minutes).sum();
    let total_time_hours = config.drive_hours(distance_km) + f64::from(charging_mins) / 60.0;

    debug!(
        distance_km,
        stops = stops.len(),
        total_time_hours,
        "planned route"
    );

    TripPlanResult {
        origin: request.origin,
        destination: request.destination,
        vehicle_model: request.vehicle_model,
        starting_charge: request.current_charge,
        stops,
        total_distance_km: distance_km,
        total_time_hours,
    }
}

fn charging_stops(
    config: &PlannerConfig,
    request: &TripPlanRequest,
    stations: &[Station],
    count: usize,
) -> Vec<ChargingStop> {
    let mut nearest: Vec<(f64, &Station)> = stations
        .iter()
        .map(|s| (request.origin.distance_km(&s.location()), s))
        .collect();
    nearest.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut charge = request.current_charge;
    nearest
        .into_iter()
        .take(count)
        .map(|(_, station)| {
            let arrival = charge
                .saturating_sub(config.arrival_drain_pct)
                .max(config.min_arrival_pct);
            let departure = arrival
                .saturating_add(config.session_gain_pct)
                .min(config.max_departure_pct);
            let gained = f64::from(departure.saturating_sub(arrival));
            let charging_minutes = (gained * config.minutes_per_pct).floor() as u32;
            charge = departure;

            ChargingStop {
                station_id: station.id().clone(),
                name: station.name().to_string(),
                location: station.location(),
                arrival_charge: arrival,
                departure_charge: departure,
                charging_minutes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::station_at;
    use crate::domain::{GeoPoint, VehicleModel};

    fn request(from: (f64, f64), to: (f64, f64), charge: u8) -> TripPlanRequest {
        TripPlanRequest {
            origin: GeoPoint::new(from.0, from.1).unwrap(),
            destination: GeoPoint::new(to.0, to.1).unwrap(),
            vehicle_model: VehicleModel::Model3LongRange,
            current_charge: charge,
        }
    }

    fn west_coast() -> Vec<Station> {
        vec![
            station_at("bellevue", 47.6101, -122.2015),
            station_at("fremont", 37.5483, -121.9886),
            station_at("portland", 45.5152, -122.6784),
            station_at("santa-monica", 34.0195, -118.4912),
        ]
    }

    const SF: (f64, f64) = (37.7749, -122.4194);
    const LA: (f64, f64) = (34.0522, -118.2437);
    const OAKLAND: (f64, f64) = (37.8044, -122.2712);

    #[test]
    fn short_trip_needs_no_stops() {
        let result = plan_route(&PlannerConfig::default(), &request(SF, OAKLAND, 50), &west_coast());
        assert!(result.is_direct());
        assert!(result.total_distance_km < 20.0);
        assert_eq!(result.total_time_hours, result.total_distance_km / 80.0);
    }

    #[test]
    fn sf_to_la_on_low_charge() {
        // ~559 km needs ~140%; from 20% that is a 120% deficit, two stops.
        let result = plan_route(&PlannerConfig::default(), &request(SF, LA, 20), &west_coast());
        assert_eq!(result.stops.len(), 2);

        // Nearest to San Francisco first.
        assert_eq!(result.stops[0].station_id.as_str(), "fremont");
        assert_eq!(result.stops[0].arrival_charge, 15);
        assert_eq!(result.stops[0].departure_charge, 75);
        assert_eq!(result.stops[0].charging_minutes, 45);

        assert_eq!(result.stops[1].arrival_charge, 55);
        assert_eq!(result.stops[1].departure_charge, 95);
        assert_eq!(result.stops[1].charging_minutes, 30);

        let expected = result.total_distance_km / 80.0 + 75.0 / 60.0;
        assert!((result.total_time_hours - expected).abs() < 1e-9);
    }

    #[test]
    fn stop_count_capped_by_catalog() {
        // SF to Miami is far beyond what four stations can cover.
        let result = plan_route(
            &PlannerConfig::default(),
            &request(SF, (25.7907, -80.1300), 10),
            &west_coast(),
        );
        assert_eq!(result.stops.len(), 4);
    }

    #[test]
    fn empty_catalog_gives_direct_result() {
        let result = plan_route(&PlannerConfig::default(), &request(SF, LA, 5), &[]);
        assert!(result.stops.is_empty());
        assert!(result.total_distance_km > 0.0);
    }

    #[test]
    fn echoes_request() {
        let req = request(SF, LA, 90);
        let result = plan_route(&PlannerConfig::default(), &req, &west_coast());
        assert_eq!(result.origin, req.origin);
        assert_eq!(result.destination, req.destination);
        assert_eq!(result.vehicle_model, req.vehicle_model);
        assert_eq!(result.starting_charge, 90);
    }

    #[test]
    fn identical_endpoints_are_a_zero_length_trip() {
        let result = plan_route(&PlannerConfig::default(), &request(SF, SF, 0), &west_coast());
        assert!(result.is_direct());
        assert_eq!(result.total_distance_km, 0.0);
        assert_eq!(result.total_time_hours, 0.0);
    }
}
