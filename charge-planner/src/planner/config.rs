//! Parameters of the reference planner.

/// Configuration parameters for the reference planner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Distance covered on a full battery (km).
    pub range_km: f64,

    /// Average driving speed (km/h), used for the time estimate.
    pub average_speed_kmh: f64,

    /// Charge a single stop is assumed to add when counting stops (%).
    pub charge_per_stop_pct: f64,

    /// Charge assumed consumed between stops, subtracted on arrival (%).
    pub arrival_drain_pct: u8,

    /// Arrival charge never planned below this (%).
    pub min_arrival_pct: u8,

    /// Charge added during one charging session (%).
    pub session_gain_pct: u8,

    /// Departure charge never planned above this (%).
    pub max_departure_pct: u8,

    /// Charging minutes per percent gained.
    pub minutes_per_pct: f64,
}

impl PlannerConfig {
    /// Battery percent used per kilometre.
    pub fn pct_per_km(&self) -> f64 {
        100.0 / self.range_km
    }

    /// Hours spent driving `distance_km`.
    pub fn drive_hours(&self, distance_km: f64) -> f64 {
        distance_km / self.average_speed_kmh
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            range_km: 400.0,
            average_speed_kmh: 80.0,
            charge_per_stop_pct: 80.0,
            arrival_drain_pct: 20,
            min_arrival_pct: 15,
            session_gain_pct: 60,
            max_departure_pct: 95,
            minutes_per_pct: 0.75,
        }
    }
}
