//! Per-user engine state and the operations the presentation layer calls.
//!
//! All state transitions here are synchronous and in-memory. The only
//! suspending work is the network I/O in [`plan_trip`] and
//! [`refresh_catalog`], which release the session between issuing a
//! request and applying its outcome.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::availability::Availability;
use crate::catalog::{CatalogClient, CatalogError, StationCatalog};
use crate::domain::{
    Amenity, GeoPoint, Station, StationId, UnknownAmenity, VehicleModel, parse_coordinates,
};
use crate::filter::{AmenityFilterState, filtered_view};
use crate::overlay::build_overlay;
use crate::planning::{
    PlanSequencer, PlanTicket, PlanningError, PlanningService, TripPlanRequest, TripPlanResult,
};

/// Starting charge before the user moves the slider.
const DEFAULT_CHARGE: u8 = 80;

/// The station currently focused for detail display.
///
/// Holds its own copy of the station, so a selection survives filter
/// changes and catalog reloads until explicitly cleared.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<Station>,
}

impl SelectionState {
    pub fn select(&mut self, station: Station) {
        self.selected = Some(station);
    }

    pub fn selected(&self) -> Option<&Station> {
        self.selected.as_ref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// A validated request that has been issued but not yet resolved.
#[derive(Debug, Clone)]
pub struct PendingPlan {
    pub ticket: PlanTicket,
    pub request: TripPlanRequest,
}

/// What happened to a resolved plan request.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// The result replaced the current plan.
    Adopted,
    /// The latest request failed; the previous plan, if any, is kept.
    Failed(PlanningError),
    /// A newer request was issued in the meantime; the outcome was dropped.
    Stale,
}

/// State of one user's map and trip planner.
#[derive(Debug)]
pub struct TripSession {
    catalog: StationCatalog,
    filter: AmenityFilterState,
    selection: SelectionState,
    vehicle_model: VehicleModel,
    charge: u8,
    origin_text: String,
    destination_text: String,
    sequencer: PlanSequencer,
    plan: Option<TripPlanResult>,
}

impl Default for TripSession {
    fn default() -> Self {
        Self {
            catalog: StationCatalog::new(),
            filter: AmenityFilterState::new(),
            selection: SelectionState::default(),
            vehicle_model: VehicleModel::default(),
            charge: DEFAULT_CHARGE,
            origin_text: String::new(),
            destination_text: String::new(),
            sequencer: PlanSequencer::new(),
            plan: None,
        }
    }
}

impl TripSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- catalog ----

    /// Replace the station snapshot.
    pub fn load_catalog(&mut self, stations: Vec<Station>) {
        info!(count = stations.len(), "station catalog replaced");
        self.catalog.load(stations);
    }

    /// Apply the outcome of a catalog fetch.
    ///
    /// A failed fetch leaves the previous snapshot in place and is handed
    /// back for the caller to surface.
    pub fn apply_catalog_fetch(
        &mut self,
        fetched: Result<Vec<Station>, CatalogError>,
    ) -> Result<usize, CatalogError> {
        match fetched {
            Ok(stations) => {
                let count = stations.len();
                self.load_catalog(stations);
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, kept = self.catalog.len(), "catalog refresh failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    /// Stations passing the active filter, in catalog order.
    pub fn visible_stations(&self) -> Vec<&Station> {
        filtered_view(&self.catalog, &self.filter)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_stations().len()
    }

    pub fn total_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn classification(&self, id: &StationId) -> Option<Availability> {
        self.catalog.get(id).map(Station::availability)
    }

    // ---- filter ----

    pub fn filter(&self) -> &AmenityFilterState {
        &self.filter
    }

    /// Toggle the amenity named `key`, returning its new state.
    pub fn toggle_amenity(&mut self, key: &str) -> Result<bool, UnknownAmenity> {
        self.filter.toggle_key(key)
    }

    pub fn set_amenity(&mut self, amenity: Amenity, on: bool) {
        self.filter.set(amenity, on);
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    // ---- trip inputs ----

    pub fn vehicle_model(&self) -> VehicleModel {
        self.vehicle_model
    }

    /// Select a vehicle by display name. Unknown names change nothing.
    pub fn set_vehicle_model(&mut self, name: &str) -> Result<(), PlanningError> {
        self.vehicle_model = name
            .parse()
            .map_err(|e| PlanningError::InvalidInput(format!("{e}")))?;
        Ok(())
    }

    pub fn charge(&self) -> u8 {
        self.charge
    }

    /// Record the current charge. Range is checked when a plan is requested.
    pub fn set_charge(&mut self, percent: u8) {
        self.charge = percent;
    }

    pub fn origin_text(&self) -> &str {
        &self.origin_text
    }

    pub fn set_origin_text(&mut self, text: impl Into<String>) {
        self.origin_text = text.into();
    }

    pub fn destination_text(&self) -> &str {
        &self.destination_text
    }

    pub fn set_destination_text(&mut self, text: impl Into<String>) {
        self.destination_text = text.into();
    }

    // ---- planning ----

    /// Validate the current inputs and issue a ticket for a new request.
    ///
    /// On a validation error no ticket is issued, so any request already in
    /// flight stays the latest.
    pub fn begin_plan(&mut self) -> Result<PendingPlan, PlanningError> {
        let origin = parse_point("origin", &self.origin_text)?;
        let destination = parse_point("destination", &self.destination_text)?;
        let request = TripPlanRequest::new(origin, destination, self.vehicle_model, self.charge)?;

        let ticket = self.sequencer.issue();
        debug!(ticket = ticket.sequence(), "issued plan request");
        Ok(PendingPlan { ticket, request })
    }

    /// Apply the outcome of the request identified by `ticket`.
    pub fn finish_plan(
        &mut self,
        ticket: PlanTicket,
        outcome: Result<TripPlanResult, PlanningError>,
    ) -> PlanOutcome {
        if !self.sequencer.is_latest(ticket) {
            debug!(ticket = ticket.sequence(), "discarding stale plan outcome");
            return PlanOutcome::Stale;
        }

        match outcome {
            Ok(result) => {
                info!(
                    stops = result.stops.len(),
                    distance_km = result.total_distance_km,
                    "trip plan adopted"
                );
                self.plan = Some(result);
                PlanOutcome::Adopted
            }
            Err(e) => {
                warn!(error = %e, "trip planning failed, keeping previous plan");
                PlanOutcome::Failed(e)
            }
        }
    }

    pub fn current_plan(&self) -> Option<&TripPlanResult> {
        self.plan.as_ref()
    }

    /// Points of the current route polyline; empty when there is no plan.
    pub fn overlay(&self) -> Vec<GeoPoint> {
        build_overlay(self.plan.as_ref())
    }

    // ---- selection ----

    /// Focus the station with `id`. Returns `None` if it is not in the catalog.
    pub fn select(&mut self, id: &StationId) -> Option<&Station> {
        let station = self.catalog.get(id)?.clone();
        self.selection.select(station);
        self.selection.selected()
    }

    pub fn selected(&self) -> Option<&Station> {
        self.selection.selected()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

fn parse_point(field: &str, text: &str) -> Result<GeoPoint, PlanningError> {
    parse_coordinates(text).map_err(|e| PlanningError::InvalidInput(format!("{field}: {e}")))
}

/// Plan a trip from the session's current inputs.
///
/// Returns `Err` only when local validation fails, in which case nothing is
/// sent. Otherwise the returned [`PlanOutcome`] says whether the result was
/// adopted, failed, or superseded by a newer request.
pub async fn plan_trip<P>(session: &Mutex<TripSession>, planner: &P) -> Result<PlanOutcome, PlanningError>
where
    P: PlanningService + ?Sized,
{
    let pending = session.lock().await.begin_plan()?;
    let outcome = planner.plan(&pending.request).await;
    Ok(session.lock().await.finish_plan(pending.ticket, outcome))
}

/// Fetch a fresh catalog snapshot and apply it to the session.
pub async fn refresh_catalog(
    session: &Mutex<TripSession>,
    client: &CatalogClient,
) -> Result<usize, CatalogError> {
    let fetched = client.fetch_all().await;
    session.lock().await.apply_catalog_fetch(fetched)
}
