//! Reference trip planner.
//!
//! A deliberately simple planner backing the bundled HTTP service, so the
//! engine can be exercised end to end. Real deployments point the engine's
//! [`TripPlanningClient`](crate::planning::TripPlanningClient) at their own
//! planning service instead.

mod config;
mod route;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::catalog::StationCatalog;
use crate::planning::{PlanningError, PlanningService, TripPlanRequest, TripPlanResult};

pub use config::PlannerConfig;
pub use route::plan_route;

/// In-process planner over a fixed station catalog.
#[derive(Debug, Clone)]
pub struct LocalPlanner {
    config: PlannerConfig,
    catalog: StationCatalog,
}

impl LocalPlanner {
    pub fn new(config: PlannerConfig, catalog: StationCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(&self, request: &TripPlanRequest) -> Result<TripPlanResult, PlanningError> {
        request.validate()?;
        Ok(plan_route(&self.config, request, self.catalog.all()))
    }
}

impl PlanningService for LocalPlanner {
    fn plan<'a>(
        &'a self,
        request: &'a TripPlanRequest,
    ) -> BoxFuture<'a, Result<TripPlanResult, PlanningError>> {
        futures::future::ready(LocalPlanner::plan(self, request)).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::station_at;
    use crate::session::{PlanOutcome, TripSession, plan_trip};
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn drives_a_session_in_process() {
        let mut catalog = StationCatalog::new();
        catalog.load(vec![station_at("fremont", 37.5483, -121.9886)]);
        let planner = LocalPlanner::new(PlannerConfig::default(), catalog);

        let session = Mutex::new(TripSession::new());
        {
            let mut s = session.lock().await;
            s.set_origin_text("37.7749, -122.4194");
            s.set_destination_text("34.0522, -118.2437");
            s.set_charge(20);
        }

        let outcome = plan_trip(&session, &planner).await.unwrap();
        assert_eq!(outcome, PlanOutcome::Adopted);

        let s = session.lock().await;
        let overlay = s.overlay();
        assert_eq!(overlay.len(), 3);
        assert_eq!(overlay[1], planner.catalog().all()[0].location());
    }

    #[test]
    fn rejects_out_of_range_charge() {
        let planner = LocalPlanner::new(PlannerConfig::default(), StationCatalog::new());
        let request = TripPlanRequest {
            origin: "1, 1".parse().unwrap(),
            destination: "2, 2".parse().unwrap(),
            vehicle_model: Default::default(),
            current_charge: 140,
        };
        assert!(matches!(
            planner.plan(&request),
            Err(PlanningError::InvalidInput(_))
        ));
    }
}
