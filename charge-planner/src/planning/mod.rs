//! Trip planning against an external planning service.
//!
//! The engine never decides which stations to stop at; it validates the
//! request, sends it to a [`PlanningService`] and keeps only the outcome of
//! the most recently issued request (see [`PlanSequencer`]).

mod client;
mod error;
mod request;
mod sequence;

use futures::future::BoxFuture;

pub use client::TripPlanningClient;
pub use error::PlanningError;
pub use request::{ChargingStop, TripPlanRequest, TripPlanResult};
pub use sequence::{PlanSequencer, PlanTicket};

/// Anything that can answer a plan request.
///
/// [`TripPlanningClient`] is the HTTP implementation; tests substitute
/// in-process planners.
pub trait PlanningService: Send + Sync {
    fn plan<'a>(
        &'a self,
        request: &'a TripPlanRequest,
    ) -> BoxFuture<'a, Result<TripPlanResult, PlanningError>>;
}
