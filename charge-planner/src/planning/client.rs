//! HTTP client for the trip planning service.

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::client_config::ClientConfig;
use crate::wire::{ErrorResponse, PlanRequestBody, TripBody};

use super::PlanningService;
use super::error::PlanningError;
use super::request::{TripPlanRequest, TripPlanResult};

/// Client for the trip planning service.
///
/// Each call is independent: no retries and no caching. Callers that need
/// a retry policy wrap the client.
#[derive(Debug, Clone)]
pub struct TripPlanningClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl TripPlanningClient {
    pub fn new(config: ClientConfig) -> Result<Self, PlanningError> {
        let http = config.http_client()?;
        Ok(Self { http, config })
    }

    /// Plan a trip.
    ///
    /// The request is validated before anything is sent; a validation
    /// failure is `InvalidInput` and makes no remote call.
    pub async fn plan(&self, request: &TripPlanRequest) -> Result<TripPlanResult, PlanningError> {
        request.validate()?;

        let url = self.config.endpoint("trips/plan");
        debug!(
            %url,
            origin = %request.origin,
            destination = %request.destination,
            vehicle = %request.vehicle_model,
            charge = request.current_charge,
            "requesting trip plan"
        );

        let response = self
            .http
            .post(&url)
            .json(&PlanRequestBody::from(request))
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "planning service unreachable"))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the service's own error message when it sent one.
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            warn!(status = status.as_u16(), %message, "planning service rejected request");
            return Err(PlanningError::ServiceFailure {
                status: Some(status.as_u16()),
                message,
            });
        }

        let body = response.text().await?;
        let trip: TripBody = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "malformed plan response");
            PlanningError::service(format!("malformed plan response: {e}"))
        })?;
        let result = TripPlanResult::try_from(trip)
            .map_err(|m| PlanningError::service(format!("malformed plan response: {m}")))?;

        debug!(
            stops = result.stops.len(),
            distance_km = result.total_distance_km,
            "trip plan received"
        );
        Ok(result)
    }
}

impl PlanningService for TripPlanningClient {
    fn plan<'a>(
        &'a self,
        request: &'a TripPlanRequest,
    ) -> BoxFuture<'a, Result<TripPlanResult, PlanningError>> {
        TripPlanningClient::plan(self, request).boxed()
    }
}
