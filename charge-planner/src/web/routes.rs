//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{debug, error, info, warn};

use crate::config::CorsOrigins;
use crate::domain::StationId;
use crate::planning::{PlanningError, TripPlanRequest};
use crate::wire::{ErrorResponse, PlanRequestBody, StationRecord, TripBody};

use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState, cors: &CorsOrigins) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api", get(api_info))
        .route("/api/", get(api_info))
        .route("/api/superchargers", get(list_stations))
        .route("/api/superchargers/:id", get(get_station))
        .route("/api/trips/plan", post(plan_trip))
        .layer(cors_layer(cors))
        .with_state(state)
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::from(Any),
        CorsOrigins::List(list) => AllowOrigin::list(list.iter().filter_map(|o| {
            HeaderValue::from_str(o)
                .inspect_err(|_| warn!(origin = %o, "ignoring unparseable CORS origin"))
                .ok()
        })),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[derive(Serialize)]
struct ApiInfo {
    message: &'static str,
}

async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Supercharger Network Explorer API",
    })
}

/// Every station in the catalog.
async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationRecord>> {
    let stations = state
        .planner
        .catalog()
        .all()
        .iter()
        .map(StationRecord::from)
        .collect();
    Json(stations)
}

/// One station by id.
async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationRecord>, AppError> {
    let not_found = || AppError::NotFound {
        message: format!("Supercharger {id} not found"),
    };
    let id = StationId::new(id.clone()).map_err(|_| not_found())?;
    let station = state.planner.catalog().get(&id).ok_or_else(not_found)?;
    Ok(Json(StationRecord::from(station)))
}

/// Plan a trip with the reference planner.
async fn plan_trip(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let body: PlanRequestBody = serde_json::from_slice(&body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(&body), "rejected plan request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;
    let request = TripPlanRequest::try_from(body)?;

    let result = state.planner.plan(&request)?;
    info!(
        origin = %request.origin,
        destination = %request.destination,
        stops = result.stops.len(),
        "planned trip"
    );

    Ok(Json(TripBody::from(&result)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PlanningError> for AppError {
    fn from(e: PlanningError) -> Self {
        match e {
            PlanningError::InvalidInput(message) => AppError::BadRequest { message },
            other => AppError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
