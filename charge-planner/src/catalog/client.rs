//! Catalog source HTTP client.

use tracing::{debug, warn};

use crate::client_config::ClientConfig;
use crate::domain::Station;

use super::error::CatalogError;
use super::snapshot::build_snapshot;

/// Client for the station catalog source.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> Result<Self, CatalogError> {
        let http = config.http_client()?;
        Ok(Self { http, config })
    }

    /// Fetch the full station list.
    ///
    /// Each successful fetch is a complete snapshot. Individual records that
    /// fail validation are dropped; a body that is not a station list at all
    /// is a `FetchFailure`.
    pub async fn fetch_all(&self) -> Result<Vec<Station>, CatalogError> {
        let url = self.config.endpoint("superchargers");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "catalog source returned an error");
            return Err(CatalogError::FetchFailure {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let body = response.text().await?;

        let elements: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| CatalogError::FetchFailure {
                status: None,
                message: format!("malformed station list: {e}"),
            })?;

        let received = elements.len();
        let stations = build_snapshot(elements);
        debug!(received, kept = stations.len(), "fetched station catalog");

        Ok(stations)
    }
}
