//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_ADDR: &str = "127.0.0.1:8001";
/// The seed bundled with the package, independent of the working directory.
const DEFAULT_STATION_DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/stations.json");

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

/// Configuration for the reference HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on (`CHARGE_PLANNER_ADDR`)
    pub addr: SocketAddr,
    /// JSON station seed file (`STATION_DATA`); relative paths resolve
    /// against the working directory
    pub station_data: PathBuf,
    /// Allowed CORS origins, comma separated (`CORS_ORIGINS`)
    pub cors_origins: CorsOrigins,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_raw = lookup("CHARGE_PLANNER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw.parse().map_err(|_| ConfigError {
            var: "CHARGE_PLANNER_ADDR",
            value: addr_raw.clone(),
        })?;

        let station_data = lookup("STATION_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATION_DATA));

        let cors_origins = match lookup("CORS_ORIGINS") {
            None => CorsOrigins::Any,
            Some(raw) => parse_origins(&raw),
        };

        Ok(Self {
            addr,
            station_data,
            cors_origins,
        })
    }
}

fn parse_origins(raw: &str) -> CorsOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}
