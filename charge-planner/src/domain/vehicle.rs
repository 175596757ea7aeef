//! Supported vehicle models.

use std::fmt;
use std::str::FromStr;

/// Error returned for a vehicle model name outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported vehicle model {0:?}")]
pub struct UnknownVehicleModel(pub String);

/// A vehicle model the planning service accepts.
///
/// Models are identified on the wire by their exact display name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VehicleModel {
    #[default]
    Model3LongRange,
    Model3Performance,
    ModelS,
    ModelX,
    ModelY,
}

impl VehicleModel {
    pub const ALL: [VehicleModel; 5] = [
        VehicleModel::Model3LongRange,
        VehicleModel::Model3Performance,
        VehicleModel::ModelS,
        VehicleModel::ModelX,
        VehicleModel::ModelY,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VehicleModel::Model3LongRange => "Model 3 Long Range",
            VehicleModel::Model3Performance => "Model 3 Performance",
            VehicleModel::ModelS => "Model S",
            VehicleModel::ModelX => "Model X",
            VehicleModel::ModelY => "Model Y",
        }
    }
}

impl fmt::Display for VehicleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleModel {
    type Err = UnknownVehicleModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleModel::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnknownVehicleModel(s.to_string()))
    }
}
