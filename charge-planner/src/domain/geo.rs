//! Geographic points and free-form coordinate parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when text or raw values do not form a valid [`GeoPoint`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The input did not split into exactly two comma-separated parts.
    #[error("expected \"lat, lng\" but found {found} part(s)")]
    WrongArity { found: usize },

    /// One of the parts is not a finite decimal number.
    #[error("not a number: {token:?}")]
    NotANumber { token: String },

    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    #[error("coordinates out of range: lat {lat}, lng {lng}")]
    OutOfRange { lat: f64, lng: f64 },
}

/// A point on the Earth's surface in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180];
/// values outside those domains are rejected rather than clamped.
///
/// # Examples
///
/// ```
/// use charge_planner::domain::GeoPoint;
///
/// let sf: GeoPoint = "37.7749, -122.4194".parse().unwrap();
/// assert_eq!(sf.lat(), 37.7749);
/// assert_eq!(sf.lng(), -122.4194);
///
/// assert!("91, 0".parse::<GeoPoint>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint", into = "RawPoint")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Create a point, checking both coordinates against their domains.
    pub fn new(lat: f64, lng: f64) -> Result<Self, ParseError> {
        if !lat.is_finite() {
            return Err(ParseError::NotANumber {
                token: lat.to_string(),
            });
        }
        if !lng.is_finite() {
            return Err(ParseError::NotANumber {
                token: lng.to_string(),
            });
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(ParseError::OutOfRange { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Great-circle (haversine) distance to `other` in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let (lat1, lng1) = (self.lat.to_radians(), self.lng.to_radians());
        let (lat2, lng2) = (other.lat.to_radians(), other.lng.to_radians());
        let dlat = lat2 - lat1;
        let dlng = lng2 - lng1;

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        // Rounding can push `a` a hair above 1 for antipodal points.
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

impl FromStr for GeoPoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_coordinates(s)
    }
}

/// Parse free-form `"lat, lng"` text into a [`GeoPoint`].
///
/// The input is split on commas and must yield exactly two parts; each part
/// is trimmed and parsed as a decimal number. Semantically invalid input such
/// as `"200, 50"` is an ordinary `Err`, never a panic.
pub fn parse_coordinates(text: &str) -> Result<GeoPoint, ParseError> {
    let parts: Vec<&str> = text.split(',').collect();
    let [lat, lng] = parts.as_slice() else {
        return Err(ParseError::WrongArity { found: parts.len() });
    };

    let lat = parse_degrees(lat)?;
    let lng = parse_degrees(lng)?;
    GeoPoint::new(lat, lng)
}

fn parse_degrees(token: &str) -> Result<f64, ParseError> {
    let token = token.trim();
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::NotANumber {
            token: token.to_string(),
        })
}

/// Unchecked wire form of a point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPoint {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = ParseError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lng)
    }
}

impl From<GeoPoint> for RawPoint {
    fn from(p: GeoPoint) -> Self {
        RawPoint {
            lat: p.lat,
            lng: p.lng,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any in-range pair formatted as text parses back to the same values.
        #[test]
        fn in_range_parses(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let p = parse_coordinates(&format!("{lat}, {lng}")).unwrap();
            prop_assert_eq!(p.lat(), lat);
            prop_assert_eq!(p.lng(), lng);
        }

        /// Latitudes beyond the poles always fail with OutOfRange.
        #[test]
        fn lat_beyond_pole_rejected(lat in 90.0001f64..1.0e6, neg in any::<bool>(), lng in -180.0f64..=180.0) {
            let lat = if neg { -lat } else { lat };
            let result = parse_coordinates(&format!("{lat},{lng}"));
            let is_out_of_range = matches!(result, Err(ParseError::OutOfRange { .. }));
            prop_assert!(is_out_of_range);
        }

        /// Arbitrary text never panics.
        #[test]
        fn never_panics(s in ".*") {
            let _ = parse_coordinates(&s);
        }

        /// Inputs without exactly one comma are always WrongArity.
        #[test]
        fn comma_count_determines_arity(parts in prop::collection::vec("[0-9.]{1,4}", 3..6)) {
            let text = parts.join(",");
            prop_assert_eq!(
                parse_coordinates(&text),
                Err(ParseError::WrongArity { found: parts.len() })
            );
        }
    }
}
