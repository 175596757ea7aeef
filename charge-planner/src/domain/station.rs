//! Charging station types.

use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::NaiveTime;

use crate::availability::Availability;

use super::GeoPoint;

/// Error returned when station data violates an invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StationError {
    #[error("station must have at least one stall")]
    NoStalls,

    #[error("available stalls ({available}) exceed total stalls ({stalls})")]
    AvailableExceedsStalls { available: u32, stalls: u32 },

    #[error("rated power must be a positive number of kW, got {0}")]
    InvalidPower(f64),

    #[error("station id must not be empty")]
    EmptyId,

    #[error("invalid time of day {0:?}: expected HH:MM")]
    InvalidTime(String),

    #[error(transparent)]
    UnknownAmenity(#[from] UnknownAmenity),
}

/// Stable, unique identifier of a station in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Result<Self, StationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(StationError::EmptyId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned for an amenity key outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown amenity {0:?}")]
pub struct UnknownAmenity(pub String);

/// On-site amenity from the fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Amenity {
    Restrooms,
    Food,
    Wifi,
    Shopping,
    Lounge,
}

impl Amenity {
    pub const COUNT: usize = 5;

    /// Every amenity, in display order.
    pub const ALL: [Amenity; Amenity::COUNT] = [
        Amenity::Restrooms,
        Amenity::Food,
        Amenity::Wifi,
        Amenity::Shopping,
        Amenity::Lounge,
    ];

    /// The lowercase key used on the wire and by filter toggles.
    pub fn key(self) -> &'static str {
        match self {
            Amenity::Restrooms => "restrooms",
            Amenity::Food => "food",
            Amenity::Wifi => "wifi",
            Amenity::Shopping => "shopping",
            Amenity::Lounge => "lounge",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Amenity {
    type Err = UnknownAmenity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amenity::ALL
            .into_iter()
            .find(|a| a.key() == s)
            .ok_or_else(|| UnknownAmenity(s.to_string()))
    }
}

/// A busy period during the day.
///
/// The range is half-open (`start <= t < end`). When `end` is earlier than
/// `start` the range wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parse a range from two `HH:MM` strings.
    pub fn parse_hhmm(start: &str, end: &str) -> Result<Self, StationError> {
        Ok(Self::new(parse_hhmm(start)?, parse_hhmm(end)?))
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= t && t < self.end
        } else {
            t >= self.start || t < self.end
        }
    }
}

fn parse_hhmm(s: &str) -> Result<NaiveTime, StationError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| StationError::InvalidTime(s.to_string()))
}

/// A charging location with one or more stalls.
///
/// Invariants (checked by [`Station::new`]): at least one stall, no more
/// available stalls than total stalls, and a positive finite power rating.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    id: StationId,
    name: String,
    address: Address,
    location: GeoPoint,
    stalls: NonZeroU32,
    available: u32,
    power_kw: f64,
    amenities: BTreeSet<Amenity>,
    busy_hours: Vec<TimeRange>,
}

/// Postal address fields of a station.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
}

/// Unvalidated station fields, consumed by [`Station::new`].
#[derive(Debug, Clone)]
pub struct StationParts {
    pub id: StationId,
    pub name: String,
    pub address: Address,
    pub location: GeoPoint,
    pub stalls: u32,
    pub available: u32,
    pub power_kw: f64,
    pub amenities: BTreeSet<Amenity>,
    pub busy_hours: Vec<TimeRange>,
}

impl Station {
    pub fn new(parts: StationParts) -> Result<Self, StationError> {
        let stalls = NonZeroU32::new(parts.stalls).ok_or(StationError::NoStalls)?;
        if parts.available > stalls.get() {
            return Err(StationError::AvailableExceedsStalls {
                available: parts.available,
                stalls: stalls.get(),
            });
        }
        if !(parts.power_kw.is_finite() && parts.power_kw > 0.0) {
            return Err(StationError::InvalidPower(parts.power_kw));
        }

        Ok(Self {
            id: parts.id,
            name: parts.name,
            address: parts.address,
            location: parts.location,
            stalls,
            available: parts.available,
            power_kw: parts.power_kw,
            amenities: parts.amenities,
            busy_hours: parts.busy_hours,
        })
    }

    pub fn id(&self) -> &StationId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn stalls(&self) -> u32 {
        self.stalls.get()
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn power_kw(&self) -> f64 {
        self.power_kw
    }

    pub fn amenities(&self) -> &BTreeSet<Amenity> {
        &self.amenities
    }

    pub fn has_amenity(&self, amenity: Amenity) -> bool {
        self.amenities.contains(&amenity)
    }

    /// Busy periods in source order (not necessarily sorted).
    pub fn busy_hours(&self) -> &[TimeRange] {
        &self.busy_hours
    }

    /// Whether any busy period covers `t`.
    pub fn is_busy_at(&self, t: NaiveTime) -> bool {
        self.busy_hours.iter().any(|r| r.contains(t))
    }

    /// Live usability of this station.
    pub fn availability(&self) -> Availability {
        Availability::from_counts(self.available, self.stalls)
    }
}
