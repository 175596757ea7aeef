//! Station usability classification.
//!
//! Occupancy is reduced to a percentage of free stalls and a coarse tier.
//! The thresholds are fixed so that map colouring and any ranking agree.

use std::fmt;
use std::num::NonZeroU32;

/// Below this percentage of free stalls a station is critical.
const LIMITED_FROM: f64 = 30.0;

/// At or above this percentage of free stalls a station is good.
const GOOD_FROM: f64 = 60.0;

/// Error returned when classifying a station that reports zero stalls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot classify availability: station reports zero stalls")]
pub struct InvalidStalls;

/// Coarse usability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Critical,
    Limited,
    Good,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Critical => "critical",
            Tier::Limited => "limited",
            Tier::Good => "good",
        }
    }

    fn for_ratio(ratio: f64) -> Self {
        if ratio < LIMITED_FROM {
            Tier::Critical
        } else if ratio < GOOD_FROM {
            Tier::Limited
        } else {
            Tier::Good
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-stall ratio (percent, 0..=100 for valid stations) and its tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Availability {
    pub ratio: f64,
    pub tier: Tier,
}

impl Availability {
    pub(crate) fn from_counts(available: u32, stalls: NonZeroU32) -> Self {
        // Scale before dividing so whole-percent boundaries stay exact.
        let ratio = f64::from(available) * 100.0 / f64::from(stalls.get());
        Self {
            ratio,
            tier: Tier::for_ratio(ratio),
        }
    }
}

/// Classify occupancy of `available` free stalls out of `stalls`.
///
/// Fails with [`InvalidStalls`] when `stalls` is zero instead of dividing.
///
/// # Examples
///
/// ```
/// use charge_planner::availability::{Tier, classify};
///
/// assert_eq!(classify(29, 100).unwrap().tier, Tier::Critical);
/// assert_eq!(classify(30, 100).unwrap().tier, Tier::Limited);
/// assert_eq!(classify(60, 100).unwrap().tier, Tier::Good);
/// assert!(classify(0, 0).is_err());
/// ```
pub fn classify(available: u32, stalls: u32) -> Result<Availability, InvalidStalls> {
    let stalls = NonZeroU32::new(stalls).ok_or(InvalidStalls)?;
    Ok(Availability::from_counts(available, stalls))
}
