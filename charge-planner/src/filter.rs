//! Amenity filtering over the station catalog.
//!
//! A filter is a set of toggled amenity flags. An empty set matches every
//! station; otherwise a station must offer every active amenity.

use crate::catalog::StationCatalog;
use crate::domain::{Amenity, Station, UnknownAmenity};

/// Toggle state for each of the fixed amenity keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmenityFilterState {
    flags: [bool; Amenity::COUNT],
}

impl AmenityFilterState {
    /// A filter with no active flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter with exactly the given amenities active.
    pub fn with_active(amenities: impl IntoIterator<Item = Amenity>) -> Self {
        let mut state = Self::new();
        for a in amenities {
            state.set(a, true);
        }
        state
    }

    pub fn set(&mut self, amenity: Amenity, on: bool) {
        self.flags[amenity.index()] = on;
    }

    /// Flip one flag and return its new value.
    pub fn toggle(&mut self, amenity: Amenity) -> bool {
        let flag = &mut self.flags[amenity.index()];
        *flag = !*flag;
        *flag
    }

    /// Flip the flag named by `key`; unknown keys leave the state untouched.
    pub fn toggle_key(&mut self, key: &str) -> Result<bool, UnknownAmenity> {
        let amenity: Amenity = key.parse()?;
        Ok(self.toggle(amenity))
    }

    pub fn is_active(&self, amenity: Amenity) -> bool {
        self.flags[amenity.index()]
    }

    /// Active amenities in display order.
    pub fn active(&self) -> impl Iterator<Item = Amenity> + '_ {
        Amenity::ALL.into_iter().filter(|a| self.is_active(*a))
    }

    /// Whether no flag is set (the filter passes everything).
    pub fn is_empty(&self) -> bool {
        !self.flags.iter().any(|f| *f)
    }

    pub fn clear(&mut self) {
        self.flags = [false; Amenity::COUNT];
    }
}

/// Whether `station` passes `filter`.
///
/// Unset flags are ignored regardless of what the station offers.
pub fn matches(station: &Station, filter: &AmenityFilterState) -> bool {
    filter.active().all(|a| station.has_amenity(a))
}

/// Stations from `catalog` that pass `filter`, in catalog order.
pub fn filtered_view<'a>(catalog: &'a StationCatalog, filter: &AmenityFilterState) -> Vec<&'a Station> {
    catalog.all().iter().filter(|s| matches(s, filter)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::station;

    #[test]
    fn empty_filter_matches_everything() {
        let filter = AmenityFilterState::new();
        assert!(filter.is_empty());
        assert!(matches(&station("bare", 1, 2, &[]), &filter));
        assert!(matches(&station("full", 1, 2, &Amenity::ALL), &filter));
    }

    #[test]
    fn requires_every_active_flag() {
        let s = station("s", 1, 2, &[Amenity::Food, Amenity::Wifi]);

        let food_and_lounge = AmenityFilterState::with_active([Amenity::Food, Amenity::Lounge]);
        assert!(!matches(&s, &food_and_lounge));

        let food = AmenityFilterState::with_active([Amenity::Food]);
        assert!(matches(&s, &food));

        let food_and_wifi = AmenityFilterState::with_active([Amenity::Food, Amenity::Wifi]);
        assert!(matches(&s, &food_and_wifi));
    }

    #[test]
    fn toggle_flips() {
        let mut f = AmenityFilterState::new();
        assert!(f.toggle(Amenity::Wifi));
        assert!(f.is_active(Amenity::Wifi));
        assert!(!f.toggle(Amenity::Wifi));
        assert!(f.is_empty());
    }

    #[test]
    fn toggle_key_rejects_unknown() {
        let mut f = AmenityFilterState::new();
        assert_eq!(f.toggle_key("lounge"), Ok(true));
        assert_eq!(
            f.toggle_key("pool"),
            Err(UnknownAmenity("pool".to_string()))
        );
        assert_eq!(f, AmenityFilterState::with_active([Amenity::Lounge]));
    }

    #[test]
    fn active_in_display_order() {
        let f = AmenityFilterState::with_active([Amenity::Lounge, Amenity::Restrooms]);
        let active: Vec<_> = f.active().collect();
        assert_eq!(active, vec![Amenity::Restrooms, Amenity::Lounge]);
    }

    #[test]
    fn clear_resets() {
        let mut f = AmenityFilterState::with_active(Amenity::ALL);
        f.clear();
        assert!(f.is_empty());
    }

    #[test]
    fn filtered_view_preserves_order() {
        let mut catalog = StationCatalog::new();
        catalog.load(vec![
            station("a", 1, 2, &[Amenity::Food]),
            station("b", 1, 2, &[]),
            station("c", 1, 2, &[Amenity::Food, Amenity::Shopping]),
        ]);

        let filter = AmenityFilterState::with_active([Amenity::Food]);
        let ids: Vec<_> = filtered_view(&catalog, &filter)
            .iter()
            .map(|s| s.id().as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);

        assert_eq!(filtered_view(&catalog, &AmenityFilterState::new()).len(), 3);
    }
}
