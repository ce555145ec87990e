use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the vehicle sits during a given hour of the day.
///
/// Work hours are 08:00-17:59; home hours are 18:00-07:59. Together the two
/// windows cover each of the 24 hours exactly once, so the active tariff and
/// charger limits are always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Home,
    Work,
}

impl Location {
    pub fn at_hour(hour: usize) -> Self {
        if (8..18).contains(&hour) {
            Location::Work
        } else {
            Location::Home
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Home => write!(f, "home"),
            Location::Work => write!(f, "work"),
        }
    }
}

/// Charger power limits at both ends of the commute (kW).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeStationProfile {
    pub home_charge_kw: f64,
    pub work_charge_kw: f64,
    pub home_discharge_kw: f64,
    pub work_discharge_kw: f64,
}

impl Default for ChargeStationProfile {
    fn default() -> Self {
        Self {
            home_charge_kw: 11.0,
            work_charge_kw: 22.0,
            home_discharge_kw: 11.0,
            work_discharge_kw: 22.0,
        }
    }
}

impl ChargeStationProfile {
    pub fn charge_limit_kw(&self, location: Location) -> f64 {
        match location {
            Location::Home => self.home_charge_kw,
            Location::Work => self.work_charge_kw,
        }
    }

    pub fn discharge_limit_kw(&self, location: Location) -> f64 {
        match location {
            Location::Home => self.home_discharge_kw,
            Location::Work => self.work_discharge_kw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HOURS_PER_DAY;
    use rstest::rstest;

    #[rstest]
    #[case(0, Location::Home)]
    #[case(7, Location::Home)]
    #[case(8, Location::Work)]
    #[case(17, Location::Work)]
    #[case(18, Location::Home)]
    #[case(23, Location::Home)]
    fn window_boundaries(#[case] hour: usize, #[case] expected: Location) {
        assert_eq!(Location::at_hour(hour), expected);
    }

    #[test]
    fn every_hour_classifies_exactly_once() {
        let work_hours: Vec<usize> = (0..HOURS_PER_DAY)
            .filter(|&h| Location::at_hour(h) == Location::Work)
            .collect();
        let home_hours: Vec<usize> = (0..HOURS_PER_DAY)
            .filter(|&h| Location::at_hour(h) == Location::Home)
            .collect();

        assert_eq!(work_hours, (8..18).collect::<Vec<_>>());
        assert_eq!(work_hours.len() + home_hours.len(), HOURS_PER_DAY);
    }

    #[test]
    fn limits_follow_location() {
        let station = ChargeStationProfile::default();
        assert_eq!(station.charge_limit_kw(Location::Home), 11.0);
        assert_eq!(station.charge_limit_kw(Location::Work), 22.0);
        assert_eq!(station.discharge_limit_kw(Location::Home), 11.0);
        assert_eq!(station.discharge_limit_kw(Location::Work), 22.0);
    }
}
