use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekend/weekday bucket attached to each simulated day for the downstream
/// roll-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayType {
    Saturday,
    Sunday,
    Weekday,
}

impl DayType {
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
            DayType::Weekday => write!(f, "Weekday"),
        }
    }
}

/// Meteorological season of a simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn from_date(date: NaiveDate) -> Self {
        match date.month() {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Winter => write!(f, "Winter"),
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Autumn => write!(f, "Autumn"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2018, 1, 6), DayType::Saturday, Season::Winter)]
    #[case(date(2018, 7, 15), DayType::Sunday, Season::Summer)]
    #[case(date(2018, 4, 3), DayType::Weekday, Season::Spring)]
    #[case(date(2018, 10, 31), DayType::Weekday, Season::Autumn)]
    #[case(date(2018, 12, 1), DayType::Saturday, Season::Winter)]
    fn tags_from_date(
        #[case] date: NaiveDate,
        #[case] day_type: DayType,
        #[case] season: Season,
    ) {
        assert_eq!(DayType::from_date(date), day_type);
        assert_eq!(Season::from_date(date), season);
    }
}
