pub mod synthetic;

pub use synthetic::SyntheticPriceFeed;

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::HOURS_PER_DAY;

/// One tariff value for one hour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HourlyPrice {
    pub timestamp: NaiveDateTime,
    pub price_per_kwh: f64,
}

/// Supplies a complete, gap-free hourly price series for one tariff area and
/// one calendar year (8760 values, 8784 in a leap year), in currency per kWh.
pub trait PriceFeed {
    fn hourly_prices(&self, area: &str, year: i32) -> Result<Vec<HourlyPrice>>;
}

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("tariff series lengths differ: home {home}, work {work}")]
    LengthMismatch { home: usize, work: usize },
    #[error("tariff series is empty")]
    Empty,
    #[error("tariff series length {0} is not a whole number of days")]
    PartialDay(usize),
    #[error("tariff timestamps diverge at hour {index}: home {home}, work {work}")]
    TimestampMismatch {
        index: usize,
        home: NaiveDateTime,
        work: NaiveDateTime,
    },
    #[error("gap in hourly timestamps at index {index}: {prev} -> {next}")]
    Gap {
        index: usize,
        prev: NaiveDateTime,
        next: NaiveDateTime,
    },
}

/// Two parallel tariff sequences (home and work) over one shared, gap-free
/// hourly timestamp axis, sliced into consecutive 24-hour windows per
/// simulated day.
#[derive(Debug, Clone)]
pub struct HourlyPriceSeries {
    timestamps: Vec<NaiveDateTime>,
    home: Vec<f64>,
    work: Vec<f64>,
}

/// Borrowed view of one simulated day.
#[derive(Debug, Clone, Copy)]
pub struct DayWindow<'a> {
    pub timestamps: &'a [NaiveDateTime; HOURS_PER_DAY],
    pub home: &'a [f64; HOURS_PER_DAY],
    pub work: &'a [f64; HOURS_PER_DAY],
}

impl HourlyPriceSeries {
    /// Zips two fetched year series into one axis, rejecting gapped,
    /// misaligned or partial-day inputs.
    pub fn from_tariffs(
        home: Vec<HourlyPrice>,
        work: Vec<HourlyPrice>,
    ) -> Result<Self, SeriesError> {
        if home.len() != work.len() {
            return Err(SeriesError::LengthMismatch {
                home: home.len(),
                work: work.len(),
            });
        }
        if home.is_empty() {
            return Err(SeriesError::Empty);
        }
        if home.len() % HOURS_PER_DAY != 0 {
            return Err(SeriesError::PartialDay(home.len()));
        }
        for (index, (h, w)) in home.iter().zip(&work).enumerate() {
            if h.timestamp != w.timestamp {
                return Err(SeriesError::TimestampMismatch {
                    index,
                    home: h.timestamp,
                    work: w.timestamp,
                });
            }
        }
        for (index, pair) in home.windows(2).enumerate() {
            let (prev, next) = (pair[0].timestamp, pair[1].timestamp);
            if next - prev != Duration::hours(1) {
                return Err(SeriesError::Gap {
                    index: index + 1,
                    prev,
                    next,
                });
            }
        }
        Ok(Self {
            timestamps: home.iter().map(|p| p.timestamp).collect(),
            home: home.into_iter().map(|p| p.price_per_kwh).collect(),
            work: work.into_iter().map(|p| p.price_per_kwh).collect(),
        })
    }

    /// Number of whole 24-hour windows in the series.
    pub fn days(&self) -> usize {
        self.timestamps.len() / HOURS_PER_DAY
    }

    pub fn day_window(&self, day: usize) -> Option<DayWindow<'_>> {
        let start = day.checked_mul(HOURS_PER_DAY)?;
        let end = start.checked_add(HOURS_PER_DAY)?;
        if end > self.timestamps.len() {
            return None;
        }
        Some(DayWindow {
            timestamps: self.timestamps[start..end].try_into().ok()?,
            home: self.home[start..end].try_into().ok()?,
            work: self.work[start..end].try_into().ok()?,
        })
    }
}
