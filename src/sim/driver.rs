//! Year-long simulation: a strict fold over the day sequence, per trip.
//!
//! Each day's ending state of charge seeds the next day. An infeasible day
//! is logged and skipped without advancing the carried state, so the
//! following day retries from the last valid value; its trip energy is not
//! carried forward. Fault isolation is at day granularity: no single day or
//! trip aborts the run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{DayType, Season, TripRequest};
use crate::optimizer::{DailySummary, DayInputs, DayOutcome, DayStrategy};
use crate::pricing::HourlyPriceSeries;

/// Per-trip accumulator threaded hand-to-hand through the day fold.
#[derive(Debug, Clone, Copy)]
struct SimulationState {
    soc_kwh: f64,
    total_cost: f64,
}

/// One simulated day, tagged for the downstream season/day-type roll-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedDaySummary {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub season: Season,
    #[serde(flatten)]
    pub summary: DailySummary,
}

/// All feasible days of one trip, under its labels.
#[derive(Debug, Clone, Serialize)]
pub struct TripResult {
    pub trip: TripRequest,
    pub total_cost: f64,
    pub feasible_days: usize,
    pub skipped_days: usize,
    pub days: Vec<TaggedDaySummary>,
}

/// Whole-run output handed to the external aggregator.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub global_cost: f64,
    pub skipped_trips: usize,
    pub trips: Vec<TripResult>,
}

pub struct SimulationDriver {
    strategy: Box<dyn DayStrategy>,
    n_days: usize,
    initial_soc_kwh: f64,
}

impl SimulationDriver {
    pub fn new(strategy: Box<dyn DayStrategy>, n_days: usize, initial_soc_kwh: f64) -> Self {
        Self {
            strategy,
            n_days,
            initial_soc_kwh,
        }
    }

    /// Runs every trip independently against the shared tariff series and
    /// merges the per-trip accumulators into one report.
    pub fn run(&self, trips: &[TripRequest], prices: &HourlyPriceSeries) -> RunReport {
        let horizon = self.n_days.min(prices.days());
        if horizon < self.n_days {
            warn!(
                requested = self.n_days,
                available = prices.days(),
                "price series shorter than the simulation horizon; clamping"
            );
        }

        let mut report = RunReport {
            global_cost: 0.0,
            skipped_trips: 0,
            trips: Vec::with_capacity(trips.len()),
        };
        for (index, trip) in trips.iter().enumerate() {
            info!(
                trip = index + 1,
                total = trips.len(),
                origin = %trip.origin,
                destination = %trip.destination,
                distance_km = trip.distance_km,
                "processing trip"
            );
            match self.run_trip(trip, prices, horizon) {
                Some(result) => {
                    report.global_cost += result.total_cost;
                    report.trips.push(result);
                }
                None => {
                    warn!(
                        origin = %trip.origin,
                        destination = %trip.destination,
                        "no feasible days for trip; skipping it entirely"
                    );
                    report.skipped_trips += 1;
                }
            }
        }
        report
    }

    /// Strict sequential fold over the day windows. Returns `None` when not a
    /// single day was feasible.
    fn run_trip(
        &self,
        trip: &TripRequest,
        prices: &HourlyPriceSeries,
        horizon: usize,
    ) -> Option<TripResult> {
        let mut state = SimulationState {
            soc_kwh: self.initial_soc_kwh,
            total_cost: 0.0,
        };
        let mut days = Vec::new();
        let mut skipped_days = 0;

        for day in 0..horizon {
            let Some(window) = prices.day_window(day) else {
                break;
            };
            let inputs = DayInputs {
                home_tariff: window.home,
                work_tariff: window.work,
                timestamps: window.timestamps,
                distance_km: trip.distance_km,
                start_soc_kwh: state.soc_kwh,
            };
            match self.strategy.optimize_day(inputs) {
                DayOutcome::Feasible(result) => {
                    state.soc_kwh = result.end_soc_kwh;
                    state.total_cost += result.daily_cost;
                    let date = window.timestamps[0].date();
                    days.push(TaggedDaySummary {
                        date,
                        day_type: DayType::from_date(date),
                        season: Season::from_date(date),
                        summary: result.summary,
                    });
                }
                DayOutcome::Infeasible(reason) => {
                    warn!(day, %reason, "skipping infeasible day; state of charge not advanced");
                    skipped_days += 1;
                }
            }
        }

        if days.is_empty() {
            return None;
        }
        Some(TripResult {
            trip: trip.clone(),
            total_cost: state.total_cost,
            feasible_days: days.len(),
            skipped_days,
            days,
        })
    }
}
