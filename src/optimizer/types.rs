use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::HOURS_PER_DAY;

/// One day's optimization inputs: the two tariff windows plus the state
/// carried over from the previous day. Battery, charger and driving profiles
/// are fixed at optimizer construction.
#[derive(Debug, Clone, Copy)]
pub struct DayInputs<'a> {
    pub home_tariff: &'a [f64; HOURS_PER_DAY],
    pub work_tariff: &'a [f64; HOURS_PER_DAY],
    /// Calendar metadata only; the model itself is indexed by hour of day.
    pub timestamps: &'a [NaiveDateTime; HOURS_PER_DAY],
    pub distance_km: f64,
    pub start_soc_kwh: f64,
}

/// Why a day produced no schedule. Both variants are expected outcomes the
/// driver skips over, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InfeasibleReason {
    /// The round trip alone needs more energy than the battery holds;
    /// detected before any model is built.
    TripEnergyExceedsCapacity {
        required_kwh: f64,
        capacity_kwh: f64,
    },
    /// The solver terminated without an optimal solution (infeasible,
    /// unbounded or numeric failure).
    SolveError { detail: String },
}

impl fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TripEnergyExceedsCapacity {
                required_kwh,
                capacity_kwh,
            } => write!(
                f,
                "trip energy {required_kwh:.1} kWh exceeds battery capacity {capacity_kwh:.1} kWh"
            ),
            Self::SolveError { detail } => {
                write!(f, "solver returned no optimal solution: {detail}")
            }
        }
    }
}

/// One hourly slot of a solved schedule. kW values double as kWh since the
/// time step is one hour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HourlySlot {
    pub timestamp: NaiveDateTime,
    pub charge_kw: f64,
    pub discharge_kw: f64,
    pub soc_kwh: f64,
}

/// Full 24-slot schedule for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySchedule {
    pub slots: Vec<HourlySlot>,
}

/// Per-day aggregates handed to the downstream season/day-type roll-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub charge_volume_kwh: f64,
    pub discharge_volume_kwh: f64,
    pub trip_energy_kwh: f64,
    pub home_charge_kwh: f64,
    pub work_charge_kwh: f64,
    pub home_discharge_kwh: f64,
    pub work_discharge_kwh: f64,
    pub daily_cost: f64,
    /// Share of the day's charging expenditure that covered the trip energy,
    /// as opposed to surplus arbitrage. Zero on days with no charging.
    pub travel_cost: f64,
    pub home_travel_cost: f64,
    pub work_travel_cost: f64,
    pub daily_benefit: f64,
    pub end_soc_kwh: f64,
}

/// A successfully solved day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayResult {
    pub schedule: DailySchedule,
    pub daily_cost: f64,
    /// State of charge at hour 23, seeding the next day.
    pub end_soc_kwh: f64,
    pub summary: DailySummary,
}

/// Outcome of one day's optimization. `Infeasible` carries no state: the
/// caller must not advance the carried state of charge on that variant.
#[derive(Debug, Clone)]
pub enum DayOutcome {
    Feasible(Box<DayResult>),
    Infeasible(InfeasibleReason),
}

/// Capability seam for the per-day solve, so the simulation driver can run
/// against a deterministic stub in tests.
pub trait DayStrategy: Send + Sync {
    fn optimize_day(&self, day: DayInputs<'_>) -> DayOutcome;
}
