pub mod day;
pub mod types;

pub use day::LpDayOptimizer;
pub use types::{
    DailySchedule, DailySummary, DayInputs, DayOutcome, DayResult, DayStrategy, HourlySlot,
    InfeasibleReason,
};
