pub mod driver;

pub use driver::{RunReport, SimulationDriver, TaggedDaySummary, TripResult};
