pub mod battery;
pub mod calendar;
pub mod driving;
pub mod station;
pub mod trip;

pub use battery::BatteryProfile;
pub use calendar::{DayType, Season};
pub use driving::{AvailabilityProfile, DrivingIntensityProfile, ProfileError, OFS_DRIVE_PROFILE};
pub use station::{ChargeStationProfile, Location};
pub use trip::{ConsumptionModel, TripRequest};

/// Hours in one simulated day. Every tariff window, schedule and hourly
/// profile in the crate is indexed 0..24.
pub const HOURS_PER_DAY: usize = 24;
