use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::HOURS_PER_DAY;

/// Hourly driving weights over a day, from the Swiss federal mobility
/// statistics (OFS). Raw survey shares; normalized at profile construction.
pub const OFS_DRIVE_PROFILE: [f64; HOURS_PER_DAY] = [
    0.2, 0.2, 0.2, 0.4, 1.4, 5.0, 12.5, 11.3, 5.5, 3.1, 2.6, 5.0, 6.2, 5.4, 3.0, 4.2, 7.9, 10.6,
    7.1, 3.3, 1.9, 1.4, 1.2, 0.7,
];

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("driving profile needs 24 hourly weights, got {0}")]
    WrongLength(usize),
    #[error("driving profile weight for hour {hour} is negative: {weight}")]
    NegativeWeight { hour: usize, weight: f64 },
    #[error("driving profile weights sum to zero")]
    ZeroSum,
}

/// Expected share of a round trip's energy drawn in each hour of the day.
///
/// Weights are accepted in any non-negative scale (survey percentages,
/// fractions, raw counts) and normalized here, once, to sum 1. Downstream
/// code never has to guess the unit again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrivingIntensityProfile {
    shares: [f64; HOURS_PER_DAY],
}

impl DrivingIntensityProfile {
    pub fn new(weights: &[f64]) -> Result<Self, ProfileError> {
        if weights.len() != HOURS_PER_DAY {
            return Err(ProfileError::WrongLength(weights.len()));
        }
        for (hour, &weight) in weights.iter().enumerate() {
            if weight < 0.0 {
                return Err(ProfileError::NegativeWeight { hour, weight });
            }
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(ProfileError::ZeroSum);
        }
        let mut shares = [0.0; HOURS_PER_DAY];
        for (share, &weight) in shares.iter_mut().zip(weights) {
            *share = weight / total;
        }
        Ok(Self { shares })
    }

    pub fn share(&self, hour: usize) -> f64 {
        self.shares[hour % HOURS_PER_DAY]
    }

    pub fn shares(&self) -> &[f64; HOURS_PER_DAY] {
        &self.shares
    }
}

impl Default for DrivingIntensityProfile {
    fn default() -> Self {
        Self::new(&OFS_DRIVE_PROFILE).expect("static OFS profile is well-formed")
    }
}

/// Per-hour multiplier in [0, 1] scaling maximum charge/discharge power down
/// to the likelihood the vehicle is parked rather than being driven.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityProfile {
    factors: [f64; HOURS_PER_DAY],
}

impl AvailabilityProfile {
    pub fn from_intensity(intensity: &DrivingIntensityProfile) -> Self {
        let mut factors = [0.0; HOURS_PER_DAY];
        for (factor, &share) in factors.iter_mut().zip(intensity.shares()) {
            *factor = (1.0 - share).clamp(0.0, 1.0);
        }
        Self { factors }
    }

    pub fn factor(&self, hour: usize) -> f64 {
        self.factors[hour % HOURS_PER_DAY]
    }
}
