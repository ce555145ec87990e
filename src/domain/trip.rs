use serde::{Deserialize, Serialize};

/// One commuting relation between two places.
///
/// Only the distance feeds the optimization; origin, destination and vehicle
/// count pass through as labels on the output records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub distance_km: f64,
    pub origin: String,
    pub destination: String,
    pub vehicle_count: u32,
}

/// Converts a one-way commute distance into the day's required battery energy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumptionModel {
    /// Energy drawn per driven km (kWh).
    pub kwh_per_km: f64,
    /// Multiplier covering the return leg.
    pub round_trip_factor: f64,
}

impl Default for ConsumptionModel {
    fn default() -> Self {
        Self {
            kwh_per_km: 0.18,
            round_trip_factor: 2.0,
        }
    }
}

impl ConsumptionModel {
    pub fn trip_energy_kwh(&self, distance_km: f64) -> f64 {
        distance_km * self.kwh_per_km * self.round_trip_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_energy() {
        let model = ConsumptionModel::default();
        assert!((model.trip_energy_kwh(10.0) - 3.6).abs() < 1e-12);
        assert!((model.trip_energy_kwh(200.0) - 72.0).abs() < 1e-12);
        assert_eq!(model.trip_energy_kwh(0.0), 0.0);
    }
}
