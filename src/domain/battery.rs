use serde::{Deserialize, Serialize};

/// Battery physics for a run. Immutable once the simulation starts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryProfile {
    pub capacity_kwh: f64,
    /// Fraction of drawn grid energy that ends up stored (eta_c).
    pub charge_efficiency: f64,
    /// Fraction of stored energy delivered when discharging (eta_d).
    pub discharge_efficiency: f64,
    /// Reserve floor as a fraction of capacity.
    pub min_soc_fraction: f64,
}

impl Default for BatteryProfile {
    fn default() -> Self {
        Self {
            capacity_kwh: 65.0,
            charge_efficiency: 0.90,
            discharge_efficiency: 0.90,
            min_soc_fraction: 0.15,
        }
    }
}

impl BatteryProfile {
    /// Minimum state of charge in kWh; no feasible schedule goes below this
    /// at any hour.
    pub fn min_soc_kwh(&self) -> f64 {
        self.min_soc_fraction * self.capacity_kwh
    }
}
