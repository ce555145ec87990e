use anyhow::{ensure, Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::domain::{
    BatteryProfile, ChargeStationProfile, ConsumptionModel, DrivingIntensityProfile, TripRequest,
    OFS_DRIVE_PROFILE,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub battery: BatteryProfile,
    pub station: ChargeStationProfile,
    pub consumption: ConsumptionModel,
    pub simulation: SimulationConfig,
    pub driving: DrivingConfig,
    pub pricing: PricingConfig,
    pub output: OutputConfig,
    pub trips: Vec<TripRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub year: i32,
    pub n_days: usize,
    pub initial_soc_kwh: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            year: 2018,
            n_days: 365,
            initial_soc_kwh: 15.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DrivingConfig {
    /// 24 non-negative hourly weights, any scale; normalized downstream.
    pub hourly_weights: Vec<f64>,
}

impl Default for DrivingConfig {
    fn default() -> Self {
        Self {
            hourly_weights: OFS_DRIVE_PROFILE.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub home_area: String,
    pub work_area: String,
    pub base_per_kwh: f64,
    pub swing_per_kwh: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            home_area: "FR".into(),
            work_area: "CH".into(),
            base_per_kwh: 0.10,
            swing_per_kwh: 0.08,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: "trip_summary_report.json".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            battery: BatteryProfile::default(),
            station: ChargeStationProfile::default(),
            consumption: ConsumptionModel::default(),
            simulation: SimulationConfig::default(),
            driving: DrivingConfig::default(),
            pricing: PricingConfig::default(),
            output: OutputConfig::default(),
            trips: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("EVCO__").split("__"));
        let cfg: Self = figment.extract().context("invalid configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.battery.capacity_kwh > 0.0,
            "battery capacity must be positive"
        );
        ensure!(
            self.battery.charge_efficiency > 0.0 && self.battery.charge_efficiency <= 1.0,
            "charge efficiency must lie in (0, 1]"
        );
        ensure!(
            self.battery.discharge_efficiency > 0.0 && self.battery.discharge_efficiency <= 1.0,
            "discharge efficiency must lie in (0, 1]"
        );
        ensure!(
            (0.0..1.0).contains(&self.battery.min_soc_fraction),
            "minimum state-of-charge fraction must lie in [0, 1)"
        );
        ensure!(
            self.station.home_charge_kw >= 0.0
                && self.station.work_charge_kw >= 0.0
                && self.station.home_discharge_kw >= 0.0
                && self.station.work_discharge_kw >= 0.0,
            "station power limits must be non-negative"
        );
        ensure!(
            self.consumption.kwh_per_km > 0.0,
            "per-km consumption must be positive"
        );
        ensure!(
            self.consumption.round_trip_factor > 0.0,
            "round-trip factor must be positive"
        );
        ensure!(self.simulation.n_days >= 1, "need at least one simulated day");

        let reserve = self.battery.min_soc_kwh();
        ensure!(
            self.simulation.initial_soc_kwh >= reserve
                && self.simulation.initial_soc_kwh <= self.battery.capacity_kwh,
            "starting state of charge {} kWh must lie within [{reserve}, {}]",
            self.simulation.initial_soc_kwh,
            self.battery.capacity_kwh
        );

        DrivingIntensityProfile::new(&self.driving.hourly_weights)
            .context("invalid driving profile")?;

        for trip in &self.trips {
            ensure!(
                trip.distance_km >= 0.0,
                "trip {} -> {} has a negative distance",
                trip.origin,
                trip.destination
            );
        }
        Ok(())
    }
}
