use anyhow::{Context, Result};
use ev_commute_optimizer::config::Config;
use ev_commute_optimizer::domain::DrivingIntensityProfile;
use ev_commute_optimizer::optimizer::LpDayOptimizer;
use ev_commute_optimizer::pricing::{HourlyPriceSeries, PriceFeed, SyntheticPriceFeed};
use ev_commute_optimizer::sim::SimulationDriver;
use ev_commute_optimizer::telemetry::init_tracing;
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;
    if cfg.trips.is_empty() {
        anyhow::bail!("no trips configured; add [[trips]] entries to config/default.toml");
    }

    let feed = SyntheticPriceFeed::new(cfg.pricing.base_per_kwh, cfg.pricing.swing_per_kwh);
    let home = feed.hourly_prices(&cfg.pricing.home_area, cfg.simulation.year)?;
    let work = feed.hourly_prices(&cfg.pricing.work_area, cfg.simulation.year)?;
    let prices = HourlyPriceSeries::from_tariffs(home, work).context("assembling tariff series")?;
    info!(
        year = cfg.simulation.year,
        days = prices.days(),
        home = %cfg.pricing.home_area,
        work = %cfg.pricing.work_area,
        "tariff series ready"
    );

    let intensity = DrivingIntensityProfile::new(&cfg.driving.hourly_weights)?;
    let optimizer = LpDayOptimizer::new(cfg.battery, cfg.station, cfg.consumption, intensity);
    let driver = SimulationDriver::new(
        Box::new(optimizer),
        cfg.simulation.n_days,
        cfg.simulation.initial_soc_kwh,
    );

    let report = driver.run(&cfg.trips, &prices);
    info!(
        trips = report.trips.len(),
        skipped_trips = report.skipped_trips,
        global_cost = report.global_cost,
        "simulation complete"
    );

    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&cfg.output.report_path, json)
        .with_context(|| format!("writing {}", cfg.output.report_path))?;
    info!(path = %cfg.output.report_path, "report written");
    Ok(())
}
