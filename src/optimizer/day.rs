//! Per-day charge/discharge optimization as a continuous linear program.
//!
//! Decision variables are hourly charge power, discharge power and state of
//! charge. The objective prices net drawn energy at the tariff of wherever
//! the vehicle sits that hour, so discharging earns a credit at that
//! location's tariff. The state-of-charge recurrence couples the hours; the
//! hour-0 state is pinned to the value carried in from the previous day.

use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use itertools::izip;

use crate::domain::{
    AvailabilityProfile, BatteryProfile, ChargeStationProfile, ConsumptionModel,
    DrivingIntensityProfile, Location, HOURS_PER_DAY,
};

use super::types::{
    DailySchedule, DailySummary, DayInputs, DayOutcome, DayResult, DayStrategy, HourlySlot,
    InfeasibleReason,
};

pub struct LpDayOptimizer {
    battery: BatteryProfile,
    station: ChargeStationProfile,
    consumption: ConsumptionModel,
    intensity: DrivingIntensityProfile,
    availability: AvailabilityProfile,
}

impl LpDayOptimizer {
    pub fn new(
        battery: BatteryProfile,
        station: ChargeStationProfile,
        consumption: ConsumptionModel,
        intensity: DrivingIntensityProfile,
    ) -> Self {
        let availability = AvailabilityProfile::from_intensity(&intensity);
        Self {
            battery,
            station,
            consumption,
            intensity,
            availability,
        }
    }

    /// Active tariff for an hour: the work tariff while parked at work, the
    /// home tariff otherwise.
    fn tariff_at(day: &DayInputs<'_>, hour: usize) -> f64 {
        match Location::at_hour(hour) {
            Location::Home => day.home_tariff[hour],
            Location::Work => day.work_tariff[hour],
        }
    }

    fn solve(
        &self,
        day: &DayInputs<'_>,
        trip_energy_kwh: f64,
    ) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), ResolutionError> {
        let mut problem = ProblemVariables::new();
        let charge: Vec<Variable> = problem.add_vector(variable().min(0.0), HOURS_PER_DAY);
        let discharge: Vec<Variable> = problem.add_vector(variable().min(0.0), HOURS_PER_DAY);
        let soc: Vec<Variable> = problem.add_vector(
            variable().min(0.0).max(self.battery.capacity_kwh),
            HOURS_PER_DAY,
        );

        let objective = (0..HOURS_PER_DAY)
            .map(|t| Self::tariff_at(day, t) * (charge[t] - discharge[t]))
            .sum::<Expression>();

        let mut model = problem.minimise(objective).using(default_solver);

        // Hour 0 is the boundary carried over from the previous day, not a
        // free variable.
        model = model.with(constraint!(soc[0] == day.start_soc_kwh));

        let reserve = self.battery.min_soc_kwh();
        let eta_c = self.battery.charge_efficiency;
        let inv_eta_d = 1.0 / self.battery.discharge_efficiency;

        for t in 0..HOURS_PER_DAY {
            let location = Location::at_hour(t);
            let avail = self.availability.factor(t);
            let charge_cap = self.station.charge_limit_kw(location) * avail;
            let discharge_cap = self.station.discharge_limit_kw(location) * avail;

            model = model.with(constraint!(soc[t] >= reserve));
            model = model.with(constraint!(charge[t] <= charge_cap));
            model = model.with(constraint!(discharge[t] <= discharge_cap));

            if t > 0 {
                let drive_kwh = trip_energy_kwh * self.intensity.share(t);
                let soc_delta = eta_c * charge[t] - inv_eta_d * discharge[t] - drive_kwh;
                model = model.with(constraint!(soc[t] == soc[t - 1] + soc_delta));
            }
        }

        let solution = model.solve()?;
        Ok((
            charge.iter().map(|&v| solution.value(v)).collect(),
            discharge.iter().map(|&v| solution.value(v)).collect(),
            soc.iter().map(|&v| solution.value(v)).collect(),
        ))
    }

    fn summarize(
        &self,
        day: &DayInputs<'_>,
        trip_energy_kwh: f64,
        charge: &[f64],
        discharge: &[f64],
        soc: &[f64],
    ) -> DayResult {
        let mut home_charge = 0.0;
        let mut work_charge = 0.0;
        let mut home_discharge = 0.0;
        let mut work_discharge = 0.0;
        let mut home_cost = 0.0;
        let mut work_cost = 0.0;
        let mut daily_cost = 0.0;

        for (t, (&c, &d)) in charge.iter().zip(discharge).enumerate() {
            daily_cost += (c - d) * Self::tariff_at(day, t);
            match Location::at_hour(t) {
                Location::Home => {
                    home_charge += c;
                    home_discharge += d;
                    home_cost += c * day.home_tariff[t];
                }
                Location::Work => {
                    work_charge += c;
                    work_discharge += d;
                    work_cost += c * day.work_tariff[t];
                }
            }
        }

        // Attribute charging expenditure to the trip in proportion to the
        // volume charged; with nothing charged there is nothing to attribute.
        let charged = home_charge + work_charge;
        let (travel_cost, home_travel_cost, work_travel_cost) = if charged > 0.0 {
            let per_charged_kwh = trip_energy_kwh / charged;
            (
                (home_cost + work_cost) * per_charged_kwh,
                home_cost * per_charged_kwh,
                work_cost * per_charged_kwh,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        let slots = izip!(day.timestamps, charge, discharge, soc)
            .map(|(&timestamp, &charge_kw, &discharge_kw, &soc_kwh)| HourlySlot {
                timestamp,
                charge_kw,
                discharge_kw,
                soc_kwh,
            })
            .collect();

        let end_soc_kwh = soc[HOURS_PER_DAY - 1];
        DayResult {
            schedule: DailySchedule { slots },
            daily_cost,
            end_soc_kwh,
            summary: DailySummary {
                charge_volume_kwh: charge.iter().sum(),
                discharge_volume_kwh: discharge.iter().sum(),
                trip_energy_kwh,
                home_charge_kwh: home_charge,
                work_charge_kwh: work_charge,
                home_discharge_kwh: home_discharge,
                work_discharge_kwh: work_discharge,
                daily_cost,
                travel_cost,
                home_travel_cost,
                work_travel_cost,
                daily_benefit: travel_cost - daily_cost,
                end_soc_kwh,
            },
        }
    }
}

impl DayStrategy for LpDayOptimizer {
    fn optimize_day(&self, day: DayInputs<'_>) -> DayOutcome {
        let trip_energy_kwh = self.consumption.trip_energy_kwh(day.distance_km);
        if trip_energy_kwh > self.battery.capacity_kwh {
            return DayOutcome::Infeasible(InfeasibleReason::TripEnergyExceedsCapacity {
                required_kwh: trip_energy_kwh,
                capacity_kwh: self.battery.capacity_kwh,
            });
        }

        match self.solve(&day, trip_energy_kwh) {
            Ok((charge, discharge, soc)) => DayOutcome::Feasible(Box::new(self.summarize(
                &day,
                trip_energy_kwh,
                &charge,
                &discharge,
                &soc,
            ))),
            Err(err) => DayOutcome::Infeasible(InfeasibleReason::SolveError {
                detail: err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    const TOLERANCE: f64 = 1e-6;

    fn timestamps(date: NaiveDate) -> [NaiveDateTime; HOURS_PER_DAY] {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        std::array::from_fn(|h| midnight + Duration::hours(h as i64))
    }

    fn optimizer() -> LpDayOptimizer {
        LpDayOptimizer::new(
            BatteryProfile::default(),
            ChargeStationProfile::default(),
            ConsumptionModel::default(),
            DrivingIntensityProfile::default(),
        )
    }

    fn expect_feasible(outcome: DayOutcome) -> Box<DayResult> {
        match outcome {
            DayOutcome::Feasible(result) => result,
            DayOutcome::Infeasible(reason) => panic!("expected feasible day, got: {reason}"),
        }
    }

    #[test]
    fn starting_soc_is_pinned() {
        let home = [0.10; HOURS_PER_DAY];
        let work = [0.15; HOURS_PER_DAY];
        let stamps = timestamps(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        let result = expect_feasible(optimizer().optimize_day(DayInputs {
            home_tariff: &home,
            work_tariff: &work,
            timestamps: &stamps,
            distance_km: 10.0,
            start_soc_kwh: 15.0,
        }));

        assert!((result.schedule.slots[0].soc_kwh - 15.0).abs() < TOLERANCE);
    }

    #[test]
    fn soc_stays_within_reserve_and_capacity() {
        let home = [0.10; HOURS_PER_DAY];
        let work = [0.15; HOURS_PER_DAY];
        let stamps = timestamps(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        let result = expect_feasible(optimizer().optimize_day(DayInputs {
            home_tariff: &home,
            work_tariff: &work,
            timestamps: &stamps,
            distance_km: 30.0,
            start_soc_kwh: 15.0,
        }));

        for slot in &result.schedule.slots {
            assert!(
                slot.soc_kwh >= 9.75 - TOLERANCE && slot.soc_kwh <= 65.0 + TOLERANCE,
                "soc out of bounds at {}: {}",
                slot.timestamp,
                slot.soc_kwh
            );
        }
    }

    #[test]
    fn recurrence_holds_at_every_hour() {
        let home = [0.08; HOURS_PER_DAY];
        let work = [0.20; HOURS_PER_DAY];
        let stamps = timestamps(NaiveDate::from_ymd_opt(2018, 3, 5).unwrap());
        let result = expect_feasible(optimizer().optimize_day(DayInputs {
            home_tariff: &home,
            work_tariff: &work,
            timestamps: &stamps,
            distance_km: 25.0,
            start_soc_kwh: 20.0,
        }));

        let intensity = DrivingIntensityProfile::default();
        let trip_energy = 25.0 * 0.18 * 2.0;
        let slots = &result.schedule.slots;
        for t in 1..HOURS_PER_DAY {
            let residual = slots[t].soc_kwh
                - slots[t - 1].soc_kwh
                - 0.9 * slots[t].charge_kw
                + slots[t].discharge_kw / 0.9
                + trip_energy * intensity.share(t);
            assert!(
                residual.abs() < TOLERANCE,
                "recurrence violated at hour {t}: {residual}"
            );
        }
    }

    #[test]
    fn oversized_trip_is_rejected_before_any_solve() {
        let home = [0.10; HOURS_PER_DAY];
        let work = [0.15; HOURS_PER_DAY];
        let stamps = timestamps(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        let outcome = optimizer().optimize_day(DayInputs {
            home_tariff: &home,
            work_tariff: &work,
            timestamps: &stamps,
            distance_km: 200.0,
            start_soc_kwh: 15.0,
        });

        match outcome {
            DayOutcome::Infeasible(InfeasibleReason::TripEnergyExceedsCapacity {
                required_kwh,
                capacity_kwh,
            }) => {
                assert!((required_kwh - 72.0).abs() < TOLERANCE);
                assert_eq!(capacity_kwh, 65.0);
            }
            other => panic!("expected capacity rejection, got {other:?}"),
        }
    }

    #[test]
    fn identical_inputs_give_identical_schedules() {
        let home = [0.09; HOURS_PER_DAY];
        let work = [0.17; HOURS_PER_DAY];
        let stamps = timestamps(NaiveDate::from_ymd_opt(2018, 6, 11).unwrap());
        let inputs = DayInputs {
            home_tariff: &home,
            work_tariff: &work,
            timestamps: &stamps,
            distance_km: 18.0,
            start_soc_kwh: 15.0,
        };

        let opt = optimizer();
        let first = expect_feasible(opt.optimize_day(inputs));
        let second = expect_feasible(opt.optimize_day(inputs));

        assert_eq!(first.daily_cost, second.daily_cost);
        assert_eq!(first.end_soc_kwh, second.end_soc_kwh);
        for (a, b) in first.schedule.slots.iter().zip(&second.schedule.slots) {
            assert_eq!(a.charge_kw, b.charge_kw);
            assert_eq!(a.discharge_kw, b.discharge_kw);
            assert_eq!(a.soc_kwh, b.soc_kwh);
        }
    }

    #[test]
    fn charging_concentrates_where_power_is_cheap() {
        // Cheap home tariff against an expensive work tariff: the trip energy
        // should be covered almost entirely from home charging.
        let home = [0.05; HOURS_PER_DAY];
        let work = [0.30; HOURS_PER_DAY];
        let stamps = timestamps(NaiveDate::from_ymd_opt(2018, 2, 7).unwrap());
        let result = expect_feasible(optimizer().optimize_day(DayInputs {
            home_tariff: &home,
            work_tariff: &work,
            timestamps: &stamps,
            distance_km: 30.0,
            start_soc_kwh: 15.0,
        }));

        assert!(result.summary.home_charge_kwh > result.summary.work_charge_kwh);
    }

    #[test]
    fn idle_day_with_full_battery_charges_nothing() {
        let home = [0.10; HOURS_PER_DAY];
        let work = [0.10; HOURS_PER_DAY];
        let stamps = timestamps(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        let result = expect_feasible(optimizer().optimize_day(DayInputs {
            home_tariff: &home,
            work_tariff: &work,
            timestamps: &stamps,
            distance_km: 0.0,
            start_soc_kwh: 65.0,
        }));

        // Flat prices and round-trip losses leave no arbitrage margin, so no
        // charging happens; the travel-cost attribution falls back to zero.
        assert!(result.summary.charge_volume_kwh < TOLERANCE);
        assert_eq!(result.summary.travel_cost, 0.0);
        assert_eq!(result.summary.home_travel_cost, 0.0);
        assert_eq!(result.summary.work_travel_cost, 0.0);
    }
}
