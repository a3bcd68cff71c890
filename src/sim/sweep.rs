use rayon::prelude::*;
use tracing::debug;

use crate::vehicle::{presets, RocketConfig, TvcConfig};
use super::runner::Simulation;

/// One labelled run in a parameter sweep.
#[derive(Debug, Clone)]
pub struct SweepCase {
    pub label: String,
    pub rocket: RocketConfig,
    pub tvc: Option<TvcConfig>,
}

impl SweepCase {
    pub fn build(&self) -> anyhow::Result<Simulation> {
        match &self.tvc {
            Some(tvc) => Simulation::with_tvc(&self.rocket, tvc),
            None => Simulation::new(&self.rocket),
        }
    }
}

fn in_wind(rocket: &RocketConfig, speed: f64, dir: f64) -> RocketConfig {
    RocketConfig {
        wind_speed_mps: speed,
        wind_dir_deg: dir,
        ..rocket.clone()
    }
}

/// The standard wind study: every case of [`presets::wind_cases`] flown with
/// a fixed nozzle and with TVC.
pub fn wind_study(rocket: &RocketConfig, tvc: TvcConfig) -> Vec<SweepCase> {
    presets::wind_cases()
        .into_iter()
        .flat_map(|(label, speed, dir)| {
            let rocket = in_wind(rocket, speed, dir);
            [
                SweepCase { label: label.to_string(), rocket: rocket.clone(), tvc: None },
                SweepCase { label: format!("{label} (TVC)"), rocket, tvc: Some(tvc) },
            ]
        })
        .collect()
}

/// The extreme-wind study, TVC only.
pub fn extreme_wind_study(rocket: &RocketConfig, tvc: TvcConfig) -> Vec<SweepCase> {
    presets::extreme_wind_cases()
        .into_iter()
        .map(|(label, speed, dir)| SweepCase {
            label: format!("{label} (TVC)"),
            rocket: in_wind(rocket, speed, dir),
            tvc: Some(tvc),
        })
        .collect()
}

/// Run every case to completion on the rayon pool.
///
/// Simulations share nothing, so results are identical to running the cases
/// one after another. Output order matches `cases`.
pub fn run_parallel(cases: &[SweepCase]) -> Vec<anyhow::Result<Simulation>> {
    cases
        .par_iter()
        .map(|case| -> anyhow::Result<Simulation> {
            debug!(label = %case.label, "sweep case started");
            let mut sim = case.build()?;
            sim.run();
            Ok(sim)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(label: &str, wind: f64, tvc: bool) -> SweepCase {
        SweepCase {
            label: label.into(),
            rocket: RocketConfig {
                time_horizon_s: 8.0,
                wind_speed_mps: wind,
                wind_dir_deg: 90.0,
                ..presets::mk1()
            },
            tvc: tvc.then(presets::mk1_tvc),
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let cases = vec![case("calm", 0.0, false), case("windy tvc", 8.0, true)];
        let parallel = run_parallel(&cases);
        for (c, p) in cases.iter().zip(parallel) {
            let mut seq = c.build().unwrap();
            seq.run();
            assert_eq!(seq.log(), p.unwrap().log(), "case {}", c.label);
        }
    }

    #[test]
    fn large_batch_keeps_case_order() {
        let cases: Vec<SweepCase> = (0..24)
            .map(|i| {
                let mut c = case(&format!("case {i}"), 0.0, i % 2 == 1);
                c.rocket.time_horizon_s = 0.5;
                c
            })
            .collect();
        let out = run_parallel(&cases);
        assert_eq!(out.len(), cases.len());
        for (c, r) in cases.iter().zip(out) {
            let sim = r.unwrap();
            let expected = if c.tvc.is_some() { "TvcController" } else { "ConstantThrust" };
            assert_eq!(sim.thrust_model_name(), expected, "{}", c.label);
        }
    }

    #[test]
    fn wind_study_pairs_fixed_and_tvc_runs() {
        let cases = wind_study(&presets::mk1(), presets::mk1_tvc());
        assert_eq!(cases.len(), 2 * presets::wind_cases().len());
        for pair in cases.chunks(2) {
            assert!(pair[0].tvc.is_none());
            assert_eq!(pair[1].tvc, Some(presets::mk1_tvc()));
            assert_eq!(pair[0].rocket, pair[1].rocket);
        }
    }

    #[test]
    fn extreme_study_is_tvc_only() {
        let cases = extreme_wind_study(&presets::mk1(), presets::mk1_tvc());
        assert_eq!(cases.len(), 9);
        assert!(cases.iter().all(|c| c.tvc.is_some()));
        assert!(cases.iter().all(|c| c.rocket.wind_speed_mps >= 17.0));
        assert!(cases.iter().all(|c| c.rocket.validate().is_ok()));
    }

    #[test]
    fn invalid_case_reports_error_in_place() {
        let mut bad = case("bad", 0.0, false);
        bad.rocket.dry_mass_kg = 0.0;
        let out = run_parallel(&[case("ok", 0.0, false), bad]);
        assert!(out[0].is_ok());
        assert!(out[1].is_err());
    }
}
