use launchsim::dynamics::state::G0;
use launchsim::io::FlightSummary;
use launchsim::physics::gravity::on_rail;
use launchsim::sim::{detect_events, EventKind, Simulation};
use launchsim::vehicle::{presets, LaunchAngle, RocketConfig};

/// Build and run a simulation, panicking on invalid configuration.
fn flown(cfg: &RocketConfig) -> Simulation {
    let mut sim = Simulation::new(cfg).unwrap();
    sim.run();
    sim
}

fn flown_tvc(cfg: &RocketConfig) -> Simulation {
    let mut sim = Simulation::with_tvc(cfg, &presets::mk1_tvc()).unwrap();
    sim.run();
    sim
}

fn apogee_index(sim: &Simulation) -> usize {
    let pos = sim.log().position();
    (0..pos.len())
        .max_by(|&a, &b| pos[a][2].partial_cmp(&pos[b][2]).unwrap())
        .unwrap()
}

// ==================================================================================
// End-to-end reference flight
// ==================================================================================

#[test]
fn reference_flight_rises_then_lands_inside_horizon() {
    let sim = flown(&presets::mk1());
    let log = sim.log();
    assert_eq!(log.len(), 9001);

    let alt: Vec<f64> = log.position().iter().map(|p| p[2]).collect();
    let apogee = apogee_index(&sim);
    assert!(alt[apogee] > 7_000.0 && alt[apogee] < 8_200.0, "apogee {}", alt[apogee]);

    for i in 0..apogee {
        assert!(alt[i + 1] >= alt[i], "altitude dropped before apogee at sample {i}");
    }

    let touchdown = (apogee..alt.len())
        .find(|&i| alt[i] <= 0.0)
        .expect("vehicle must land before the horizon ends");
    assert!(touchdown < alt.len() - 1);
    assert!(log.time()[touchdown] > 60.0);

    // ground contact freezes the vehicle where it landed
    let landed = log.position()[touchdown];
    for p in &log.position()[touchdown + 1..] {
        assert_eq!(*p, landed);
    }
    assert!(log.velocity()[touchdown + 1..].iter().all(|v| v.norm() == 0.0));
}

#[test]
fn reference_flight_drifts_east_only() {
    let sim = flown(&presets::mk1());
    let last = sim.log().last();
    assert!(last.pos[0] > 1_000.0, "launched toward azimuth 90");
    assert!(last.pos[1].abs() < 1e-6, "no northward drift without wind");
}

#[test]
fn events_follow_flight_order() {
    let sim = flown(&presets::mk1());
    let events = detect_events(sim.log(), sim.rocket());
    let kinds: Vec<EventKind> = events.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![EventKind::RailExit, EventKind::Burnout, EventKind::Apogee, EventKind::Touchdown]
    );
    assert!(events.windows(2).all(|w| w[0].time <= w[1].time));
    for e in &events {
        assert_eq!(sim.log().time()[e.state.index], e.time);
        assert_eq!(sim.log().position()[e.state.index], e.state.pos);
    }
}

// ==================================================================================
// Invariants
// ==================================================================================

#[test]
fn runs_are_bit_for_bit_deterministic() {
    let cfg = RocketConfig {
        wind_speed_mps: 8.0,
        wind_dir_deg: 90.0,
        ..presets::mk1()
    };
    let a = flown_tvc(&cfg);
    let b = flown_tvc(&cfg);
    assert_eq!(a.log(), b.log());
    let bits = |s: &Simulation| -> Vec<u64> {
        s.log().position().iter().flat_map(|p| p.iter().map(|x| x.to_bits())).collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn mass_depletes_during_burn_then_holds_dry() {
    let sim = flown(&presets::mk1());
    let log = sim.log();
    let rocket = sim.rocket();
    let mass = log.mass();
    let time = log.time();

    assert!(mass.windows(2).all(|w| w[1] <= w[0]), "mass must never increase");
    // sample i+1 carries the mass at the start of step i
    for i in 1..mass.len() - 1 {
        if time[i] < rocket.burn_time {
            assert!(mass[i + 1] < mass[i], "mass must strictly fall at t={}", time[i]);
        } else {
            assert_eq!(mass[i + 1], rocket.dry_mass);
        }
    }
    assert_eq!(*mass.last().unwrap(), rocket.dry_mass);
}

#[test]
fn no_angular_acceleration_on_the_rail() {
    for sim in [flown(&presets::mk1()), flown_tvc(&presets::mk1())] {
        let log = sim.log();
        let rail = sim.rocket().rail_length;
        let mut rail_steps = 0;
        for i in 0..log.len() - 1 {
            if on_rail(&log.position()[i], rail) {
                let acc = log.acceleration()[i + 1];
                assert_eq!(acc[3], 0.0, "{} pitch at sample {i}", sim.thrust_model_name());
                assert_eq!(acc[4], 0.0, "{} yaw at sample {i}", sim.thrust_model_name());
                rail_steps += 1;
            }
        }
        assert!(rail_steps > 5);
    }
}

#[test]
fn tvc_deflection_never_exceeds_limit() {
    let limit = presets::mk1_tvc().max_deflection_deg.to_radians();
    for wind in [0.0, 8.0, 17.0] {
        let cfg = RocketConfig {
            wind_speed_mps: wind,
            wind_dir_deg: 90.0,
            ..presets::mk1()
        };
        let sim = flown_tvc(&cfg);
        for g in sim.log().gimbal() {
            assert!(g.pitch.abs() <= limit && g.yaw.abs() <= limit, "{g:?}");
        }
    }
}

#[test]
fn tvc_holds_launch_attitude_better_than_fixed_nozzle() {
    let cfg = RocketConfig {
        wind_speed_mps: 8.0,
        wind_dir_deg: 90.0,
        ..presets::mk1()
    };
    let fixed = FlightSummary::from_simulation(&flown(&cfg));
    let tvc = FlightSummary::from_simulation(&flown_tvc(&cfg));
    assert!(
        tvc.max_attitude_error_rad < fixed.max_attitude_error_rad,
        "tvc {} vs fixed {}",
        tvc.max_attitude_error_rad,
        fixed.max_attitude_error_rad
    );
    assert!(tvc.max_gimbal_rad > 0.0);
    assert_eq!(fixed.max_gimbal_rad, 0.0);
}

// ==================================================================================
// Ballistic reduction
// ==================================================================================

fn ballistic() -> RocketConfig {
    RocketConfig {
        launch_angle: LaunchAngle { elevation_deg: 90.0, azimuth_deg: 0.0 },
        time_horizon_s: 60.0,
        drag_coeff: 0.0,
        lift_coeff: 0.0,
        ..presets::mk1()
    }
}

#[test]
fn vertical_flight_without_aero_matches_recurrence() {
    let cfg = ballistic();
    let sim = flown(&cfg);
    let log = sim.log();
    let rocket = sim.rocket();
    let dt = cfg.step_s;

    let (mut z, mut vz, mut m) = (0.0_f64, 0.0_f64, rocket.wet_mass);
    for i in 0..log.len() - 1 {
        let t = log.time()[i];
        let thrust = if t < rocket.burn_time { rocket.thrust } else { 0.0 };
        let a = (thrust - G0 * m) / m;
        if z >= 0.0 {
            vz += dt * a;
        } else {
            vz = 0.0;
        }
        z += dt * vz;
        m = rocket.mass_at(t);

        let p = log.position()[i + 1];
        assert!((p[2] - z).abs() <= 1e-9 * z.abs().max(1.0), "t={t}: {} vs {z}", p[2]);
        assert_eq!(p[0], 0.0);
        assert_eq!(p[1], 0.0);
        assert_eq!(p[3], 0.0);
        assert_eq!(p[4], 0.0);
    }
}

#[test]
fn coast_phase_matches_closed_form_within_truncation_error() {
    let cfg = ballistic();
    let sim = flown(&cfg);
    let log = sim.log();
    let dt = cfg.step_s;

    // first sample whose acceleration was computed with the motor off
    let k = log.time().iter().position(|&t| t >= sim.rocket().burn_time).unwrap();
    let (t0, z0, v0) = (log.time()[k], log.position()[k][2], log.velocity()[k][2]);
    assert!(v0 > 0.0);

    for i in k..log.len() {
        let tau = log.time()[i] - t0;
        let closed = z0 + v0 * tau - 0.5 * G0 * tau * tau;
        let bound = 0.5 * G0 * dt * tau + 1e-6 * closed.abs().max(1.0);
        let z = log.position()[i][2];
        assert!((z - closed).abs() <= bound, "t={}: {} vs {}", log.time()[i], z, closed);
    }
}

// ==================================================================================
// Time grid and validation
// ==================================================================================

#[test]
fn time_grid_advances_by_the_integration_step() {
    let cfg = RocketConfig { time_horizon_s: 9.9, step_s: 0.3, ..ballistic() };
    let sim = flown(&cfg);
    let time = sim.log().time();
    assert_eq!(time.len(), 34);
    assert!(time.windows(2).all(|w| (w[1] - w[0] - cfg.step_s).abs() < 1e-12));
    assert!((time.last().unwrap() - cfg.time_horizon_s).abs() < 1e-12);

    // burn gating sees the same clock the integrator advances
    let thrusting = sim.log().thrust_force().iter().filter(|f| f.norm() > 0.0).count();
    let expected = time[..time.len() - 1].iter().filter(|&&t| t < cfg.burn_s).count();
    assert_eq!(thrusting, expected);
}

#[test]
fn off_grid_or_oversized_horizons_are_rejected_without_panicking() {
    let off_grid = RocketConfig { time_horizon_s: 10.0, step_s: 0.3, ..presets::mk1() };
    assert!(Simulation::new(&off_grid).is_err());
    let huge = RocketConfig { time_horizon_s: 1e300, step_s: 1e-300, ..presets::mk1() };
    assert!(Simulation::new(&huge).is_err());
    assert!(Simulation::with_tvc(&huge, &presets::mk1_tvc()).is_err());
}

// ==================================================================================
// Extreme wind
// ==================================================================================

#[test]
fn tvc_survives_the_extreme_wind_study() {
    let cases = launchsim::sim::sweep::extreme_wind_study(&presets::mk1(), presets::mk1_tvc());
    let limit = presets::mk1_tvc().max_deflection_deg.to_radians();
    for (case, result) in cases.iter().zip(launchsim::sim::run_parallel(&cases)) {
        let sim = result.unwrap();
        let log = sim.log();
        assert!(log.is_complete(), "{}", case.label);
        assert!(log.position().iter().all(|p| p.iter().all(|x| x.is_finite())), "{}", case.label);
        assert!(log.gimbal().iter().all(|g| g.pitch.abs() <= limit && g.yaw.abs() <= limit));
        let apogee = log.position().iter().map(|p| p[2]).fold(0.0_f64, f64::max);
        assert!(apogee > 1_000.0, "{}: apogee {apogee}", case.label);
    }
}

// ==================================================================================
// Scenario files
// ==================================================================================

#[test]
fn bundled_scenario_matches_preset() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/mk1.yaml");
    let text = std::fs::read_to_string(path).unwrap();
    let scenario: launchsim::vehicle::ScenarioConfig = serde_yaml::from_str(&text).unwrap();
    assert_eq!(scenario.rocket, presets::mk1());
    assert_eq!(scenario.tvc, Some(presets::mk1_tvc()));
}
