use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use launchsim::io::{self, FlightSummary};
use launchsim::sim::{detect_events, run_parallel, sweep, EventKind, Simulation};
use launchsim::vehicle::{presets, RocketConfig, ScenarioConfig};

#[derive(Parser, Debug)]
#[command(name = "launchsim")]
#[command(about = "Single-stage rocket trajectory simulator with thrust-vector control")]
#[command(version)]
struct Args {
    /// Scenario YAML file (defaults to the built-in Mk1 rocket, see scenarios/mk1.yaml)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Enable thrust-vector control (uses the scenario's gains, or the Mk1 gains)
    #[arg(long)]
    tvc: bool,

    /// Write every output series to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON flight summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Rerun the wind study (calm, head-, cross- and tailwind) with and without TVC
    #[arg(long)]
    wind_sweep: bool,

    /// With --wind-sweep, run the extreme-wind study (17 to 25 m/s, TVC only)
    #[arg(long, requires = "wind_sweep")]
    extreme: bool,
}

fn load_scenario(path: Option<&PathBuf>) -> Result<ScenarioConfig> {
    let Some(path) = path else {
        return Ok(ScenarioConfig { rocket: presets::mk1(), tvc: Some(presets::mk1_tvc()) });
    };
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let scenario: ScenarioConfig = serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse scenario {}", path.display()))?;
    Ok(scenario)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let scenario = load_scenario(args.scenario.as_ref())?;

    if args.wind_sweep {
        return wind_sweep(&scenario, args.extreme, args.summary.as_ref());
    }

    let mut sim = match (&scenario.tvc, args.tvc) {
        (Some(tvc), true) => Simulation::with_tvc(&scenario.rocket, tvc)?,
        (None, true) => Simulation::with_tvc(&scenario.rocket, &presets::mk1_tvc())?,
        (_, false) => Simulation::new(&scenario.rocket)?,
    };
    sim.run();

    print_report(&scenario.rocket, &sim);

    if let Some(path) = &args.csv {
        io::write_flight_log_file(path, sim.log())
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("wrote flight log to {}", path.display());
    }
    if let Some(path) = &args.summary {
        io::write_summary_file(path, &[FlightSummary::from_simulation(&sim)])
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("wrote summary to {}", path.display());
    }
    Ok(())
}

fn wind_sweep(scenario: &ScenarioConfig, extreme: bool, summary: Option<&PathBuf>) -> Result<()> {
    let tvc = scenario.tvc.unwrap_or_else(presets::mk1_tvc);
    let cases = if extreme {
        sweep::extreme_wind_study(&scenario.rocket, tvc)
    } else {
        sweep::wind_study(&scenario.rocket, tvc)
    };

    let results = run_parallel(&cases);

    println!();
    println!("  Wind study{}", if extreme { " (extreme)" } else { "" });
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:<26}  {:>9}  {:>10}  {:>10}  {:>9}",
        "case", "apogee(m)", "east(m)", "north(m)", "err(deg)"
    );
    let mut summaries = Vec::with_capacity(results.len());
    for (case, result) in cases.iter().zip(results) {
        let sim = result.with_context(|| format!("case '{}' failed", case.label))?;
        let s = FlightSummary::from_simulation(&sim);
        println!(
            "  {:<26}  {:>9.0}  {:>10.0}  {:>10.0}  {:>9.2}",
            case.label,
            s.apogee_m,
            s.touchdown_east_m,
            s.touchdown_north_m,
            s.max_attitude_error_rad.to_degrees()
        );
        summaries.push(s);
    }
    println!();

    if let Some(path) = summary {
        io::write_summary_file(path, &summaries)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn print_report(cfg: &RocketConfig, sim: &Simulation) {
    let rocket = sim.rocket();
    let log = sim.log();
    let summary = FlightSummary::from_simulation(sim);
    let events = detect_events(log, rocket);

    println!();
    println!("====================================================================");
    println!("  ROCKET FLIGHT SIMULATION: {}", sim.thrust_model_name());
    println!("====================================================================");
    println!();
    println!("  Vehicle Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Dry mass:      {:>8.2} kg    Wet mass:     {:>8.2} kg",
        rocket.dry_mass, rocket.wet_mass
    );
    println!(
        "  Thrust:        {:>8.0} N     Burn time:    {:>8.2} s",
        rocket.thrust, rocket.burn_time
    );
    println!(
        "  TWR:           {:>8.2}       Impulse:      {:>8.0} N·s",
        rocket.twr(),
        rocket.total_impulse()
    );
    println!(
        "  Launch:        {:>6.1}° elev  {:>6.1}° az     Wind: {:.1} m/s from {:.0}°",
        cfg.launch_angle.elevation_deg,
        cfg.launch_angle.azimuth_deg,
        cfg.wind_speed_mps,
        cfg.wind_dir_deg
    );
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &events {
        let label = match e.kind {
            EventKind::RailExit => "RAIL EXIT",
            EventKind::Burnout => "BURNOUT",
            EventKind::Apogee => "APOGEE",
            EventKind::Touchdown => "TOUCHDOWN",
        };
        let p = e.state.pos;
        println!(
            "  {:<10} t={:>6.2}s   alt={:>8.0}m   east={:>7.0}m   north={:>7.0}m",
            label, e.time, p[2], p[0], p[1]
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Apogee:        {:>8.0} m   at t={:.2} s",
        summary.apogee_m, summary.apogee_time_s
    );
    println!("  Max speed:     {:>8.1} m/s", summary.max_speed_mps);
    println!("  Max accel:     {:>8.1} m/s^2", summary.max_accel_mps2);
    println!(
        "  Touchdown:     {:>8.0} m East, {:.0} m North",
        summary.touchdown_east_m, summary.touchdown_north_m
    );
    println!(
        "  Attitude hold: {:>8.3}° max error during burn (max gimbal {:.2}°)",
        summary.max_attitude_error_rad.to_degrees(),
        summary.max_gimbal_rad.to_degrees()
    );
    println!();
    println!(
        "  Simulation: {} samples, dt={} s",
        log.len(),
        cfg.step_s
    );
    println!("====================================================================");
    println!();
}
