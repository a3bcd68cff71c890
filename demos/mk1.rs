use launchsim::io::FlightSummary;
use launchsim::sim::{run_parallel, SweepCase};
use launchsim::vehicle::{presets, RocketConfig};

/// Fly the Mk1 into an 8 m/s headwind with a fixed nozzle and with TVC,
/// then compare how well each holds its launch attitude.
fn main() -> anyhow::Result<()> {
    let rocket = RocketConfig {
        wind_speed_mps: 8.0,
        wind_dir_deg: 90.0,
        ..presets::mk1()
    };
    let cases = [
        SweepCase { label: "fixed nozzle".into(), rocket: rocket.clone(), tvc: None },
        SweepCase { label: "TVC".into(), rocket, tvc: Some(presets::mk1_tvc()) },
    ];

    for (case, result) in cases.iter().zip(run_parallel(&cases)) {
        let sim = result?;
        let s = FlightSummary::from_simulation(&sim);
        println!("{}:", case.label);
        println!("  Apogee:            {:.0} m at t={:.2} s", s.apogee_m, s.apogee_time_s);
        println!("  Max speed:         {:.1} m/s", s.max_speed_mps);
        println!("  Landing point:     {:.0} m E, {:.0} m N", s.touchdown_east_m, s.touchdown_north_m);
        println!("  Max attitude err:  {:.2} deg", s.max_attitude_error_rad.to_degrees());
        println!("  Max gimbal:        {:.2} deg", s.max_gimbal_rad.to_degrees());
    }
    Ok(())
}
