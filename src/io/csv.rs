use std::io::{self, Write};
use std::path::Path;

use crate::sim::FlightLog;

/// Write every output series as CSV, one row per sample.
///
/// Columns: time, east, north, alt, pitch, yaw, vel_* (5), acc_* (5),
///          mass, air_density, aoa_wind, aoa_body, aoa,
///          thrust_*, drag_*, lift_* (3 each), gimbal_pitch, gimbal_yaw
pub fn write_flight_log<W: Write>(writer: &mut W, log: &FlightLog) -> io::Result<()> {
    writeln!(
        writer,
        "time,east,north,alt,pitch,yaw,\
         vel_east,vel_north,vel_alt,vel_pitch,vel_yaw,\
         acc_east,acc_north,acc_alt,acc_pitch,acc_yaw,\
         mass,air_density,aoa_wind,aoa_body,aoa,\
         thrust_east,thrust_north,thrust_alt,\
         drag_east,drag_north,drag_alt,\
         lift_east,lift_north,lift_alt,\
         gimbal_pitch,gimbal_yaw"
    )?;

    for i in 0..log.len() {
        let p = &log.position()[i];
        let v = &log.velocity()[i];
        let a = &log.acceleration()[i];
        let aoa = &log.angle_of_attack()[i];
        let ft = &log.thrust_force()[i];
        let fd = &log.drag_force()[i];
        let fl = &log.lift_force()[i];
        let g = &log.gimbal()[i];
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.6},{:.6},\
             {:.4},{:.4},{:.4},{:.6},{:.6},\
             {:.4},{:.4},{:.4},{:.6},{:.6},\
             {:.4},{:.6},{:.6},{:.6},{:.6},\
             {:.4},{:.4},{:.4},\
             {:.4},{:.4},{:.4},\
             {:.4},{:.4},{:.4},\
             {:.6},{:.6}",
            log.time()[i],
            p[0], p[1], p[2], p[3], p[4],
            v[0], v[1], v[2], v[3], v[4],
            a[0], a[1], a[2], a[3], a[4],
            log.mass()[i],
            log.air_density()[i],
            aoa.relative_wind, aoa.body_axis, aoa.alpha,
            ft.x, ft.y, ft.z,
            fd.x, fd.y, fd.z,
            fl.x, fl.y, fl.z,
            g.pitch, g.yaw,
        )?;
    }

    Ok(())
}

/// Write the flight log to a CSV file at the given path.
pub fn write_flight_log_file(path: impl AsRef<Path>, log: &FlightLog) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_flight_log(&mut file, log)?;
    file.flush()
}
