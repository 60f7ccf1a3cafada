use std::io::{self, Write};
use std::path::Path;

use crate::sim::Telemetry;

pub const HEADER: &str = "time,altitude,speed,radial_velocity,acceleration,mass,fuel_ratio,\
                          dynamic_pressure,mach,angle_of_attack_deg,cd,cl,\
                          temperature,pressure,stagnation_temperature";

/// Write telemetry samples as CSV, one row per sample.
pub fn write_telemetry<W: Write>(writer: &mut W, samples: &[Telemetry]) -> io::Result<()> {
    writeln!(writer, "{HEADER}")?;

    for t in samples {
        writeln!(
            writer,
            "{:.3},{:.2},{:.3},{:.3},{:.4},{:.3},{:.6},\
             {:.2},{:.4},{:.3},{:.4},{:.4},\
             {:.2},{:.2},{:.2}",
            t.time,
            t.altitude,
            t.speed,
            t.radial_velocity,
            t.acceleration,
            t.mass,
            t.fuel_ratio,
            t.dynamic_pressure,
            t.mach,
            t.angle_of_attack.to_degrees(),
            t.drag_coefficient,
            t.lift_coefficient,
            t.temperature,
            t.pressure,
            t.stagnation_temperature,
        )?;
    }

    Ok(())
}

pub fn write_telemetry_file(path: impl AsRef<Path>, samples: &[Telemetry]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_telemetry(&mut file, samples)?;
    file.flush()
}
