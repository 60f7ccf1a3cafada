use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::dynamics::State;
use crate::orbital::OrbitSummary;
use crate::physics::constants::MU_EARTH;
use crate::sim::{EventKind, FlightRecord, Outcome, Telemetry};

/// Summary statistics computed from a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub apogee_m: f64,
    pub apogee_time: f64,
    pub max_speed: f64,
    pub max_mach: f64,
    pub max_dynamic_pressure: f64,
    pub burnout_time: Option<f64>,
    pub flight_time: f64,
    pub outcome: Outcome,
    pub final_orbit: OrbitSummary,
}

impl FlightSummary {
    /// `final_state` is the simulation state at the end of the run; the
    /// record only keeps sampled telemetry.
    pub fn from_record(record: &FlightRecord, final_state: &State) -> Self {
        // Events are logged at the exact tick, samples only at the cadence.
        let sampled = record.samples.iter().map(|t| (t.time, t.altitude));
        let evented = record.events.iter().map(|e| (e.time, e.altitude));
        let (apogee_time, apogee_m) = sampled
            .chain(evented)
            .fold((0.0, f64::NEG_INFINITY), |best, cur| if cur.1 > best.1 { cur } else { best });

        let max_of = |f: fn(&Telemetry) -> f64| {
            record.samples.iter().map(f).fold(0.0_f64, f64::max)
        };

        let burnout_time = record
            .events
            .iter()
            .find(|e| e.kind == EventKind::Burnout)
            .map(|e| e.time);

        let flight_time = match record.outcome {
            Outcome::Crashed { time, .. } => time,
            Outcome::Completed => record.samples.last().map(|t| t.time).unwrap_or(0.0),
        };

        FlightSummary {
            apogee_m,
            apogee_time,
            max_speed: max_of(|t| t.speed),
            max_mach: max_of(|t| t.mach),
            max_dynamic_pressure: max_of(|t| t.dynamic_pressure),
            burnout_time,
            flight_time,
            outcome: record.outcome,
            final_orbit: OrbitSummary::from_state(&final_state.pos, &final_state.vel, MU_EARTH),
        }
    }
}

/// Write the summary as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: &mut W, summary: &FlightSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)
}

pub fn write_summary_file(path: impl AsRef<Path>, summary: &FlightSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::EARTH_RADIUS;
    use crate::sim::SimEvent;
    use nalgebra::Vector3;

    fn telemetry(time: f64, altitude: f64, speed: f64) -> Telemetry {
        Telemetry {
            time,
            altitude,
            speed,
            radial_velocity: speed,
            acceleration: 0.0,
            mass: 2000.0,
            fuel_ratio: 0.0,
            dynamic_pressure: 0.5 * 1.2 * speed * speed,
            mach: speed / 340.0,
            angle_of_attack: 0.0,
            drag_coefficient: 0.2,
            lift_coefficient: 0.0,
            temperature: 288.0,
            pressure: 101_325.0,
            stagnation_temperature: 288.0,
        }
    }

    fn record() -> FlightRecord {
        FlightRecord {
            samples: vec![
                telemetry(0.0, 0.0, 0.0),
                telemetry(1.0, 500.0, 300.0),
                telemetry(2.0, 700.0, 50.0),
            ],
            events: vec![
                SimEvent { time: 0.8, altitude: 400.0, kind: EventKind::Burnout },
                SimEvent { time: 2.1, altitude: 705.0, kind: EventKind::Apogee },
            ],
            outcome: Outcome::Completed,
        }
    }

    #[test]
    fn summary_picks_extremes_and_events() {
        let last = State::new(
            Vector3::new(EARTH_RADIUS + 700.0, 0.0, 0.0),
            Vector3::zeros(),
            2000.0,
        );
        let s = FlightSummary::from_record(&record(), &last);

        assert_eq!(s.apogee_m, 705.0);
        assert_eq!(s.apogee_time, 2.1);
        assert_eq!(s.max_speed, 300.0);
        assert_eq!(s.burnout_time, Some(0.8));
        assert_eq!(s.flight_time, 2.0);
        assert!(s.max_dynamic_pressure > 50_000.0);
    }

    #[test]
    fn json_has_expected_keys() {
        let last = State::new(
            Vector3::new(EARTH_RADIUS + 700.0, 0.0, 0.0),
            Vector3::new(0.0, 100.0, 0.0),
            2000.0,
        );
        let s = FlightSummary::from_record(&record(), &last);

        let mut buf = Vec::new();
        write_summary(&mut buf, &s).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["apogee_m"], 705.0);
        assert_eq!(value["outcome"], "Completed");
        assert!(value["final_orbit"]["ecc"].is_number());
    }

    #[test]
    fn vertical_climb_reports_finite_apoapsis() {
        let last = State::new(
            Vector3::new(0.0, 0.0, EARTH_RADIUS + 700.0),
            Vector3::new(0.0, 0.0, 250.0),
            2000.0,
        );
        let s = FlightSummary::from_record(&record(), &last);
        assert!(s.final_orbit.is_bound());

        let mut buf = Vec::new();
        write_summary(&mut buf, &s).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let apo = value["final_orbit"]["apoapsis_altitude"].as_f64().expect("apoapsis written as a number");
        assert!(apo > 700.0);
    }
}
