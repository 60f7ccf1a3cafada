use log::info;
use serde::Serialize;

use super::controller::Simulation;
use super::event::{AltitudeDetector, ApogeeDetector, EventDetector, EventKind, SimEvent};
use super::telemetry::Telemetry;

/// Conventional edge of space, m.
pub const KARMAN_LINE: f64 = 100_000.0;

// ---------------------------------------------------------------------------
// Run configuration and result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub max_time: f64,         // hard stop, s
    pub sample_interval: f64,  // telemetry cadence, s
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_time: 300.0,
            sample_interval: 1.0,
        }
    }
}

/// How the run ended. Both are normal flight outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Outcome {
    Completed,
    Crashed { time: f64, impact_speed: f64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct FlightRecord {
    pub samples: Vec<Telemetry>,
    pub events: Vec<SimEvent>,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Driver loop
// ---------------------------------------------------------------------------

/// Step `sim` until `max_time` elapses or the vehicle drops below the surface.
/// Telemetry is sampled every `sample_interval` seconds, plus the initial and
/// final instants.
pub fn run(sim: &mut Simulation, config: &RunConfig) -> FlightRecord {
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(ApogeeDetector),
        Box::new(AltitudeDetector::new(KARMAN_LINE, true)),
    ];

    let mut samples = vec![sim.telemetry()];
    let mut events = Vec::new();

    if sim.propulsion().engines().iter().any(|e| e.is_active()) {
        push_event(&mut events, sim, EventKind::Ignition);
    }

    let mut next_sample = config.sample_interval;
    let mut outcome = Outcome::Completed;

    while sim.elapsed() + 0.5 * sim.dt() < config.max_time {
        let prev = sim.state().clone();
        let was_depleted = sim.propulsion().is_depleted();

        sim.step();

        if !was_depleted && sim.propulsion().is_depleted() {
            push_event(&mut events, sim, EventKind::Burnout);
        }
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&prev, sim.state()) {
                push_event(&mut events, sim, kind);
            }
        }

        if sim.elapsed() + 1e-9 >= next_sample {
            samples.push(sim.telemetry());
            next_sample += config.sample_interval;
        }

        if sim.state().altitude() < 0.0 {
            push_event(&mut events, sim, EventKind::Crash);
            outcome = Outcome::Crashed {
                time: sim.elapsed(),
                impact_speed: sim.state().speed(),
            };
            break;
        }
    }

    let last_sampled = samples.last().map(|s| s.time).unwrap_or(f64::NAN);
    if last_sampled != sim.elapsed() {
        samples.push(sim.telemetry());
    }

    info!(
        "run finished: {:?}, t={:.2}s, {} samples, {} events",
        outcome,
        sim.elapsed(),
        samples.len(),
        events.len()
    );

    FlightRecord { samples, events, outcome }
}

fn push_event(events: &mut Vec<SimEvent>, sim: &Simulation, kind: EventKind) {
    info!("{:?} at t={:.2}s, alt={:.0}m", kind, sim.elapsed(), sim.state().altitude());
    events.push(SimEvent {
        time: sim.elapsed(),
        altitude: sim.state().altitude(),
        kind,
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::State;
    use crate::physics::constants::EARTH_RADIUS;
    use crate::vehicle::{Engine, PropulsionSystem, RocketBody};
    use nalgebra::Vector3;

    fn sim(altitude: f64, fuel: f64) -> Simulation {
        let rocket = RocketBody::new(20.0, 2.0, 2000.0 + fuel, 2000.0).unwrap();
        let mut propulsion = PropulsionSystem::new(fuel, 5.0).unwrap();
        propulsion.add_engine(Engine::new(100_000.0, 300.0, 0.5, 20.0).unwrap());
        let initial = State::new(
            Vector3::new(EARTH_RADIUS + altitude, 0.0, 0.0),
            Vector3::zeros(),
            rocket.mass(),
        );
        Simulation::new(initial, rocket, propulsion, 0.01).unwrap()
    }

    #[test]
    fn unpowered_drop_crashes() {
        let mut s = sim(50.0, 3000.0);
        let record = run(&mut s, &RunConfig { max_time: 60.0, sample_interval: 1.0 });
        match record.outcome {
            Outcome::Crashed { time, impact_speed } => {
                // sqrt(2h/g) ~ 3.2 s
                assert!(time > 3.0 && time < 3.5, "impact at {time}");
                assert!(impact_speed > 25.0);
            }
            Outcome::Completed => panic!("should have hit the ground"),
        }
        assert!(record.events.iter().any(|e| e.kind == EventKind::Crash));
        assert!(!record.events.iter().any(|e| e.kind == EventKind::Ignition));
    }

    #[test]
    fn samples_at_cadence_and_final_tick() {
        let mut s = sim(100.0, 3000.0);
        s.start_engines();
        s.set_throttle(1.0);
        let record = run(&mut s, &RunConfig { max_time: 5.0, sample_interval: 1.0 });

        assert_eq!(record.outcome, Outcome::Completed);
        let times: Vec<f64> = record.samples.iter().map(|t| t.time).collect();
        assert_eq!(times.len(), 6, "t=0..5 inclusive, got {times:?}");
        assert!((times[5] - 5.0).abs() < 1e-6);
        assert_eq!(record.events[0].kind, EventKind::Ignition);
    }

    #[test]
    fn short_burn_reports_burnout_then_apogee() {
        let mut s = sim(100.0, 200.0);
        s.start_engines();
        s.set_throttle(1.0);
        let record = run(&mut s, &RunConfig { max_time: 60.0, sample_interval: 1.0 });

        let burnout = record.events.iter().position(|e| e.kind == EventKind::Burnout);
        let apogee = record.events.iter().position(|e| e.kind == EventKind::Apogee);
        assert!(burnout.is_some() && apogee.is_some(), "{:?}", record.events);
        assert!(burnout < apogee);
    }
}
