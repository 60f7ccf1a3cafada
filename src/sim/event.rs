use serde::Serialize;

use crate::dynamics::State;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventKind {
    Ignition,
    Burnout,
    Apogee,
    Crash,
    Altitude { altitude: f64, ascending: bool },
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimEvent {
    pub time: f64,
    pub altitude: f64,
    pub kind: EventKind,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind>;
}

/// Detects apogee: radial velocity going from positive to non-positive.
#[derive(Debug, Default)]
pub struct ApogeeDetector;

impl EventDetector for ApogeeDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind> {
        if prev.radial_velocity() > 0.0 && current.radial_velocity() <= 0.0 {
            Some(EventKind::Apogee)
        } else {
            None
        }
    }
}

/// Detects when altitude crosses a threshold (ascending or descending).
/// Fires once.
#[derive(Debug)]
pub struct AltitudeDetector {
    pub altitude: f64,
    pub ascending: bool,
    fired: bool,
}

impl AltitudeDetector {
    pub fn new(altitude: f64, ascending: bool) -> Self {
        Self { altitude, ascending, fired: false }
    }
}

impl EventDetector for AltitudeDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let (h0, h1) = (prev.altitude(), current.altitude());
        let crossed = if self.ascending {
            h0 < self.altitude && h1 >= self.altitude
        } else {
            h0 > self.altitude && h1 <= self.altitude
        };
        if crossed {
            self.fired = true;
            Some(EventKind::Altitude { altitude: self.altitude, ascending: self.ascending })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::EARTH_RADIUS;
    use nalgebra::Vector3;

    fn make_state(alt: f64, vr: f64) -> State {
        State::new(
            Vector3::new(0.0, 0.0, EARTH_RADIUS + alt),
            Vector3::new(0.0, 0.0, vr),
            100.0,
        )
    }

    #[test]
    fn apogee_detected() {
        let mut det = ApogeeDetector;
        let prev = make_state(5000.0, 10.0);
        let curr = make_state(5005.0, -1.0);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::Apogee));
        assert_eq!(det.check(&curr, &curr), None);
    }

    #[test]
    fn altitude_detector_ascending() {
        let mut det = AltitudeDetector::new(1000.0, true);
        let prev = make_state(900.0, 100.0);
        let curr = make_state(1050.0, 100.0);
        assert!(det.check(&prev, &curr).is_some());
        // Should not fire again
        assert!(det.check(&prev, &curr).is_none());
    }

    #[test]
    fn altitude_detector_descending_ignores_climb() {
        let mut det = AltitudeDetector::new(1000.0, false);
        assert!(det.check(&make_state(900.0, 50.0), &make_state(1100.0, 50.0)).is_none());
        assert_eq!(
            det.check(&make_state(1100.0, -50.0), &make_state(900.0, -50.0)),
            Some(EventKind::Altitude { altitude: 1000.0, ascending: false })
        );
    }
}
