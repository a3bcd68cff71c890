use crate::physics::gravity::on_rail;
use crate::vehicle::Rocket;
use super::series::{FlightLog, Snapshot};

// ---------------------------------------------------------------------------
// Flight events, extracted from a finished log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    RailExit,
    Burnout,
    Apogee,
    Touchdown,
}

/// A discrete event and the first sample at which it was observed.
#[derive(Debug, Clone)]
pub struct FlightEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: Snapshot,
}

/// Passive detector over consecutive samples. Each fires at most once.
pub trait EventDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind>;
}

pub struct RailExitDetector {
    rail_length: f64,
    fired: bool,
}

impl RailExitDetector {
    pub fn new(rail_length: f64) -> Self {
        Self { rail_length, fired: false }
    }
}

impl EventDetector for RailExitDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        if !self.fired
            && on_rail(&prev.pos, self.rail_length)
            && !on_rail(&current.pos, self.rail_length)
        {
            self.fired = true;
            Some(EventKind::RailExit)
        } else {
            None
        }
    }
}

pub struct BurnoutDetector {
    burn_time: f64,
    fired: bool,
}

impl BurnoutDetector {
    pub fn new(burn_time: f64) -> Self {
        Self { burn_time, fired: false }
    }
}

impl EventDetector for BurnoutDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        if !self.fired && prev.time < self.burn_time && current.time >= self.burn_time {
            self.fired = true;
            Some(EventKind::Burnout)
        } else {
            None
        }
    }
}

/// Vertical velocity changing sign from up to down.
#[derive(Default)]
pub struct ApogeeDetector {
    fired: bool,
}

impl EventDetector for ApogeeDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        if !self.fired && prev.vel[2] > 0.0 && current.vel[2] <= 0.0 {
            self.fired = true;
            Some(EventKind::Apogee)
        } else {
            None
        }
    }
}

/// First sample below ground after having been airborne.
#[derive(Default)]
pub struct TouchdownDetector {
    airborne: bool,
    fired: bool,
}

impl EventDetector for TouchdownDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        if prev.pos[2] > 0.0 {
            self.airborne = true;
        }
        if !self.fired && self.airborne && current.pos[2] < 0.0 {
            self.fired = true;
            Some(EventKind::Touchdown)
        } else {
            None
        }
    }
}

/// Run the standard detectors over a log, in time order.
pub fn detect_events(log: &FlightLog, rocket: &Rocket) -> Vec<FlightEvent> {
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(RailExitDetector::new(rocket.rail_length)),
        Box::new(BurnoutDetector::new(rocket.burn_time)),
        Box::new(ApogeeDetector::default()),
        Box::new(TouchdownDetector::default()),
    ];

    let mut events = Vec::new();
    let mut prev = match log.snapshot(0) {
        Some(s) => s,
        None => return events,
    };
    for i in 1..log.len() {
        let Some(current) = log.snapshot(i) else { break };
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&prev, &current) {
                events.push(FlightEvent { time: current.time, kind, state: current });
            }
        }
        prev = current;
    }
    events
}
