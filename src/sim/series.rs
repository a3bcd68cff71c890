use nalgebra::Vector3;

use crate::dynamics::state::{AngleOfAttack, Gen5, GimbalCommand};

/// Time-indexed output of one simulation run.
///
/// Every buffer is allocated for the full horizon when the simulation is
/// built and filled front to back, one sample per completed step. Accessors
/// only expose the filled prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightLog {
    time: Vec<f64>,
    position: Vec<Gen5>,
    velocity: Vec<Gen5>,
    acceleration: Vec<Gen5>,
    mass: Vec<f64>,
    air_density: Vec<f64>,
    angle_of_attack: Vec<AngleOfAttack>,
    thrust_force: Vec<Vector3<f64>>,
    drag_force: Vec<Vector3<f64>>,
    lift_force: Vec<Vector3<f64>>,
    gimbal: Vec<GimbalCommand>,
    filled: usize,
}

/// Kinematic snapshot at one sample index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub index: usize,
    pub time: f64,
    pub pos: Gen5,
    pub vel: Gen5,
}

impl FlightLog {
    /// Buffers for `samples` points evenly spanning `[0, horizon]`, with
    /// sample 0 set from the launch state.
    pub(crate) fn new(
        samples: usize,
        horizon: f64,
        launch_pos: Gen5,
        wet_mass: f64,
        sea_level_density: f64,
    ) -> Self {
        let samples = samples.max(1);
        let time = if samples > 1 {
            let intervals = (samples - 1) as f64;
            (0..samples).map(|i| horizon * i as f64 / intervals).collect()
        } else {
            vec![0.0]
        };

        let mut position = vec![Gen5::zeros(); samples];
        position[0] = launch_pos;
        let mut mass = vec![0.0; samples];
        mass[0] = wet_mass;
        let mut air_density = vec![0.0; samples];
        air_density[0] = sea_level_density;

        Self {
            time,
            position,
            velocity: vec![Gen5::zeros(); samples],
            acceleration: vec![Gen5::zeros(); samples],
            mass,
            air_density,
            angle_of_attack: vec![AngleOfAttack::default(); samples],
            thrust_force: vec![Vector3::zeros(); samples],
            drag_force: vec![Vector3::zeros(); samples],
            lift_force: vec![Vector3::zeros(); samples],
            gimbal: vec![GimbalCommand::default(); samples],
            filled: 1,
        }
    }

    /// Total number of samples the run will produce.
    pub fn capacity(&self) -> usize {
        self.time.len()
    }

    /// Number of samples filled so far.
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn is_complete(&self) -> bool {
        self.filled == self.capacity()
    }

    pub fn time(&self) -> &[f64] {
        &self.time[..self.filled]
    }

    pub fn position(&self) -> &[Gen5] {
        &self.position[..self.filled]
    }

    pub fn velocity(&self) -> &[Gen5] {
        &self.velocity[..self.filled]
    }

    pub fn acceleration(&self) -> &[Gen5] {
        &self.acceleration[..self.filled]
    }

    pub fn mass(&self) -> &[f64] {
        &self.mass[..self.filled]
    }

    pub fn air_density(&self) -> &[f64] {
        &self.air_density[..self.filled]
    }

    pub fn angle_of_attack(&self) -> &[AngleOfAttack] {
        &self.angle_of_attack[..self.filled]
    }

    pub fn thrust_force(&self) -> &[Vector3<f64>] {
        &self.thrust_force[..self.filled]
    }

    pub fn drag_force(&self) -> &[Vector3<f64>] {
        &self.drag_force[..self.filled]
    }

    pub fn lift_force(&self) -> &[Vector3<f64>] {
        &self.lift_force[..self.filled]
    }

    pub fn gimbal(&self) -> &[GimbalCommand] {
        &self.gimbal[..self.filled]
    }

    pub fn snapshot(&self, index: usize) -> Option<Snapshot> {
        (index < self.filled).then(|| Snapshot {
            index,
            time: self.time[index],
            pos: self.position[index],
            vel: self.velocity[index],
        })
    }

    /// Most recent snapshot.
    pub fn last(&self) -> Snapshot {
        let i = self.filled - 1;
        Snapshot {
            index: i,
            time: self.time[i],
            pos: self.position[i],
            vel: self.velocity[i],
        }
    }

    // --- latest auxiliary samples, read by the force models ---

    pub(crate) fn current_mass(&self) -> f64 {
        self.mass[self.filled - 1]
    }

    pub(crate) fn current_density(&self) -> f64 {
        self.air_density[self.filled - 1]
    }

    pub(crate) fn current_alpha(&self) -> f64 {
        self.angle_of_attack[self.filled - 1].alpha
    }

    // --- writers for the sample being built; `advance` commits it ---

    fn pending(&self) -> Option<usize> {
        (self.filled < self.capacity()).then_some(self.filled)
    }

    pub(crate) fn record_forces(
        &mut self,
        acc: Gen5,
        thrust: Vector3<f64>,
        drag: Vector3<f64>,
        lift: Vector3<f64>,
        gimbal: GimbalCommand,
    ) {
        if let Some(i) = self.pending() {
            self.acceleration[i] = acc;
            self.thrust_force[i] = thrust;
            self.drag_force[i] = drag;
            self.lift_force[i] = lift;
            self.gimbal[i] = gimbal;
        }
    }

    pub(crate) fn record_state(&mut self, pos: Gen5, vel: Gen5) {
        if let Some(i) = self.pending() {
            self.position[i] = pos;
            self.velocity[i] = vel;
        }
    }

    pub(crate) fn record_aux(&mut self, mass: f64, density: f64, aoa: AngleOfAttack) {
        if let Some(i) = self.pending() {
            self.mass[i] = mass;
            self.air_density[i] = density;
            self.angle_of_attack[i] = aoa;
        }
    }

    pub(crate) fn advance(&mut self) {
        if self.filled < self.capacity() {
            self.filled += 1;
        }
    }
}
