// REFERENCE OWNSHIP/TRAFFIC TRAJECTORY FAMILY: A CONSTANT-VELOCITY
// STRAIGHT-LINE TRACK, THE SIMPLEST INSTANCE OF THE CONCRETE PER-VARIABLE
// KINEMATIC TRAJECTORY GENERATOR KEPT ABSTRACT ELSEWHERE. DEMO/TEST-ONLY:
// NEVER IMPORTED BY bands.rs OR ANY OTHER CORE MODULE.

use crate::traits::{OwnshipKinematics, TrafficKinematics, Vector3};

// A STRAIGHT-LINE CONSTANT-VELOCITY TRACK. USED BOTH AS OWNSHIP (WITH
// own_val TRACKING THE CONTROL VARIABLE, E.G. A COMMANDED TRACK ANGLE)
// AND AS TRAFFIC (WITH id).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearKinematics {
    own_val: f64,
    time_step: f64,
    position: Vector3,
    velocity: Vector3,
    id: u64,
}

impl LinearKinematics {
    pub fn new(own_val: f64, time_step: f64, position: Vector3, velocity: Vector3, id: u64) -> Self {
        Self {
            own_val,
            time_step,
            position,
            velocity,
            id,
        }
    }
}

impl OwnshipKinematics for LinearKinematics {
    fn own_val(&self) -> f64 {
        self.own_val
    }

    fn time_step(&self) -> f64 {
        self.time_step
    }

    fn position(&self) -> Vector3 {
        self.position
    }

    fn velocity(&self) -> Vector3 {
        self.velocity
    }

    fn project(&self, dt: f64) -> Self {
        Self {
            own_val: self.own_val,
            time_step: self.time_step,
            position: Vector3::new(
                self.position.x + self.velocity.x * dt,
                self.position.y + self.velocity.y * dt,
                self.position.z + self.velocity.z * dt,
            ),
            velocity: self.velocity,
            id: self.id,
        }
    }
}

impl TrafficKinematics for LinearKinematics {
    fn id(&self) -> u64 {
        self.id
    }

    fn position(&self) -> Vector3 {
        self.position
    }

    fn velocity(&self) -> Vector3 {
        self.velocity
    }

    fn project(&self, dt: f64) -> Self {
        OwnshipKinematics::project(self, dt)
    }
}
