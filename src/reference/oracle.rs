// REFERENCE INTEGER-BAND ORACLE: DRIVES ANY ConflictDetector OVER A
// DISCRETIZED SCAN OF CANDIDATE MANEUVER INDICES, TREATING THE CONTROL
// VARIABLE AS A TRACK-ANGLE-LIKE QUANTITY -- MANEUVER INDEX k ROTATES THE
// OWNSHIP'S VELOCITY VECTOR BY k * step DEGREES IN THE HORIZONTAL PLANE.
// DEMO/TEST-ONLY: THE PRODUCTION ORACLE DRIVING A REAL TRAJECTORY
// GENERATOR IS KEPT AS AN EXTERNAL COLLABORATOR, OUT OF SCOPE HERE.
//
// DISCRETIZED FORWARD-SIMULATION STYLE: PER-STEP RE-EVALUATION OF A
// CONFLICT PREDICATE OVER A CANDIDATE RANGE, APPLIED HERE TO THE
// MANEUVER-INDEX AXIS RATHER THAN THE TIME AXIS.

use crate::interval::IntervalSet;
use crate::none_set::to_interval_set;
use crate::traits::{ConflictDetector, IntegerBandOracle, OracleQuery, OwnshipKinematics, TrafficKinematics, Vector3};

pub struct ReferenceOracle {
    step: f64,
    modulus: f64,
}

impl ReferenceOracle {
    pub fn new(step: f64, modulus: f64) -> Self {
        Self { step, modulus }
    }

    fn rotated_velocity(v: Vector3, degrees: f64) -> Vector3 {
        let theta = degrees.to_radians();
        Vector3::new(
            v.x * theta.cos() - v.y * theta.sin(),
            v.x * theta.sin() + v.y * theta.cos(),
            v.z,
        )
    }

    fn is_green<O, T, D>(&self, k: i64, query: &OracleQuery<O, T, D>) -> bool
    where
        O: OwnshipKinematics,
        T: TrafficKinematics,
        D: ConflictDetector,
    {
        let v_own = Self::rotated_velocity(query.ownship.velocity(), k as f64 * self.step);
        let s_own = query.ownship.position();

        for ac in query.traffic {
            let cd = query.detector.conflict_detection(s_own, v_own, ac.position(), ac.velocity(), query.b, query.t);
            if cd.conflict {
                return false;
            }
            if let Some(recovery_detector) = query.recovery_detector {
                let cd2 = recovery_detector.conflict_detection(s_own, v_own, ac.position(), ac.velocity(), query.b2, query.t2);
                if cd2.conflict {
                    return false;
                }
            }
        }
        true
    }
}

impl<O, T, D> IntegerBandOracle<O, T, D> for ReferenceOracle
where
    O: OwnshipKinematics,
    T: TrafficKinematics,
    D: ConflictDetector,
{
    fn combine(&self, query: &OracleQuery<O, T, D>) -> IntervalSet {
        let mut runs = Vec::new();
        let mut run_start: Option<i64> = None;

        for k in -query.maxdown..=query.maxup {
            let green = self.is_green(k, query);
            match (green, run_start) {
                (true, None) => run_start = Some(k),
                (false, Some(s)) => {
                    runs.push((s, k - 1));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = run_start {
            runs.push((s, query.maxup));
        }

        to_interval_set(&runs, self.step, query.ownship.own_val(), f64::NEG_INFINITY, f64::INFINITY, self.modulus)
    }

    fn any_int_red(&self, query: &OracleQuery<O, T, D>) -> bool {
        (-query.maxdown..=query.maxup).any(|k| !self.is_green(k, query))
    }

    fn all_int_red(&self, query: &OracleQuery<O, T, D>) -> bool {
        (-query.maxdown..=query.maxup).all(|k| !self.is_green(k, query))
    }

    fn first_green(&self, dir: bool, maxn: i64, query: &OracleQuery<O, T, D>) -> i64 {
        for step in 0..=maxn {
            let k = if dir { step } else { -step };
            if self.is_green(k, query) {
                return step;
            }
        }
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cylinder::CylinderDetector;
    use crate::reference::kinematics::LinearKinematics;

    fn ownship() -> LinearKinematics {
        LinearKinematics::new(90.0, 1.0, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 100.0, 0.0), 0)
    }

    #[test]
    fn no_traffic_is_always_green() {
        let oracle = ReferenceOracle::new(1.0, 360.0);
        let det = CylinderDetector::mk(1000.0, 200.0).unwrap();
        let own = ownship();
        let traffic: [LinearKinematics; 0] = [];
        let query = OracleQuery {
            detector: &det,
            recovery_detector: None,
            dt: 1.0,
            b: 0.0,
            t: 60.0,
            b2: 0.0,
            t2: 0.0,
            maxdown: 5,
            maxup: 5,
            ownship: &own,
            traffic: &traffic,
            criteria_ac: None,
            eps_h: 0.1,
            eps_v: 0.1,
        };
        assert!(!IntegerBandOracle::any_int_red(&oracle, &query));
        assert_eq!(IntegerBandOracle::first_green(&oracle, true, 5, &query), 0);
    }

    #[test]
    fn head_on_traffic_is_red_at_zero_offset() {
        let oracle = ReferenceOracle::new(5.0, 360.0);
        let det = CylinderDetector::mk(1000.0, 200.0).unwrap();
        let own = ownship();
        let intruder = LinearKinematics::new(0.0, 1.0, Vector3::new(0.0, 20000.0, 0.0), Vector3::new(0.0, -100.0, 0.0), 1);
        let traffic = [intruder];
        let query = OracleQuery {
            detector: &det,
            recovery_detector: None,
            dt: 1.0,
            b: 0.0,
            t: 300.0,
            b2: 0.0,
            t2: 0.0,
            maxdown: 10,
            maxup: 10,
            ownship: &own,
            traffic: &traffic,
            criteria_ac: None,
            eps_h: 0.1,
            eps_v: 0.1,
        };
        // Offset 0 (straight ahead) must be red; some rotated offset must be green.
        let any_red = IntegerBandOracle::any_int_red(&oracle, &query);
        assert!(any_red);
        let first = IntegerBandOracle::first_green(&oracle, true, 10, &query);
        assert!(first > 0);
    }
}
