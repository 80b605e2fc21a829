// PERIPHERAL AND CONFLICT AIRCRAFT CLASSIFICATION.

use crate::traits::{ConflictDetector, IntegerBandOracle, OracleQuery, OwnshipKinematics, TrafficKinematics};

// TRUE IF AC IS NOT CURRENTLY CONFLICTING BUT SOME MANEUVER INDEX IN
// [-MAXDOWN, MAXUP] WOULD PUT IT INTO CONFLICT.
pub fn kinematic_conflict<O, T, D, Ob>(
    oracle: &Ob,
    ownship: &O,
    ac: &T,
    detector: &D,
    t: f64,
    maxdown: i64,
    maxup: i64,
    eps_h: f64,
    eps_v: f64,
) -> bool
where
    O: OwnshipKinematics,
    T: TrafficKinematics,
    D: ConflictDetector,
    Ob: IntegerBandOracle<O, T, D>,
{
    let traffic = [ac.clone()];
    let query = OracleQuery {
        detector,
        recovery_detector: None,
        dt: ownship.time_step(),
        b: 0.0,
        t,
        b2: 0.0,
        t2: 0.0,
        maxdown,
        maxup,
        ownship,
        traffic: &traffic,
        criteria_ac: None,
        eps_h,
        eps_v,
    };
    oracle.any_int_red(&query)
}

// AC IS PERIPHERAL IF DETECTOR REPORTS NO CURRENT CONFLICT ON [0, T] BUT
// kinematic_conflict IS TRUE AGAINST AC ALONE.
pub fn classify_peripheral<'t, O, T, D, Ob>(
    oracle: &Ob,
    ownship: &O,
    traffic: &'t [T],
    detector: &D,
    t: f64,
    maxdown: i64,
    maxup: i64,
    eps_h: f64,
    eps_v: f64,
) -> Vec<&'t T>
where
    O: OwnshipKinematics,
    T: TrafficKinematics,
    D: ConflictDetector,
    Ob: IntegerBandOracle<O, T, D>,
{
    traffic
        .iter()
        .filter(|ac| {
            let current = detector.conflict_detection(
                ownship.position(),
                ownship.velocity(),
                ac.position(),
                ac.velocity(),
                0.0,
                t,
            );
            !current.conflict
                && kinematic_conflict(oracle, ownship, ac, detector, t, maxdown, maxup, eps_h, eps_v)
        })
        .collect()
}
