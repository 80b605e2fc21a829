// RECOVERY ENGINE: BISECTION OVER TIME, PROTECTED-VOLUME SHRINKAGE.

use crate::cylinder::CylinderDetector;
use crate::interval::IntervalSet;
use crate::traits::{
    ConflictDetector, CoreParameters, IntegerBandOracle, OracleQuery, OwnshipKinematics,
    TrafficKinematics,
};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct RecoveryOutcome {
    pub recovery_time: f64,
    pub none_set: IntervalSet,
}

// ASSUMES A MONOTONIC RED -> GREEN TRANSITION. RETURNS (PIVOT_RED,
// PIVOT_GREEN); IF is_green(HI) IS FALSE, NO GREEN POINT EXISTS IN RANGE
// AND BOTH CONVERGE TO HI.
fn bisect_first_green(is_green: impl Fn(f64) -> bool, lo: f64, hi: f64, precision: f64) -> (f64, f64) {
    if !is_green(hi) {
        return (hi, hi);
    }
    if is_green(lo) {
        return (lo, lo);
    }
    let mut red = lo;
    let mut green = hi;
    while green - red > precision {
        let mid = (red + green) / 2.0;
        if is_green(mid) {
            green = mid;
        } else {
            red = mid;
        }
    }
    (red, green)
}

const BISECTION_PRECISION_S: f64 = 0.5;

// CALLED ONLY WHEN RECOVERY IS ENABLED, THE CONFLICT-LEVEL NONE-SET IS
// EMPTY, AND THE CURRENT LEVEL IS THE ALERTOR'S CONFLICT LEVEL.
#[allow(clippy::too_many_arguments)]
pub fn compute_recovery_bands<O, T, D, Ob>(
    oracle: &Ob,
    ownship: &O,
    traffic: &[T],
    detector: &D,
    t_horizon: f64,
    maxdown: i64,
    maxup: i64,
    params: &CoreParameters,
) -> RecoveryOutcome
where
    O: OwnshipKinematics,
    T: TrafficKinematics,
    D: ConflictDetector,
    Ob: IntegerBandOracle<O, T, D>,
{
    let nmac = match CylinderDetector::mk(params.nmac_d, params.nmac_h) {
        Ok(c) => c,
        Err(_) => {
            return RecoveryOutcome {
                recovery_time: f64::NEG_INFINITY,
                none_set: IntervalSet::new(),
            }
        }
    };

    let combine_single = |d: &CylinderDetector, b2: f64| -> IntervalSet {
        let query = OracleQuery {
            detector,
            recovery_detector: Some(d),
            dt: ownship.time_step(),
            b: 0.0,
            t: t_horizon,
            b2,
            t2: t_horizon,
            maxdown,
            maxup,
            ownship,
            traffic,
            criteria_ac: None,
            eps_h: params.epsilon_h,
            eps_v: params.epsilon_v,
        };
        oracle.combine(&query)
    };

    // NMAC-SCALE CHECK: IF EVEN THE NMAC CYLINDER HAS NO ESCAPE, NOTHING
    // CAN AVOID AN IMMINENT NEAR MID-AIR COLLISION.
    if combine_single(&nmac, 0.0).is_empty() {
        debug!("recovery: solid red at NMAC scale, no escape possible");
        return RecoveryOutcome {
            recovery_time: f64::NEG_INFINITY,
            none_set: IntervalSet::new(),
        };
    }

    let mut cylinder = CylinderDetector::mk(params.min_horizontal_recovery, params.min_vertical_recovery)
        .unwrap_or(nmac);

    loop {
        if cylinder.horizontal_radius() <= params.nmac_d || cylinder.vertical_half_height() <= params.nmac_h {
            break;
        }

        let at_zero = combine_single(&cylinder, 0.0);
        if !at_zero.is_empty() {
            let is_green = |pivot: f64| !combine_single(&cylinder, pivot).is_empty();
            let (pivot_red, pivot_green) =
                bisect_first_green(is_green, 0.0, t_horizon, BISECTION_PRECISION_S);

            trace!(pivot_red, pivot_green, "recovery bisection converged");

            let recovery_time = if pivot_green <= t_horizon && is_green(pivot_green) {
                (pivot_green + params.recovery_stability_time).min(t_horizon)
            } else {
                pivot_red
            };

            let validated = combine_single(&cylinder, recovery_time);
            if validated.is_empty() {
                return RecoveryOutcome {
                    recovery_time: f64::NEG_INFINITY,
                    none_set: IntervalSet::new(),
                };
            }

            return RecoveryOutcome {
                recovery_time,
                none_set: validated,
            };
        }

        if !params.ca_bands {
            return RecoveryOutcome {
                recovery_time: f64::NEG_INFINITY,
                none_set: IntervalSet::new(),
            };
        }

        cylinder = cylinder.shrunk_by(params.ca_factor);
    }

    RecoveryOutcome {
        recovery_time: f64::NEG_INFINITY,
        none_set: IntervalSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisection_finds_boundary() {
        let is_green = |p: f64| p >= 42.0;
        let (red, green) = bisect_first_green(is_green, 0.0, 100.0, 0.5);
        assert!(green - red <= 0.5);
        assert!(green >= 42.0);
        assert!(red < 42.0);
    }

    #[test]
    fn bisection_reports_hi_when_never_green() {
        let is_green = |_: f64| false;
        let (red, green) = bisect_first_green(is_green, 0.0, 100.0, 0.5);
        assert_eq!(red, 100.0);
        assert_eq!(green, 100.0);
    }

    #[test]
    fn bisection_reports_lo_when_always_green() {
        let is_green = |_: f64| true;
        let (red, green) = bisect_first_green(is_green, 0.0, 100.0, 0.5);
        assert_eq!(red, 0.0);
        assert_eq!(green, 0.0);
    }
}
