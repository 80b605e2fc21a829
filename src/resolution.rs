// RESOLUTION AND LAST-TIME-TO-MANEUVER SEARCH.

use crate::tolerance::modulo;
use crate::traits::{
    ConflictDetector, IntegerBandOracle, OracleQuery, OwnshipKinematics, TrafficKinematics,
};

const BISECTION_PRECISION_S: f64 = 0.5;

// DIR = TRUE IS "UP", DIR = FALSE IS "DOWN". RETURNS THE RESOLVED
// CONTROL-VARIABLE VALUE, OR NAN (ALREADY CLEAR) / +-INFINITY (NO GREEN
// FOUND IN THAT DIRECTION).
#[allow(clippy::too_many_arguments)]
pub fn compute_resolution<O, T, D, Ob>(
    oracle: &Ob,
    ownship: &O,
    dir: bool,
    maxdown: i64,
    maxup: i64,
    step: f64,
    modulus: f64,
    detector: &D,
    traffic: &[T],
    eps_h: f64,
    eps_v: f64,
    b: f64,
    t: f64,
) -> f64
where
    O: OwnshipKinematics,
    T: TrafficKinematics,
    D: ConflictDetector,
    Ob: IntegerBandOracle<O, T, D>,
{
    let maxn = if dir { maxup } else { maxdown };
    let query = OracleQuery {
        detector,
        recovery_detector: None,
        dt: ownship.time_step(),
        b,
        t,
        b2: 0.0,
        t2: 0.0,
        maxdown,
        maxup,
        ownship,
        traffic,
        criteria_ac: None,
        eps_h,
        eps_v,
    };
    let k = oracle.first_green(dir, maxn, &query);

    if k == 0 {
        return f64::NAN;
    }
    if k < 0 {
        return if dir {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
    }

    let sign = if dir { 1.0 } else { -1.0 };
    modulo(ownship.own_val() + sign * k as f64 * step, modulus)
}

// FINDS THE LATEST POINT IN [LO, HI] WHERE IS_SOLID_RED IS STILL FALSE,
// ASSUMING A MONOTONIC GREEN -> RED TRANSITION. RETURNS HI IF IT NEVER
// TURNS RED, LO IF IT IS ALREADY RED THERE.
fn bisect_last_green(is_solid_red: impl Fn(f64) -> bool, lo: f64, hi: f64, precision: f64) -> f64 {
    if !is_solid_red(hi) {
        return hi;
    }
    if is_solid_red(lo) {
        return lo;
    }
    let mut green = lo;
    let mut red = hi;
    while red - green > precision {
        let mid = (green + red) / 2.0;
        if is_solid_red(mid) {
            red = mid;
        } else {
            green = mid;
        }
    }
    green
}

// THE LATEST MOMENT, RELATIVE TO NOW, AT WHICH A MANEUVER CAN STILL AVOID
// THE CURRENT CONFLICT WITH AC. NAN IF THERE IS NO CURRENT CONFLICT;
// -INFINITY IF THE CONFLICT IS ALREADY INESCAPABLE (TIME_IN <= 0).
#[allow(clippy::too_many_arguments)]
pub fn last_time_to_maneuver<O, T, D, Ob>(
    oracle: &Ob,
    ownship: &O,
    ac: &T,
    detector: &D,
    t_horizon: f64,
    maxdown: i64,
    maxup: i64,
    eps_h: f64,
    eps_v: f64,
) -> f64
where
    O: OwnshipKinematics,
    T: TrafficKinematics,
    D: ConflictDetector,
    Ob: IntegerBandOracle<O, T, D>,
{
    let current = detector.conflict_detection(
        ownship.position(),
        ownship.velocity(),
        ac.position(),
        ac.velocity(),
        0.0,
        t_horizon,
    );
    if !current.conflict {
        return f64::NAN;
    }
    if current.time_in <= 0.0 {
        return f64::NEG_INFINITY;
    }

    let is_solid_red = |pivot: f64| -> bool {
        let own_proj = ownship.project(pivot);
        let ac_proj = ac.project(pivot);
        let traffic = [ac_proj];
        let query = OracleQuery {
            detector,
            recovery_detector: None,
            dt: ownship.time_step(),
            b: 0.0,
            t: t_horizon,
            b2: 0.0,
            t2: 0.0,
            maxdown,
            maxup,
            ownship: &own_proj,
            traffic: &traffic,
            criteria_ac: None,
            eps_h,
            eps_v,
        };
        oracle.all_int_red(&query)
    };

    let pivot_green = bisect_last_green(is_solid_red, 0.0, current.time_in, BISECTION_PRECISION_S);
    if pivot_green <= 0.0 {
        f64::NEG_INFINITY
    } else {
        pivot_green
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisect_last_green_never_red() {
        let g = bisect_last_green(|_| false, 0.0, 60.0, 0.5);
        assert_eq!(g, 60.0);
    }

    #[test]
    fn bisect_last_green_immediately_red() {
        let g = bisect_last_green(|_| true, 0.0, 60.0, 0.5);
        assert_eq!(g, 0.0);
    }

    #[test]
    fn bisect_last_green_finds_transition() {
        let g = bisect_last_green(|p| p >= 30.0, 0.0, 60.0, 0.5);
        assert!((g - 30.0).abs() <= 0.5);
    }
}
