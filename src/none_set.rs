// INTEGER -> REAL CONVERSION AND NONE-SET COMPOSITION.

use crate::domain::DomainGeometry;
use crate::interval::IntervalSet;
use crate::tolerance::almost_equals;
use crate::traits::{ConflictDetector, IntegerBandOracle, OracleQuery, OwnshipKinematics, TrafficKinematics};

fn clip(a: f64, b: f64, lo: f64, hi: f64) -> Option<(f64, f64)> {
    let l = a.max(lo);
    let h = b.min(hi);
    if l > h {
        None
    } else {
        Some((l, h))
    }
}

// CONVERTS INTEGER MANEUVER-INDEX INTERVALS INTO A REAL-VALUED SET UNDER
// (SCALE, OFFSET), CLIPPED TO [MIN, MAX] AND WRAPPED MODULO MODULUS.
// MIN/MAX MATCH DomainGeometry: WHEN MODULUS > 0 AND NOT CIRCULAR,
// MIN > MAX IS LEGAL AND MEANS THE DOMAIN WRAPS THROUGH ZERO.
pub fn to_interval_set(
    int_intervals: &[(i64, i64)],
    scale: f64,
    offset: f64,
    min: f64,
    max: f64,
    modulus: f64,
) -> IntervalSet {
    let mut out = IntervalSet::new();

    for &(lb, ub) in int_intervals {
        let lo = scale * lb as f64 + offset;
        let hi = scale * ub as f64 + offset;

        if modulus <= 0.0 {
            if let Some((l, h)) = clip(lo.min(hi), lo.max(hi), min, max) {
                out.almost_add(l, h);
            }
            continue;
        }

        let wlo = crate::tolerance::modulo(lo, modulus);
        let whi = crate::tolerance::modulo(hi, modulus);

        let domain_wraps = min > max + crate::tolerance::EPSILON;

        if almost_equals(wlo, whi) {
            // The whole circle.
            if domain_wraps {
                out.almost_add(min, modulus);
                out.almost_add(0.0, max);
            } else {
                out.almost_add(min, max);
            }
            continue;
        }

        let range_wraps = wlo > whi;

        match (domain_wraps, range_wraps) {
            (false, false) => {
                if let Some((l, h)) = clip(wlo, whi, min, max) {
                    out.almost_add(l, h);
                }
            }
            (false, true) => {
                if let Some((l, h)) = clip(wlo, modulus, min, max) {
                    out.almost_add(l, h);
                }
                if let Some((l, h)) = clip(0.0, whi, min, max) {
                    out.almost_add(l, h);
                }
            }
            (true, false) => {
                if let Some((l, h)) = clip(wlo, whi, min, modulus) {
                    out.almost_add(l, h);
                }
                if let Some((l, h)) = clip(wlo, whi, 0.0, max) {
                    out.almost_add(l, h);
                }
            }
            (true, true) => {
                out.almost_add(wlo.max(min), modulus);
                out.almost_add(0.0, whi.min(max));
            }
        }
    }

    out
}

// USED WHEN A LEVEL'S PERIPHERAL AND CONFLICT AIRCRAFT ARE BOTH EMPTY.
pub fn full_domain_set(geometry: &DomainGeometry) -> IntervalSet {
    let mut out = IntervalSet::new();
    if geometry.wraps() {
        out.almost_add(geometry.min_val, geometry.modulus);
        out.almost_add(0.0, geometry.max_val);
    } else {
        out.almost_add(geometry.min_val, geometry.max_val);
    }
    out
}

// NONE-SET AGAINST PERIPHERAL OVER [0, T_LEVEL] INTERSECTED WITH THE
// NONE-SET AGAINST CONFLICT OVER [0, T_LATE].
#[allow(clippy::too_many_arguments)]
pub fn compute_none_bands<O, T, D, Ob>(
    oracle: &Ob,
    ownship: &O,
    peripheral: &[T],
    conflict: &[T],
    detector: &D,
    t_level: f64,
    t_late: f64,
    maxdown: i64,
    maxup: i64,
    eps_h: f64,
    eps_v: f64,
) -> IntervalSet
where
    O: OwnshipKinematics,
    T: TrafficKinematics,
    D: ConflictDetector,
    Ob: IntegerBandOracle<O, T, D>,
{
    let q1 = OracleQuery {
        detector,
        recovery_detector: None,
        dt: ownship.time_step(),
        b: 0.0,
        t: t_level,
        b2: 0.0,
        t2: 0.0,
        maxdown,
        maxup,
        ownship,
        traffic: peripheral,
        criteria_ac: None,
        eps_h,
        eps_v,
    };
    let noneset1 = oracle.combine(&q1);

    let q2 = OracleQuery {
        detector,
        recovery_detector: None,
        dt: ownship.time_step(),
        b: 0.0,
        t: t_late,
        b2: 0.0,
        t2: 0.0,
        maxdown,
        maxup,
        ownship,
        traffic: conflict,
        criteria_ac: None,
        eps_h,
        eps_v,
    };
    let noneset2 = oracle.combine(&q2);

    noneset1.intersected_with(&noneset2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_clip_to_domain() {
        let s = to_interval_set(&[(0, 5)], 1.0, 0.0, -2.0, 3.0, 0.0);
        assert_eq!(s.len(), 1);
        let iv = s.iter().next().unwrap();
        assert!(almost_equals(iv.low, -2.0));
        assert!(almost_equals(iv.up, 3.0));
    }

    #[test]
    fn wrapped_range_within_contiguous_domain() {
        // scale=1,offset=90 => real range from integer [-100,-70] is [−10,20] mod 360.
        let s = to_interval_set(&[(-100, -70)], 1.0, 90.0, 0.0, 360.0, 360.0);
        // Expect two pieces: [350,360] and [0,20]
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn full_circle_collapses_to_whole_domain() {
        let s = to_interval_set(&[(0, 360)], 1.0, 0.0, 0.0, 360.0, 360.0);
        assert_eq!(s.len(), 1);
        let iv = s.iter().next().unwrap();
        assert!(almost_equals(iv.low, 0.0));
        assert!(almost_equals(iv.up, 360.0));
    }
}
