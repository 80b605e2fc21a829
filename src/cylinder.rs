// PROTECTED-CYLINDER CONFLICT DETECTOR.
//
// CLOSED-FORM RELATIVE-MOTION CPA SOLVE: RETURNS THE FULL HORIZONTAL/
// VERTICAL INTRUSION INTERVAL RATHER THAN A DISCRETIZED FORWARD SCAN, SO
// PER-QUERY COST STAYS INDEPENDENT OF THE LOOK-AHEAD HORIZON. THE RECOVERY
// ENGINE'S BISECTION CALLS THIS O(LOG(T/EPS)) TIMES PER SHRINK ITERATION.

use crate::error::BandsError;
use crate::traits::{ConflictData, ConflictDetector, Vector3};

// HORIZONTAL RADIUS D, VERTICAL HALF-HEIGHT H.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderDetector {
    d: f64,
    h: f64,
}

impl CylinderDetector {
    pub fn mk(d: f64, h: f64) -> Result<Self, BandsError> {
        if !(d.is_finite() && d > 0.0) {
            return Err(BandsError::InvalidCylinderRadius(d));
        }
        if !(h.is_finite() && h > 0.0) {
            return Err(BandsError::InvalidCylinderHeight(h));
        }
        Ok(Self { d, h })
    }

    pub fn horizontal_radius(&self) -> f64 {
        self.d
    }

    pub fn vertical_half_height(&self) -> f64 {
        self.h
    }

    pub fn set_horizontal(&mut self, d: f64) -> Result<(), BandsError> {
        if !(d.is_finite() && d > 0.0) {
            return Err(BandsError::InvalidCylinderRadius(d));
        }
        self.d = d;
        Ok(())
    }

    pub fn set_vertical(&mut self, h: f64) -> Result<(), BandsError> {
        if !(h.is_finite() && h > 0.0) {
            return Err(BandsError::InvalidCylinderHeight(h));
        }
        self.h = h;
        Ok(())
    }

    // FACTOR IN (0,1).
    pub fn shrunk_by(&self, factor: f64) -> CylinderDetector {
        CylinderDetector {
            d: self.d * (1.0 - factor),
            h: self.h * (1.0 - factor),
        }
    }

    fn horizontal_intrusion(&self, p: Vector3, v: Vector3, lo: f64, hi: f64) -> Option<(f64, f64)> {
        let a = v.x * v.x + v.y * v.y;
        let b = 2.0 * (p.x * v.x + p.y * v.y);
        let c = p.x * p.x + p.y * p.y - self.d * self.d;

        if a.abs() < 1e-12 {
            return if c < 0.0 { Some((lo, hi)) } else { None };
        }

        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);
        let (t1, t2) = (t1.min(t2), t1.max(t2));
        let (t1, t2) = (t1.max(lo), t2.min(hi));
        if t1 > t2 {
            None
        } else {
            Some((t1, t2))
        }
    }

    fn vertical_intrusion(&self, pz: f64, vz: f64, lo: f64, hi: f64) -> Option<(f64, f64)> {
        if vz.abs() < 1e-12 {
            return if pz.abs() < self.h { Some((lo, hi)) } else { None };
        }
        // |pz + vz t| < h  <=>  -h < pz + vz t < h
        let t_a = (-self.h - pz) / vz;
        let t_b = (self.h - pz) / vz;
        let (t1, t2) = (t_a.min(t_b), t_a.max(t_b));
        let (t1, t2) = (t1.max(lo), t2.min(hi));
        if t1 > t2 {
            None
        } else {
            Some((t1, t2))
        }
    }
}

impl ConflictDetector for CylinderDetector {
    fn conflict_detection(
        &self,
        s_own: Vector3,
        v_own: Vector3,
        s_ac: Vector3,
        v_ac: Vector3,
        b: f64,
        t: f64,
    ) -> ConflictData {
        let p_rel = s_ac.sub(&s_own);
        let v_rel = v_ac.sub(&v_own);

        let h_window = match self.horizontal_intrusion(p_rel, v_rel, b, t) {
            Some(w) => w,
            None => return ConflictData::no_conflict(),
        };
        let v_window = match self.vertical_intrusion(p_rel.z, v_rel.z, b, t) {
            Some(w) => w,
            None => return ConflictData::no_conflict(),
        };

        let time_in = h_window.0.max(v_window.0);
        let time_out = h_window.1.min(v_window.1);
        if time_in > time_out {
            return ConflictData::no_conflict();
        }

        ConflictData {
            conflict: true,
            time_in,
            time_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_on_closure_is_a_conflict() {
        let det = CylinderDetector::mk(1000.0, 150.0).unwrap();
        let s_own = Vector3::new(0.0, 0.0, 0.0);
        let v_own = Vector3::new(0.0, 100.0, 0.0);
        let s_ac = Vector3::new(0.0, 20000.0, 0.0);
        let v_ac = Vector3::new(0.0, -100.0, 0.0);
        let r = det.conflict_detection(s_own, v_own, s_ac, v_ac, 0.0, 300.0);
        assert!(r.conflict);
        assert!(r.time_in > 0.0 && r.time_in < r.time_out);
    }

    #[test]
    fn parallel_separated_tracks_never_conflict() {
        let det = CylinderDetector::mk(1000.0, 150.0).unwrap();
        let s_own = Vector3::new(0.0, 0.0, 0.0);
        let v_own = Vector3::new(0.0, 100.0, 0.0);
        let s_ac = Vector3::new(5000.0, 0.0, 0.0);
        let v_ac = Vector3::new(0.0, 100.0, 0.0);
        let r = det.conflict_detection(s_own, v_own, s_ac, v_ac, 0.0, 300.0);
        assert!(!r.conflict);
    }

    #[test]
    fn vertical_separation_avoids_conflict() {
        let det = CylinderDetector::mk(1000.0, 150.0).unwrap();
        let s_own = Vector3::new(0.0, 0.0, 0.0);
        let v_own = Vector3::new(0.0, 100.0, 0.0);
        let s_ac = Vector3::new(0.0, 20000.0, 5000.0);
        let v_ac = Vector3::new(0.0, -100.0, 0.0);
        let r = det.conflict_detection(s_own, v_own, s_ac, v_ac, 0.0, 300.0);
        assert!(!r.conflict);
    }

    #[test]
    fn shrunk_by_reduces_dimensions() {
        let det = CylinderDetector::mk(1000.0, 150.0).unwrap();
        let shrunk = det.shrunk_by(0.1);
        assert!((shrunk.horizontal_radius() - 900.0).abs() < 1e-9);
        assert!((shrunk.vertical_half_height() - 135.0).abs() < 1e-9);
    }
}
