// BAND COMPOSITOR AND PUBLIC QUERY SURFACE.
//
// BANDS OWNS THE LAZY CACHE AND IS GENERIC OVER THE EXTERNAL COLLABORATORS
// (OWNSHIP/TRAFFIC KINEMATICS, DETECTOR, ALERTOR, ORACLE) RATHER THAN
// INHERITING FROM AN ABSTRACT BASE. SINGLE-THREADED; NO CONCURRENCY MODEL.

use crate::colored::{BandsRange, BandsRegion, ColoredSequence};
use crate::domain::{CheckedState, DomainGeometry, DomainParams};
use crate::event::ComputeLog;
use crate::interval::Interval;
use crate::none_set::{compute_none_bands, full_domain_set};
use crate::peripheral::{classify_peripheral, kinematic_conflict as kinematic_conflict_impl};
use crate::recovery::compute_recovery_bands;
use crate::resolution::{compute_resolution as compute_resolution_impl, last_time_to_maneuver as last_time_to_maneuver_impl};
use crate::tolerance::modulo;
use crate::traits::{Alertor, ConflictDetector, CoreParameters, IntegerBandOracle, OwnshipKinematics, TrafficKinematics};
use tracing::{debug, trace};

// FIVE COLLABORATORS: OWNSHIP KINEMATICS (O), TRAFFIC KINEMATICS (T), THE
// 3-D CONFLICT DETECTOR SHARED BY EVERY ALERT LEVEL (D), THE ALERTOR (A),
// AND THE INTEGER-BAND ORACLE (OB).
pub struct Bands<O, T, D, A, Ob>
where
    O: OwnshipKinematics,
    T: TrafficKinematics,
    D: ConflictDetector,
    A: Alertor<D>,
    Ob: IntegerBandOracle<O, T, D>,
{
    domain: DomainParams,
    params: CoreParameters,
    ownship: O,
    traffic: Vec<T>,
    alertor: A,
    oracle: Ob,
    conflict_aircraft: Vec<Vec<T>>,

    outdated: bool,
    checked: CheckedState,
    geometry: DomainGeometry,
    peripheral_acs: Vec<Vec<T>>,
    ranges: Vec<BandsRange>,
    recovery_time: f64,
    log: ComputeLog,

    _detector: std::marker::PhantomData<D>,
}

impl<O, T, D, A, Ob> Bands<O, T, D, A, Ob>
where
    O: OwnshipKinematics,
    T: TrafficKinematics,
    D: ConflictDetector,
    A: Alertor<D>,
    Ob: IntegerBandOracle<O, T, D>,
{
    pub fn new(domain: DomainParams, params: CoreParameters, ownship: O, alertor: A, oracle: Ob) -> Self {
        let most_severe = alertor.most_severe_alert_level();
        Self {
            domain,
            params,
            ownship,
            traffic: Vec::new(),
            alertor,
            oracle,
            conflict_aircraft: vec![Vec::new(); most_severe],
            outdated: true,
            checked: CheckedState::Unchecked,
            geometry: DomainGeometry {
                min_val: f64::NAN,
                max_val: f64::NAN,
                min_rel: f64::NAN,
                max_rel: f64::NAN,
                maxdown: 0,
                maxup: 0,
                circular: false,
                modulus: 0.0,
                step: 1.0,
            },
            peripheral_acs: vec![Vec::new(); most_severe],
            ranges: Vec::new(),
            recovery_time: f64::NAN,
            log: ComputeLog::new(),
            _detector: std::marker::PhantomData,
        }
    }

    // -- MUTATORS (CACHE INVALIDATION) -------------------------------------

    pub fn set_ownship(&mut self, ownship: O) {
        self.outdated = true;
        self.ownship = ownship;
    }

    pub fn set_traffic(&mut self, traffic: Vec<T>) {
        self.outdated = true;
        self.traffic = traffic;
    }

    // LEVEL IS 1-INDEXED.
    pub fn set_conflict_aircraft(&mut self, level: usize, acs: Vec<T>) {
        if level == 0 {
            return;
        }
        if level > self.conflict_aircraft.len() {
            self.conflict_aircraft.resize(level, Vec::new());
        }
        self.conflict_aircraft[level - 1] = acs;
        self.outdated = true;
    }

    pub fn set_min(&mut self, min: f64) {
        self.outdated |= self.domain.set_min(min);
    }

    pub fn set_max(&mut self, max: f64) {
        self.outdated |= self.domain.set_max(max);
    }

    pub fn set_rel(&mut self, rel: bool) {
        self.outdated |= self.domain.set_rel(rel);
    }

    pub fn set_mod(&mut self, modulus: f64) {
        self.outdated |= self.domain.set_mod(modulus);
    }

    pub fn set_step(&mut self, step: f64) {
        self.outdated |= self.domain.set_step(step);
    }

    pub fn set_recovery(&mut self, recovery: bool) {
        self.outdated |= self.domain.set_recovery(recovery);
    }

    pub fn set_params(&mut self, params: CoreParameters) {
        self.params = params;
        self.outdated = true;
    }

    pub fn domain(&self) -> &DomainParams {
        &self.domain
    }

    pub fn params(&self) -> &CoreParameters {
        &self.params
    }

    pub fn ownship(&self) -> &O {
        &self.ownship
    }

    pub fn traffic(&self) -> &[T] {
        &self.traffic
    }

    // FORCES RECOMPUTATION REGARDLESS OF THE OUTDATED FLAG.
    pub fn force_compute(&mut self) {
        self.compute();
        self.outdated = false;
    }

    // DROPS THE CACHE BACK TO ITS INITIAL, NEVER-COMPUTED STATE.
    pub fn reset(&mut self) {
        self.outdated = true;
        self.checked = CheckedState::Unchecked;
        self.ranges.clear();
        for acs in self.peripheral_acs.iter_mut() {
            acs.clear();
        }
        self.recovery_time = f64::NAN;
    }

    fn ensure_computed(&mut self) {
        if self.outdated {
            self.compute();
            self.outdated = false;
        }
    }

    // -- QUERY SURFACE ------------------------------------------------------

    pub fn length(&mut self) -> usize {
        self.ensure_computed();
        self.ranges.len()
    }

    pub fn interval(&mut self, i: usize) -> Interval {
        self.ensure_computed();
        self.ranges.get(i).map(|r| r.interval).unwrap_or_else(Interval::empty)
    }

    pub fn region(&mut self, i: usize) -> BandsRegion {
        self.ensure_computed();
        self.ranges.get(i).map(|r| r.region).unwrap_or(BandsRegion::Unknown)
    }

    pub fn ranges(&mut self) -> &[BandsRange] {
        self.ensure_computed();
        &self.ranges
    }

    // LEVEL IS 1-INDEXED.
    pub fn peripheral_aircraft(&mut self, level: usize) -> &[T] {
        self.ensure_computed();
        if level == 0 {
            return &[];
        }
        self.peripheral_acs.get(level - 1).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn time_to_recovery(&mut self) -> f64 {
        self.ensure_computed();
        self.recovery_time
    }

    // INDEX OF THE BAND CONTAINING V, OR LENGTH IF NONE MATCHES.
    pub fn range_of(&mut self, v: f64) -> usize {
        self.ensure_computed();
        let n = self.ranges.len();
        if n == 0 {
            return 0;
        }

        let v = if self.geometry.modulus > 0.0 { modulo(v, self.geometry.modulus) } else { v };
        let near_zero = self.geometry.modulus > 0.0 && crate::tolerance::almost_equals(v, 0.0);

        let mut fallback: Option<usize> = None;
        for (i, r) in self.ranges.iter().enumerate() {
            let low = r.interval.low;
            let up = r.interval.up;
            let resolution_inclusive = r.region.is_resolution_band();
            let edge_inclusive = (crate::tolerance::almost_equals(up, self.geometry.min_val)
                || crate::tolerance::almost_equals(up, self.geometry.max_val)
                || crate::tolerance::almost_equals(low, self.geometry.min_val)
                || crate::tolerance::almost_equals(low, self.geometry.max_val))
                && !self.geometry.circular;

            let contains = if resolution_inclusive {
                r.interval.contains(v)
            } else {
                (v > low || crate::tolerance::almost_equals(v, low) && edge_inclusive)
                    && (v < up || crate::tolerance::almost_equals(v, up) && edge_inclusive)
            };

            if contains {
                if near_zero && resolution_inclusive && crate::tolerance::almost_equals(up, self.geometry.modulus) {
                    return i;
                }
                if near_zero && crate::tolerance::almost_equals(low, 0.0) {
                    fallback = fallback.or(Some(i));
                    continue;
                }
                return i;
            }
        }
        fallback.unwrap_or(n)
    }

    // DIR = TRUE IS "UP".
    pub fn compute_resolution(&mut self, dir: bool) -> f64 {
        self.ensure_computed();
        if !self.checked.is_valid() {
            return f64::NAN;
        }
        let level = self.alertor.conflict_alert_level();
        let cfg = self.alertor.level_config(level);
        let detector = self.alertor.detector(level);
        compute_resolution_impl(
            &self.oracle,
            &self.ownship,
            dir,
            self.geometry.maxdown,
            self.geometry.maxup,
            self.domain.step(),
            self.domain.modulus(),
            detector,
            &self.traffic,
            self.params.epsilon_h,
            self.params.epsilon_v,
            0.0,
            cfg.alerting_time,
        )
    }

    // AGAINST THE CONFLICT ALERT LEVEL'S DETECTOR AND LATE-ALERTING HORIZON.
    pub fn last_time_to_maneuver(&mut self, ac: &T) -> f64 {
        self.ensure_computed();
        if !self.checked.is_valid() {
            return f64::NAN;
        }
        let level = self.alertor.conflict_alert_level();
        let cfg = self.alertor.level_config(level);
        let detector = self.alertor.detector(level);
        last_time_to_maneuver_impl(
            &self.oracle,
            &self.ownship,
            ac,
            detector,
            cfg.late_alerting_time,
            self.geometry.maxdown,
            self.geometry.maxup,
            self.params.epsilon_h,
            self.params.epsilon_v,
        )
    }

    pub fn kinematic_conflict(&mut self, ac: &T, detector: &D, t: f64) -> bool {
        self.ensure_computed();
        kinematic_conflict_impl(
            &self.oracle,
            &self.ownship,
            ac,
            detector,
            t,
            self.geometry.maxdown,
            self.geometry.maxup,
            self.params.epsilon_h,
            self.params.epsilon_v,
        )
    }

    // -- DIAGNOSTICS ---------------------------------------------------------

    // ONE BAND PER LINE PLUS THE RECOVERY TIME.
    pub fn explain(&mut self) -> String {
        self.ensure_computed();
        let mut out = String::new();
        if !self.checked.is_valid() {
            out.push_str("invalid configuration\n");
            return out;
        }
        for r in &self.ranges {
            out.push_str(&format!("[{:.3}, {:.3}]: {:?}\n", r.interval.low, r.interval.up, r.region));
        }
        if self.recovery_time.is_nan() {
            out.push_str("Time to recovery: n/a [s]\n");
        } else if self.recovery_time.is_infinite() && self.recovery_time < 0.0 {
            out.push_str("Time to recovery: unreachable [s]\n");
        } else {
            out.push_str(&format!("Time to recovery: {:.3} [s]\n", self.recovery_time));
        }
        out
    }

    // ONE "INDEX: LOW UP REGION" LINE PER BAND, THEN RECOVERY_TIME.
    pub fn dump(&mut self, precision: usize) -> String {
        self.ensure_computed();
        let mut out = String::new();
        for (i, r) in self.ranges.iter().enumerate() {
            out.push_str(&format!(
                "{}: {:.*} {:.*} {:?}\n",
                i, precision, r.interval.low, precision, r.interval.up, r.region
            ));
        }
        out.push_str(&format!("recovery_time: {:.*}\n", precision, self.recovery_time));
        out
    }

    // -- BAND COMPOSITOR ------------------------------------------------------

    fn compute(&mut self) {
        self.recovery_time = f64::NAN;
        let own_val = self.ownship.own_val();
        self.checked = self.domain.check_input(own_val);

        if !self.checked.is_valid() {
            debug!("compute: invalid configuration, degrading to empty ranges");
            self.ranges.clear();
            for acs in self.peripheral_acs.iter_mut() {
                acs.clear();
            }
            self.log.snapshot(0, 0, self.recovery_time, false);
            return;
        }

        self.geometry = self.domain.geometry(own_val, self.checked);
        let most_severe = self.alertor.most_severe_alert_level();
        if self.peripheral_acs.len() < most_severe {
            self.peripheral_acs.resize(most_severe, Vec::new());
        }
        if self.conflict_aircraft.len() < most_severe {
            self.conflict_aircraft.resize(most_severe, Vec::new());
        }

        let mut entries: Vec<(usize, crate::interval::IntervalSet, BandsRegion)> = Vec::new();
        let mut recovery_triggered = false;

        for level in 1..=most_severe {
            let cfg = self.alertor.level_config(level);
            if !cfg.region.is_conflict_band() {
                continue;
            }
            let detector = self.alertor.detector(level);

            let peripheral: Vec<T> = classify_peripheral(
                &self.oracle,
                &self.ownship,
                &self.traffic,
                detector,
                cfg.alerting_time,
                self.geometry.maxdown,
                self.geometry.maxup,
                self.params.epsilon_h,
                self.params.epsilon_v,
            )
            .into_iter()
            .cloned()
            .collect();

            let conflict_ac: Vec<T> = self.conflict_aircraft.get(level - 1).cloned().unwrap_or_default();
            self.peripheral_acs[level - 1] = peripheral.clone();

            let union_empty = peripheral.is_empty() && conflict_ac.is_empty();
            let mut region = cfg.region;

            let none_set = if union_empty {
                full_domain_set(&self.geometry)
            } else {
                compute_none_bands(
                    &self.oracle,
                    &self.ownship,
                    &peripheral,
                    &conflict_ac,
                    detector,
                    cfg.alerting_time,
                    cfg.late_alerting_time,
                    self.geometry.maxdown,
                    self.geometry.maxup,
                    self.params.epsilon_h,
                    self.params.epsilon_v,
                )
            };

            if none_set.is_empty() && self.domain.recovery() && level == self.alertor.conflict_alert_level() {
                let union: Vec<T> = peripheral.into_iter().chain(conflict_ac).collect();
                let outcome = compute_recovery_bands(
                    &self.oracle,
                    &self.ownship,
                    &union,
                    detector,
                    cfg.late_alerting_time,
                    self.geometry.maxdown,
                    self.geometry.maxup,
                    &self.params,
                );
                trace!(recovery_time = outcome.recovery_time, "recovery engine invoked");
                self.recovery_time = outcome.recovery_time;
                region = self.alertor.level_config(self.alertor.last_guidance_level()).region;
                entries.push((level, outcome.none_set, region));
                recovery_triggered = true;
                break;
            }

            entries.push((level, none_set, region));
        }

        self.ranges = self.color_bands(&entries, recovery_triggered);
        self.log.snapshot(entries.len(), self.ranges.len(), self.recovery_time, recovery_triggered);
    }

    // PAINTS ENTRIES (ASCENDING SEVERITY) ONTO THE FORWARD/WRAP SEQUENCES,
    // MOST SEVERE FIRST, EACH LEVEL'S NONE-SET INTERIOR GETTING THE NEXT
    // LESS SEVERE LEVEL'S REGION AND ITS OWN REGION AT THE UPPER BOUNDARY.
    // THE LEAST SEVERE LEVEL'S INTERIOR FALLS THROUGH TO RECOVERY (IF
    // TRIGGERED) OR NONE.
    fn color_bands(&self, entries: &[(usize, crate::interval::IntervalSet, BandsRegion)], recovery_triggered: bool) -> Vec<BandsRange> {
        let g = &self.geometry;

        if entries.is_empty() {
            return Self::whole_domain_bands(g, BandsRegion::None);
        }

        let top_region = entries.last().unwrap().2;
        let mut l1 = if g.wraps() {
            ColoredSequence::new(0.0, g.max_val, top_region)
        } else {
            ColoredSequence::new(g.min_val, g.max_val, top_region)
        };
        let mut l2 = if g.wraps() {
            Some(ColoredSequence::new(g.min_val, g.modulus, top_region))
        } else {
            None
        };

        for i in (0..entries.len()).rev() {
            let (_, none_set, region) = &entries[i];
            let lb_color = if i == 0 {
                if recovery_triggered { BandsRegion::Recovery } else { BandsRegion::None }
            } else {
                entries[i - 1].2
            };
            let ub_color = *region;

            for iv in none_set.iter() {
                if !g.wraps() || iv.up <= g.max_val + crate::tolerance::EPSILON {
                    l1.insert(iv.low, iv.up, lb_color, ub_color);
                } else if let Some(l2s) = l2.as_mut() {
                    l2s.insert(iv.low, iv.up, lb_color, ub_color);
                }
            }
        }

        let mut ranges = l1.to_bands();
        if let Some(l2s) = l2 {
            ranges.extend(l2s.to_bands());
        }
        ranges
    }

    fn whole_domain_bands(g: &DomainGeometry, region: BandsRegion) -> Vec<BandsRange> {
        if g.wraps() {
            vec![
                BandsRange { interval: Interval::new(0.0, g.max_val), region },
                BandsRange { interval: Interval::new(g.min_val, g.modulus), region },
            ]
        } else {
            vec![BandsRange { interval: Interval::new(g.min_val, g.max_val), region }]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cylinder::CylinderDetector;
    use crate::reference::{LinearKinematics, StaticAlertor};
    use crate::traits::Vector3;

    struct NullOracle;

    impl IntegerBandOracle<LinearKinematics, LinearKinematics, CylinderDetector> for NullOracle {
        fn combine(&self, query: &crate::traits::OracleQuery<LinearKinematics, LinearKinematics, CylinderDetector>) -> crate::interval::IntervalSet {
            if query.traffic.is_empty() {
                return crate::interval::IntervalSet::full(-(query.maxdown as f64), query.maxup as f64);
            }
            crate::interval::IntervalSet::new()
        }
        fn any_int_red(&self, query: &crate::traits::OracleQuery<LinearKinematics, LinearKinematics, CylinderDetector>) -> bool {
            !query.traffic.is_empty()
        }
        fn all_int_red(&self, query: &crate::traits::OracleQuery<LinearKinematics, LinearKinematics, CylinderDetector>) -> bool {
            !query.traffic.is_empty()
        }
        fn first_green(&self, _dir: bool, maxn: i64, query: &crate::traits::OracleQuery<LinearKinematics, LinearKinematics, CylinderDetector>) -> i64 {
            if query.traffic.is_empty() {
                0
            } else {
                -maxn
            }
        }
    }

    fn ownship(val: f64) -> LinearKinematics {
        LinearKinematics::new(val, 1.0, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 100.0, 0.0), 0)
    }

    #[test]
    fn no_traffic_yields_single_none_band() {
        let domain = DomainParams::new(-10.0, 10.0, true, 0.0, 1.0, true).unwrap();
        let mut b = Bands::new(domain, CoreParameters::default(), ownship(0.0), StaticAlertor::default(), NullOracle);
        assert_eq!(b.length(), 1);
        assert_eq!(b.region(0), BandsRegion::None);
        assert!(b.time_to_recovery().is_nan());
    }

    #[test]
    fn invalid_domain_degrades_to_empty() {
        let domain = DomainParams::new(350.0, 10.0, false, 360.0, 1.0, false).unwrap();
        let mut b = Bands::new(domain, CoreParameters::default(), ownship(5.0), StaticAlertor::default(), NullOracle);
        assert_eq!(b.length(), 0);
    }

    #[test]
    fn unchanged_setter_does_not_invalidate_cache() {
        let domain = DomainParams::new(-10.0, 10.0, true, 0.0, 1.0, true).unwrap();
        let mut b = Bands::new(domain, CoreParameters::default(), ownship(0.0), StaticAlertor::default(), NullOracle);
        b.force_compute();
        assert!(!b.outdated);
        b.set_min(-10.0);
        assert!(!b.outdated);
        b.set_min(-5.0);
        assert!(b.outdated);
    }

    #[test]
    fn force_compute_is_idempotent() {
        let domain = DomainParams::new(-10.0, 10.0, true, 0.0, 1.0, true).unwrap();
        let mut b = Bands::new(domain, CoreParameters::default(), ownship(0.0), StaticAlertor::default(), NullOracle);
        b.force_compute();
        let first = b.ranges.clone();
        b.force_compute();
        assert_eq!(first.len(), b.ranges.len());
        for (a, c) in first.iter().zip(b.ranges.iter()) {
            assert_eq!(a.region, c.region);
            assert!((a.interval.low - c.interval.low).abs() < 1e-9);
            assert!((a.interval.up - c.interval.up).abs() < 1e-9);
        }
    }
}
