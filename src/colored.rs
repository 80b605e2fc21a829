// COLORED-VALUE BOUNDS AND FINAL BAND ASSEMBLY
//
// A SEQUENCE OF (VALUE, REGION) BREAKPOINTS DESCRIBES A PIECEWISE-CONSTANT
// COLORING OF THE REAL LINE. INSERT PAINTS A SUB-INTERVAL; TO_BANDS
// COLLAPSES THE PAINTED SEQUENCE INTO MAXIMAL SAME-COLOR RANGES.

use crate::interval::Interval;
use crate::tolerance::almost_equals;

// ORDERING BETWEEN CONFLICT REGIONS IS OWNED BY THE ALERTOR, NOT THIS ENUM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandsRegion {
    None,
    Recovery,
    Near,
    Mid,
    Far,
    Unknown,
}

impl BandsRegion {
    pub fn is_conflict_band(&self) -> bool {
        matches!(self, BandsRegion::Near | BandsRegion::Mid | BandsRegion::Far)
    }

    // CONFLICT BANDS AND RECOVERY ARE INCLUSIVE AT SHARED BOUNDARIES; NONE IS NOT.
    pub fn is_resolution_band(&self) -> bool {
        self.is_conflict_band() || matches!(self, BandsRegion::Recovery)
    }
}

// A MAXIMAL CONTIGUOUS SUB-INTERVAL PAINTED WITH A SINGLE REGION.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandsRange {
    pub interval: Interval,
    pub region: BandsRegion,
}

impl BandsRange {
    pub fn empty() -> Self {
        Self {
            interval: Interval::empty(),
            region: BandsRegion::Unknown,
        }
    }
}

// ONE BREAKPOINT OF A PIECEWISE-CONSTANT COLORING.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColoredValue {
    value: f64,
    region: BandsRegion,
}

// SORTED BREAKPOINTS SPANNING [LO, HI], PROGRESSIVELY REFINED BY INSERT.
#[derive(Debug, Clone)]
pub struct ColoredSequence {
    points: Vec<ColoredValue>,
}

impl ColoredSequence {
    pub fn new(lo: f64, hi: f64, region: BandsRegion) -> Self {
        Self {
            points: vec![
                ColoredValue { value: lo, region },
                ColoredValue { value: hi, region },
            ],
        }
    }

    // PAINTS [A, B) LB_COLOR AND THE POINT B UB_COLOR (CLIPPED TO THE SPAN).
    // TO_BANDS KEYS EACH SEGMENT'S COLOR OFF ITS LEFT BREAKPOINT, SO THE
    // LOWER BOUNDARY MUST CARRY LB_COLOR OR THE WHOLE INSERT IS INVISIBLE.
    pub fn insert(&mut self, a: f64, b: f64, lb_color: BandsRegion, ub_color: BandsRegion) {
        if self.points.is_empty() {
            return;
        }
        let span_lo = self.points.first().unwrap().value;
        let span_hi = self.points.last().unwrap().value;
        let a = a.max(span_lo);
        let b = b.min(span_hi);
        if a > b {
            return;
        }

        self.ensure_breakpoint(a);
        self.ensure_breakpoint(b);

        for p in self.points.iter_mut() {
            if almost_equals(p.value, b) {
                p.region = ub_color;
            } else if p.value >= a && p.value < b {
                p.region = lb_color;
            }
        }
    }

    fn ensure_breakpoint(&mut self, v: f64) {
        if self.points.iter().any(|p| almost_equals(p.value, v)) {
            return;
        }
        let region = self.region_at(v);
        let idx = self
            .points
            .iter()
            .position(|p| p.value > v)
            .unwrap_or(self.points.len());
        self.points.insert(idx, ColoredValue { value: v, region });
    }

    fn region_at(&self, v: f64) -> BandsRegion {
        for w in self.points.windows(2) {
            if w[0].value <= v && v <= w[1].value {
                return w[0].region;
            }
        }
        self.points.last().map(|p| p.region).unwrap_or(BandsRegion::Unknown)
    }

    // COLLAPSES THE PAINTED SEQUENCE INTO MAXIMAL SAME-COLOR RANGES.
    pub fn to_bands(&self) -> Vec<BandsRange> {
        let mut bands = Vec::new();
        if self.points.len() < 2 {
            return bands;
        }
        let mut seg_start = self.points[0].value;
        let mut seg_region = self.points[0].region;
        for w in self.points.windows(2) {
            let region = w[0].region;
            if region != seg_region {
                bands.push(BandsRange {
                    interval: Interval::new(seg_start, w[0].value),
                    region: seg_region,
                });
                seg_start = w[0].value;
                seg_region = region;
            }
        }
        let last = self.points.last().unwrap();
        bands.push(BandsRange {
            interval: Interval::new(seg_start, last.value),
            region: seg_region,
        });
        bands
    }
}
