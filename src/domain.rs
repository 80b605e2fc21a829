// DOMAIN GEOMETRY AND INPUT VALIDATION.

use crate::error::BandsError;
use crate::tolerance::{almost_equals, almost_leq, modulo, EPSILON};

// MEMOIZED ONCE PER COMPUTE EPOCH.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckedState {
    Unchecked,
    Invalid,
    Valid { circular: bool },
}

impl CheckedState {
    pub fn is_valid(&self) -> bool {
        matches!(self, CheckedState::Valid { .. })
    }

    pub fn circular(&self) -> bool {
        matches!(self, CheckedState::Valid { circular: true })
    }
}

// CONFIGURATION OF THE CONTROL VARIABLE'S RANGE. SETTERS REPORT WHETHER
// THE VALUE ACTUALLY CHANGED SO Bands CAN DECIDE WHETHER TO INVALIDATE.
#[derive(Debug, Clone, Copy)]
pub struct DomainParams {
    min: f64,
    max: f64,
    rel: bool,
    modulus: f64,
    step: f64,
    recovery: bool,
}

impl DomainParams {
    pub fn new(
        min: f64,
        max: f64,
        rel: bool,
        modulus: f64,
        step: f64,
        recovery: bool,
    ) -> Result<Self, BandsError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(BandsError::InvalidStep(step));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(BandsError::NonFiniteBounds(min, max));
        }
        if !modulus.is_finite() || modulus < 0.0 {
            return Err(BandsError::InvalidModulus(modulus));
        }
        Ok(Self {
            min,
            max,
            rel,
            modulus,
            step,
            recovery,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }
    pub fn max(&self) -> f64 {
        self.max
    }
    pub fn rel(&self) -> bool {
        self.rel
    }
    pub fn modulus(&self) -> f64 {
        self.modulus
    }
    pub fn step(&self) -> f64 {
        self.step
    }
    pub fn recovery(&self) -> bool {
        self.recovery
    }

    pub fn set_min(&mut self, min: f64) -> bool {
        if almost_equals(self.min, min) {
            false
        } else {
            self.min = min;
            true
        }
    }

    pub fn set_max(&mut self, max: f64) -> bool {
        if almost_equals(self.max, max) {
            false
        } else {
            self.max = max;
            true
        }
    }

    // FLIPPING REL CHANGES WHAT MIN/MAX MEAN (ABSOLUTE VS. OWNSHIP-RELATIVE),
    // SO BOTH ARE INVALIDATED TO NAN; THE CALLER MUST RE-SET THEM.
    pub fn set_rel(&mut self, rel: bool) -> bool {
        if self.rel == rel {
            false
        } else {
            self.rel = rel;
            self.min = f64::NAN;
            self.max = f64::NAN;
            true
        }
    }

    pub fn set_mod(&mut self, modulus: f64) -> bool {
        if almost_equals(self.modulus, modulus) {
            false
        } else {
            self.modulus = modulus;
            true
        }
    }

    pub fn set_step(&mut self, step: f64) -> bool {
        if almost_equals(self.step, step) {
            false
        } else {
            self.step = step;
            true
        }
    }

    pub fn set_recovery(&mut self, recovery: bool) -> bool {
        if self.recovery == recovery {
            false
        } else {
            self.recovery = recovery;
            true
        }
    }

    // NEVER PANICS: MALFORMED INPUT SIMPLY MAPS TO Invalid.
    pub fn check_input(&self, own_val: f64) -> CheckedState {
        if !own_val.is_finite() {
            return CheckedState::Invalid;
        }
        if self.step <= 0.0 || !self.step.is_finite() {
            return CheckedState::Invalid;
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return CheckedState::Invalid;
        }
        if !self.modulus.is_finite() || self.modulus < 0.0 {
            return CheckedState::Invalid;
        }

        if self.rel {
            if !(almost_leq(self.min, 0.0) && almost_leq(0.0, self.max)) {
                return CheckedState::Invalid;
            }
        } else if !(almost_leq(self.min, own_val) && almost_leq(own_val, self.max)) {
            return CheckedState::Invalid;
        }

        let circular;
        if self.modulus > 0.0 {
            if !almost_leq(self.max - self.min, self.modulus) {
                return CheckedState::Invalid;
            }
            let half_bound = if self.rel {
                self.modulus / 2.0
            } else {
                self.modulus
            };
            if !almost_leq(self.max, half_bound) {
                return CheckedState::Invalid;
            }
            circular = almost_equals(self.max - self.min, self.modulus);
        } else {
            circular = false;
        }

        CheckedState::Valid { circular }
    }

    // CALLERS MUST HAVE ALREADY CONFIRMED VALIDITY VIA check_input.
    pub fn geometry(&self, own_val: f64, checked: CheckedState) -> DomainGeometry {
        let circular = checked.circular();
        let m = self.modulus;

        let min_val = if circular {
            0.0
        } else if self.rel {
            modulo(own_val + self.min, m)
        } else {
            self.min
        };

        let max_val = if circular {
            m
        } else if self.rel {
            modulo(own_val + self.max, m)
        } else {
            self.max
        };

        let min_rel = if circular {
            m / 2.0
        } else if self.rel {
            -self.min
        } else {
            modulo(own_val - self.min, m)
        };

        let max_rel = if circular {
            m / 2.0
        } else if self.rel {
            self.max
        } else {
            modulo(self.max - own_val, m)
        };

        let mut maxdown = (min_rel / self.step).ceil() as i64 + 1;
        if m > 0.0 && almost_leq(m / 2.0, maxdown as f64 * self.step) {
            maxdown -= 1;
        }

        let mut maxup = (max_rel / self.step).ceil() as i64 + 1;
        if m > 0.0 && almost_leq(m / 2.0, maxup as f64 * self.step) {
            maxup -= 1;
        }

        DomainGeometry {
            min_val,
            max_val,
            min_rel,
            max_rel,
            maxdown: maxdown.max(0),
            maxup: maxup.max(0),
            circular,
            modulus: m,
            step: self.step,
        }
    }
}

// WHEN MODULUS > 0 AND NOT CIRCULAR, MIN_VAL/MAX_VAL MAY DESCRIBE A
// WRAPPED DOMAIN (MIN_VAL > MAX_VAL): THE UNION OF [MIN_VAL, MODULUS]
// AND [0, MAX_VAL].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainGeometry {
    pub min_val: f64,
    pub max_val: f64,
    pub min_rel: f64,
    pub max_rel: f64,
    pub maxdown: i64,
    pub maxup: i64,
    pub circular: bool,
    pub modulus: f64,
    pub step: f64,
}

impl DomainGeometry {
    pub fn wraps(&self) -> bool {
        self.modulus > 0.0 && !self.circular && self.min_val > self.max_val + EPSILON
    }
}
