// CONSTRUCTION-TIME ERROR SURFACE.
//
// THE COMPUTE/QUERY SURFACE NEVER RAISES: AN INVALID CONFIGURATION JUST
// DEGRADES EVERY QUERY TO EMPTY/UNKNOWN. THIS ENUM EXISTS ONLY FOR THE
// NARROWER CASE OF STRUCTURALLY NONSENSICAL NUMBERS REACHING A
// CONSTRUCTOR (NON-FINITE BOUND, NON-POSITIVE STEP OR CYLINDER DIMENSION).

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BandsError {
    #[error("step must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("min/max must be finite, got min={0}, max={1}")]
    NonFiniteBounds(f64, f64),

    #[error("modulus must be non-negative and finite, got {0}")]
    InvalidModulus(f64),

    #[error("cylinder horizontal radius must be positive, got {0}")]
    InvalidCylinderRadius(f64),

    #[error("cylinder vertical half-height must be positive, got {0}")]
    InvalidCylinderHeight(f64),
}
