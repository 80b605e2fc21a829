// KINEMATIC MANEUVER GUIDANCE BAND SYNTHESIS: GIVEN A ONE-DIMENSIONAL
// CONTROL VARIABLE AND A TRAFFIC SET, COMPUTES COLORED CONFLICT-FREE,
// ALERTING, AND RECOVERY BANDS.

pub mod bands;
pub mod colored;
pub mod cylinder;
pub mod domain;
pub mod error;
pub mod event;
pub mod interval;
pub mod none_set;
pub mod peripheral;
pub mod reference;
pub mod recovery;
pub mod resolution;
pub mod tolerance;
pub mod traits;

pub use bands::Bands;
pub use colored::{BandsRange, BandsRegion};
pub use domain::DomainParams;
pub use error::BandsError;
pub use traits::CoreParameters;
