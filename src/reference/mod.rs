// REFERENCE COLLABORATOR IMPLEMENTATIONS. THE 3-D CONFLICT DETECTOR'S
// SIBLINGS -- THE KINEMATIC TRAJECTORY GENERATOR, THE ALERTOR, AND THE
// INTEGER-BAND ORACLE DRIVING IT -- ARE KEPT AS EXTERNAL COLLABORATORS.
// THESE ARE MINIMAL, DEMO/TEST-ONLY INSTANCES USED TO EXERCISE END-TO-END
// SCENARIOS AND BACK THE CLI, NEVER IMPORTED BY crate::bands OR ANY OTHER
// CORE MODULE.

mod alertor;
mod kinematics;
mod oracle;

pub use alertor::StaticAlertor;
pub use kinematics::LinearKinematics;
pub use oracle::ReferenceOracle;
