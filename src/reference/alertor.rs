// REFERENCE FIXED ALERTOR: A MINIMAL INSTANCE OF THE Alertor TRAIT BACKED
// BY CylinderDetector. DEMO/TEST-ONLY.
//
// FOUR TABLE ENTRIES, NOT THREE. BESIDES THE NEAR/MID/FAR CONFLICT LEVELS,
// LEVEL 1 IS AN ADMINISTRATIVE RECOVERY ENTRY WHOSE ONLY PURPOSE IS TO BE
// THE last_guidance_level LOOKUP TARGET: THE LAST-GUIDANCE FALLBACK NEEDS
// SOME LEVEL WHOSE CONFIGURED REGION LITERALLY IS RECOVERY. IT IS NEVER
// PROCESSED BY THE BAND COMPOSITOR'S PER-LEVEL LOOP, SINCE ITS REGION IS
// NOT A CONFLICT BAND.

use crate::colored::BandsRegion;
use crate::cylinder::CylinderDetector;
use crate::traits::{AlertLevelConfig, Alertor};

pub struct StaticAlertor {
    recovery_det: CylinderDetector,
    far_det: CylinderDetector,
    mid_det: CylinderDetector,
    near_det: CylinderDetector,
}

impl Default for StaticAlertor {
    fn default() -> Self {
        Self {
            recovery_det: CylinderDetector::mk(600.0, 120.0).expect("valid recovery cylinder"),
            far_det: CylinderDetector::mk(2000.0, 300.0).expect("valid far cylinder"),
            mid_det: CylinderDetector::mk(1500.0, 250.0).expect("valid mid cylinder"),
            near_det: CylinderDetector::mk(1000.0, 200.0).expect("valid near cylinder"),
        }
    }
}

impl Alertor<CylinderDetector> for StaticAlertor {
    fn most_severe_alert_level(&self) -> usize {
        4
    }

    fn conflict_alert_level(&self) -> usize {
        4
    }

    fn last_guidance_level(&self) -> usize {
        1
    }

    fn level_config(&self, level: usize) -> AlertLevelConfig {
        match level {
            1 => AlertLevelConfig { region: BandsRegion::Recovery, alerting_time: 0.0, late_alerting_time: 0.0 },
            2 => AlertLevelConfig { region: BandsRegion::Far, alerting_time: 60.0, late_alerting_time: 90.0 },
            3 => AlertLevelConfig { region: BandsRegion::Mid, alerting_time: 45.0, late_alerting_time: 70.0 },
            _ => AlertLevelConfig { region: BandsRegion::Near, alerting_time: 30.0, late_alerting_time: 50.0 },
        }
    }

    fn detector(&self, level: usize) -> &CylinderDetector {
        match level {
            1 => &self.recovery_det,
            2 => &self.far_det,
            3 => &self.mid_det,
            _ => &self.near_det,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_config_reports_ascending_severity_regions() {
        let a = StaticAlertor::default();
        assert_eq!(a.level_config(2).region, BandsRegion::Far);
        assert_eq!(a.level_config(3).region, BandsRegion::Mid);
        assert_eq!(a.level_config(4).region, BandsRegion::Near);
        assert!(a.level_config(2).region.is_conflict_band());
        assert!(!a.level_config(1).region.is_conflict_band());
    }

    #[test]
    fn last_guidance_level_is_the_recovery_entry() {
        let a = StaticAlertor::default();
        assert_eq!(a.level_config(a.last_guidance_level()).region, BandsRegion::Recovery);
    }
}
