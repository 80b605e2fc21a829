// INVARIANTS

use kinematic_bands::bands::Bands;
use kinematic_bands::colored::BandsRegion;
use kinematic_bands::domain::DomainParams;
use kinematic_bands::reference::{LinearKinematics, ReferenceOracle, StaticAlertor};
use kinematic_bands::traits::{CoreParameters, Vector3};

fn ownship(own_val: f64, velocity: Vector3) -> LinearKinematics {
    LinearKinematics::new(own_val, 1.0, Vector3::new(0.0, 0.0, 0.0), velocity, 0)
}

fn fresh_bands() -> Bands<LinearKinematics, LinearKinematics, kinematic_bands::cylinder::CylinderDetector, StaticAlertor, ReferenceOracle> {
    let domain = DomainParams::new(0.0, 360.0, false, 360.0, 2.0, true).unwrap();
    let own = ownship(90.0, Vector3::new(0.0, 100.0, 0.0));
    Bands::new(domain, CoreParameters::default(), own, StaticAlertor::default(), ReferenceOracle::new(2.0, 360.0))
}

// Invariant 1: bands are pairwise disjoint and sorted by `low`.
#[test]
fn invariant_1_bands_disjoint_and_sorted() {
    let mut bands = fresh_bands();
    let intruder = LinearKinematics::new(0.0, 1.0, Vector3::new(0.0, 2500.0, 0.0), Vector3::new(0.0, 0.0, 0.0), 1);
    bands.set_conflict_aircraft(4, vec![intruder]);

    let ranges = bands.ranges().to_vec();
    for w in ranges.windows(2) {
        assert!(w[0].interval.up <= w[1].interval.low + 1e-6, "bands must not overlap");
    }
}

// Invariant 2: the union of all bands covers the full configured domain.
#[test]
fn invariant_2_bands_cover_whole_domain() {
    let mut bands = fresh_bands();
    let total: f64 = (0..bands.length()).map(|i| bands.interval(i).width()).sum();
    assert!((total - 360.0).abs() < 1e-6);
}

// Invariant 3: every band's region is a value produced by the alertor's
// configured regions, RECOVERY, or NONE -- never a nonsensical label.
#[test]
fn invariant_3_regions_are_well_formed() {
    let mut bands = fresh_bands();
    for r in bands.ranges() {
        assert_ne!(r.region, BandsRegion::Unknown);
    }
}

// Invariant 4: an invalid configuration always degrades to zero bands and a
// NaN recovery time, never a panic or a stale cache read.
#[test]
fn invariant_4_invalid_configuration_degrades_cleanly() {
    let domain = DomainParams::new(350.0, 10.0, false, 360.0, 1.0, true).unwrap();
    let own = ownship(5.0, Vector3::new(0.0, 100.0, 0.0));
    let mut bands = Bands::new(domain, CoreParameters::default(), own, StaticAlertor::default(), ReferenceOracle::new(1.0, 360.0));
    assert_eq!(bands.length(), 0);
    assert!(bands.time_to_recovery().is_nan());
    assert_eq!(bands.range_of(5.0), 0);
}

// Invariant 5: a query index past the end of the range list reports `length`,
// never panics.
#[test]
fn invariant_5_out_of_range_query_is_length() {
    let mut bands = fresh_bands();
    let n = bands.length();
    assert_eq!(bands.region(n + 5), BandsRegion::Unknown);
    assert!(bands.interval(n + 5).is_empty());
}

// Invariant 6: `recovery_time` is NaN unless recovery was actually triggered
// this compute epoch.
#[test]
fn invariant_6_recovery_time_nan_without_recovery() {
    let mut bands = fresh_bands();
    assert!(bands.time_to_recovery().is_nan());
}

// Invariant 7: an unchanged setter value never flips the outdated flag, so a
// redundant `set_*` call is a no-op with respect to the cache.
#[test]
fn invariant_7_redundant_setter_is_a_cache_noop() {
    let mut bands = fresh_bands();
    bands.force_compute();
    bands.set_max(360.0);
    let ranges_before = bands.ranges().to_vec();
    bands.force_compute();
    let ranges_after = bands.ranges().to_vec();
    assert_eq!(ranges_before.len(), ranges_after.len());
}

// Invariant 8: `force_compute` is idempotent -- two consecutive calls with no
// intervening mutation produce identical results.
#[test]
fn invariant_8_force_compute_is_idempotent() {
    let mut bands = fresh_bands();
    bands.force_compute();
    let first = bands.ranges().to_vec();
    bands.force_compute();
    let second = bands.ranges().to_vec();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.region, b.region);
        assert!((a.interval.low - b.interval.low).abs() < 1e-9);
        assert!((a.interval.up - b.interval.up).abs() < 1e-9);
    }
}
