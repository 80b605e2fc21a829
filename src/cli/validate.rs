// `bands validate` -- runs `check_input` on a `DomainParams` configuration
// and reports the diagnosis as a preflight-style report.

use anyhow::Result;

use kinematic_bands::domain::DomainParams;

#[allow(clippy::too_many_arguments)]
pub fn run_validate(min: f64, max: f64, rel: bool, modulus: f64, step: f64, recovery: bool, own_val: f64) -> Result<()> {
    println!("DOMAIN CONFIGURATION CHECK");
    println!();
    println!("  min            {}", min);
    println!("  max            {}", max);
    println!("  rel            {}", rel);
    println!("  modulus        {}", modulus);
    println!("  step           {}", step);
    println!("  recovery       {}", recovery);
    println!("  own_val        {}", own_val);
    println!();

    let domain = match DomainParams::new(min, max, rel, modulus, step, recovery) {
        Ok(d) => d,
        Err(e) => {
            println!("CONSTRUCTION FAILED: {}", e);
            std::process::exit(1);
        }
    };

    let checked = domain.check_input(own_val);
    if checked.is_valid() {
        println!("VALID (circular: {})", checked.circular());
        let geometry = domain.geometry(own_val, checked);
        println!("  min_val        {}", geometry.min_val);
        println!("  max_val        {}", geometry.max_val);
        println!("  maxdown        {}", geometry.maxdown);
        println!("  maxup          {}", geometry.maxup);
        if geometry.wraps() {
            println!("  domain wraps through zero");
        }
    } else {
        println!("INVALID CONFIGURATION");
        std::process::exit(1);
    }

    Ok(())
}
