// bands-dump -- diagnostics CLI for the kinematic maneuver guidance band
// synthesis engine. Builds a toy scenario against the reference
// collaborators (`kinematic_bands::reference`) and prints the resulting
// bands, or validates a `DomainParams` configuration in isolation.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};

use kinematic_bands::bands::Bands;
use kinematic_bands::domain::DomainParams;
use kinematic_bands::reference::{LinearKinematics, ReferenceOracle, StaticAlertor};
use kinematic_bands::traits::{CoreParameters, Vector3};

#[derive(Parser)]
#[command(name = "bands-dump")]
#[command(about = "Kinematic maneuver guidance band synthesis diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: SubCmd,
}

#[derive(Subcommand)]
enum SubCmd {
    /// Run the built-in demo scenario and print the structured dump form.
    Dump {
        #[arg(long, default_value_t = 3)]
        precision: usize,
    },

    /// Run the built-in demo scenario and print the human-readable form.
    Explain,

    /// Print the demo scenario's configuration, then its bands.
    Demo,

    /// Validate a `DomainParams` configuration without running a compute.
    Validate(ValidateArgs),
}

#[derive(Parser)]
struct ValidateArgs {
    #[arg(long, allow_hyphen_values = true)]
    min: f64,
    #[arg(long, allow_hyphen_values = true)]
    max: f64,
    #[arg(long)]
    rel: bool,
    #[arg(long, default_value_t = 0.0)]
    modulus: f64,
    #[arg(long, default_value_t = 1.0)]
    step: f64,
    #[arg(long)]
    recovery: bool,
    #[arg(long, allow_hyphen_values = true)]
    own_val: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();

    match cli.command {
        SubCmd::Dump { precision } => {
            let mut bands = demo_scenario()?;
            print!("{}", bands.dump(precision));
            Ok(())
        }
        SubCmd::Explain => {
            let mut bands = demo_scenario()?;
            print!("{}", bands.explain());
            Ok(())
        }
        SubCmd::Demo => {
            println!("demo scenario: circular track, min=0 max=360 mod=360 step=5 own_val=90");
            println!();
            let mut bands = demo_scenario()?;
            print!("{}", bands.explain());
            Ok(())
        }
        SubCmd::Validate(args) => cli::validate::run_validate(
            args.min,
            args.max,
            args.rel,
            args.modulus,
            args.step,
            args.recovery,
            args.own_val,
        ),
    }
}

/// A circular-track scenario: ownship heading north at 100 m/s, one
/// head-on intruder, domain `[0, 360)` modulo `360` with a 5-degree step.
fn demo_scenario() -> Result<Bands<LinearKinematics, LinearKinematics, kinematic_bands::cylinder::CylinderDetector, StaticAlertor, ReferenceOracle>> {
    let domain = DomainParams::new(0.0, 360.0, false, 360.0, 5.0, true)?;
    let ownship = LinearKinematics::new(90.0, 1.0, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 100.0, 0.0), 0);
    let intruder = LinearKinematics::new(0.0, 1.0, Vector3::new(0.0, 12000.0, 0.0), Vector3::new(0.0, -80.0, 0.0), 1);

    let mut bands = Bands::new(domain, CoreParameters::default(), ownship, StaticAlertor::default(), ReferenceOracle::new(5.0, 360.0));
    bands.set_traffic(vec![intruder]);
    Ok(bands)
}
