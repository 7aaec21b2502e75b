//! unidrop-sim: replay a dropdown scenario against a simulated page.
//!
//! Prints the final page state as JSON on stdout. `--log-level` overrides the
//! scenario's log level and `RUST_LOG` overrides both.

use std::process::ExitCode;

use clap::Parser;
use unidrop::{CliArgs, SimConfig, SimError, Simulator};

fn run(args: CliArgs) -> Result<String, SimError> {
    let config = SimConfig::load_from_file(&args.scenario)?;

    let level = args.log_level.unwrap_or(config.log_level);
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();
    log::info!(
        "Replaying {} steps from {:?}",
        config.steps.len(),
        args.scenario
    );

    let mut simulator = Simulator::new(&config)?;
    simulator.run(&config.steps)?;
    let report = simulator.report().to_json()?;
    simulator.shutdown();
    Ok(report)
}

fn main() -> ExitCode {
    match run(CliArgs::parse()) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("unidrop-sim: {e}");
            ExitCode::FAILURE
        }
    }
}
