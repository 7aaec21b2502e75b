//! Command-line arguments for `unidrop-sim`.

use std::path::PathBuf;

use clap::Parser;

use crate::config::LogLevel;

/// Replay a dropdown scenario against a simulated page
#[derive(Parser, Debug)]
#[command(
    name = "unidrop-sim",
    version,
    about = "Replay a dropdown scenario against a simulated page"
)]
pub struct CliArgs {
    /// Scenario file to replay
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Override the scenario's log level (RUST_LOG still wins)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario_path() {
        let args = CliArgs::try_parse_from(["unidrop-sim", "scenarios/two_dropdowns.json"]).unwrap();
        assert_eq!(args.scenario, PathBuf::from("scenarios/two_dropdowns.json"));
        assert_eq!(args.log_level, None);
    }

    #[test]
    fn test_parse_log_level_override() {
        let args =
            CliArgs::try_parse_from(["unidrop-sim", "--log-level", "trace", "s.json"]).unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Trace));
    }

    #[test]
    fn test_missing_scenario_is_rejected() {
        let err = CliArgs::try_parse_from(["unidrop-sim"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_help_is_not_a_scenario() {
        let err = CliArgs::try_parse_from(["unidrop-sim", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(CliArgs::try_parse_from(["unidrop-sim", "--log-level", "loud", "s.json"]).is_err());
    }
}
