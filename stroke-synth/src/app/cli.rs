//! Command-Line Interface

use crate::plan::TargetAxis;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stroke Synth - Synthesize human-like pointer trajectories
#[derive(Parser, Debug)]
#[command(name = "stroke-synth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize one movement
    Generate {
        /// Movement duration in seconds
        #[arg(short, long, default_value = "1.2")]
        duration: f64,

        /// Start X coordinate
        #[arg(long, default_value = "308")]
        x0: f64,

        /// Start Y coordinate
        #[arg(long, default_value = "0")]
        y0: f64,

        /// Number of strokes
        #[arg(short = 'n', long, default_value = "2")]
        strokes: usize,

        /// Target X coordinates, one value or one per stroke (comma separated)
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        targets_x: Vec<f64>,

        /// Target Y coordinates, one value or one per stroke (comma separated)
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        targets_y: Vec<f64>,

        /// Seed for a reproducible movement (overrides the config seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the full synthesis as JSON instead of the event log
        #[arg(long)]
        json: bool,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Synthesize a batch of unconstrained movements from random origins
    Batch {
        /// Number of movements
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Worker threads (defaults to available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Movement duration in seconds
        #[arg(short, long, default_value = "1.2")]
        duration: f64,

        /// Strokes per movement
        #[arg(long, default_value = "2")]
        strokes: usize,

        /// Lower bound for random origin coordinates
        #[arg(long, default_value = "400")]
        origin_min: f64,

        /// Upper bound for random origin coordinates
        #[arg(long, default_value = "800")]
        origin_max: f64,

        /// Seed for a reproducible batch (overrides the config seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file (defaults to a timestamped name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize a saved movement set
    Inspect {
        /// Movement set file written by `batch`
        input: PathBuf,

        /// Print this movement's event log instead of the summary
        #[arg(short, long)]
        movement: Option<usize>,
    },

    /// Answer a JSON generation request
    Handle {
        /// Request file (reads stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "solver.max_velocity_retries", "engine.noise.enabled")
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Turn a target option's values into an axis: none, one value, or a list
    pub fn target_axis(values: &[f64]) -> Option<TargetAxis> {
        match values {
            [] => None,
            [value] => Some(TargetAxis::Single(*value)),
            values => Some(TargetAxis::List(values.to_vec())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_generate_command_with_defaults() {
        let cli = Cli::try_parse_from(["stroke-synth", "generate"]).unwrap();

        match cli.command {
            Commands::Generate { duration, x0, y0, strokes, targets_x, targets_y, seed, json, output } => {
                assert_eq!(duration, 1.2);
                assert_eq!((x0, y0), (308.0, 0.0));
                assert_eq!(strokes, 2);
                assert!(targets_x.is_empty());
                assert!(targets_y.is_empty());
                assert!(seed.is_none());
                assert!(!json);
                assert!(output.is_none());
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parse_generate_command_with_targets() {
        let args = vec![
            "stroke-synth",
            "generate",
            "--duration", "1.5",
            "-n", "3",
            "--targets-x", "200,300,400",
            "--targets-y", "150",
            "--seed", "9",
            "--json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Generate { duration, strokes, targets_x, targets_y, seed, json, .. } => {
                assert_eq!(duration, 1.5);
                assert_eq!(strokes, 3);
                assert_eq!(targets_x, vec![200.0, 300.0, 400.0]);
                assert_eq!(targets_y, vec![150.0]);
                assert_eq!(seed, Some(9));
                assert!(json);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parse_batch_command_defaults() {
        let cli = Cli::try_parse_from(["stroke-synth", "batch"]).unwrap();

        match cli.command {
            Commands::Batch { count, workers, duration, strokes, origin_min, origin_max, seed, output } => {
                assert_eq!(count, 10);
                assert!(workers.is_none());
                assert_eq!(duration, 1.2);
                assert_eq!(strokes, 2);
                assert_eq!((origin_min, origin_max), (400.0, 800.0));
                assert!(seed.is_none());
                assert!(output.is_none());
            }
            _ => panic!("Expected Batch command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect_command() {
        let cli = Cli::try_parse_from(["stroke-synth", "inspect", "set.json", "-m", "3"]).unwrap();
        match cli.command {
            Commands::Inspect { input, movement } => {
                assert_eq!(input, PathBuf::from("set.json"));
                assert_eq!(movement, Some(3));
            }
            _ => panic!("Expected Inspect command"),
        }

        assert!(Cli::try_parse_from(["stroke-synth", "inspect"]).is_err());
    }

    #[test]
    fn test_cli_parse_handle_command() {
        let cli = Cli::try_parse_from(["stroke-synth", "handle", "request.json"]).unwrap();
        match cli.command {
            Commands::Handle { input } => assert_eq!(input, Some(PathBuf::from("request.json"))),
            _ => panic!("Expected Handle command"),
        }

        let cli = Cli::try_parse_from(["stroke-synth", "handle"]).unwrap();
        assert!(matches!(cli.command, Commands::Handle { input: None }));
    }

    #[test]
    fn test_cli_parse_config_subcommands() {
        let cli = Cli::try_parse_from(["stroke-synth", "config", "get", "solver.end_margin"]).unwrap();
        match cli.command {
            Commands::Config { action: ConfigAction::Get { key } } => assert_eq!(key, "solver.end_margin"),
            _ => panic!("Expected Config Get command"),
        }

        let cli = Cli::try_parse_from(["stroke-synth", "config", "reset", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { action: ConfigAction::Reset { force: true } }));
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["stroke-synth", "init", "--verbose", "--config", "/tmp/c.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["stroke-synth", "record"]).is_err());
    }

    #[test]
    fn test_target_axis() {
        assert_eq!(Cli::target_axis(&[]), None);
        assert_eq!(Cli::target_axis(&[4.0]), Some(TargetAxis::Single(4.0)));
        assert_eq!(Cli::target_axis(&[1.0, 2.0]), Some(TargetAxis::List(vec![1.0, 2.0])));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
