use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Strip scripts, handlers and external references from untrusted SVG.
#[derive(Parser, Debug)]
#[command(
    name = "svgscrub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sanitize untrusted SVG markup for inline rendering"
)]
pub struct Cli {
    /// Input SVG file (stdin when omitted or `-`).
    pub input: Option<PathBuf>,

    /// Write the sanitized SVG here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print a summary of removed elements and attributes to stderr.
    #[arg(long)]
    pub report: bool,

    /// Reject inputs larger than this many bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_bytes: Option<usize>,

    /// Trace every removal.
    #[arg(short, long)]
    pub verbose: bool,

    /// Use this config file instead of the default location.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags win over the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.report {
            config.report = true;
        }
        if let Some(max_bytes) = self.max_bytes {
            config.max_input_bytes = max_bytes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["svgscrub"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.report);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "svgscrub",
            "in.svg",
            "-o",
            "out.svg",
            "--report",
            "--max-bytes",
            "4096",
            "-v",
            "--config",
            "cfg.json",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("in.svg")));
        assert_eq!(cli.output, Some(PathBuf::from("out.svg")));
        assert!(cli.report);
        assert_eq!(cli.max_bytes, Some(4096));
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from(["svgscrub", "--report", "--max-bytes", "10"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert!(config.report);
        assert_eq!(config.max_input_bytes, 10);

        let cli = Cli::try_parse_from(["svgscrub"]).unwrap();
        let mut config = Config {
            max_input_bytes: 99,
            report: true,
        };
        cli.apply_overrides(&mut config);
        assert!(config.report);
        assert_eq!(config.max_input_bytes, 99);
    }
}
