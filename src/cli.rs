use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cells_xtra")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract Gowin blackbox cell definitions.")]
#[command(
    long_about = "Scans the Gowin simulation library (IDE/simlib/<family>/prim_sim.v) \
                  and prints the name of every primitive module it declares. \
                  A fresh cells_xtra.v with a generated-by header is written to the \
                  current directory."
)]
#[command(after_help = "EXAMPLES:\n  \
    cells_xtra\n  \
    cells_xtra /opt/gowin\n  \
    cells_xtra ~/gowin --family gw1n,gw2a --keep-going\n  \
    cells_xtra ~/gowin --discover --output-format json")]
pub struct Cli {
    /// Gowin installation directory [default: /opt/gowin/]
    pub gowin_dir: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, help = "Output file (default: cells_xtra.v)")]
    pub output: Option<PathBuf>,

    /// Device families to scan
    #[arg(short, long, value_delimiter = ',')]
    pub family: Option<Vec<String>>,

    /// Scan every family under the simulation library
    #[arg(long, conflicts_with = "family")]
    pub discover: bool,

    /// Report failing directories and continue with the rest
    #[arg(long)]
    pub keep_going: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for cell names and messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Colored diagnostics, one cell name per line
    Human,
    /// One JSON object per line
    Json,
    /// One cell name per line
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_root(self.gowin_dir.clone())
            .with_families(self.family.clone())
            .with_output(self.output.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Default `env_logger` filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "cells_xtra=error";
        }
        match self.verbose {
            0 => "cells_xtra=warn",
            1 => "cells_xtra=info",
            2 => "cells_xtra=debug",
            _ => "cells_xtra=trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let cli = Cli::try_parse_from(["cells_xtra"]).unwrap();
        assert!(cli.gowin_dir.is_none());
        assert!(!cli.keep_going);
        assert!(matches!(cli.output_format, OutputFormat::Plain));

        let config = cli.load_config().unwrap();
        assert_eq!(config.library.root, PathBuf::from("/opt/gowin/"));
        assert_eq!(config.output.path, PathBuf::from("cells_xtra.v"));
    }

    #[test]
    fn test_positional_root() {
        let cli = Cli::try_parse_from(["cells_xtra", "/tools/gowin"]).unwrap();
        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.root, Some(PathBuf::from("/tools/gowin")));
    }

    #[test]
    fn test_family_list() {
        let cli = Cli::try_parse_from(["cells_xtra", "-f", "gw1n,gw2a", "--family", "gw5a"]).unwrap();
        assert_eq!(
            cli.family,
            Some(vec!["gw1n".to_string(), "gw2a".to_string(), "gw5a".to_string()])
        );
    }

    #[test]
    fn test_discover_conflicts_with_family() {
        assert!(Cli::try_parse_from(["cells_xtra", "--discover", "-f", "gw1n"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["cells_xtra", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_verbosity_and_log_filter() {
        let cli = Cli::try_parse_from(["cells_xtra", "-vv"]).unwrap();
        assert_eq!(cli.verbosity_level(), 2);
        assert_eq!(cli.log_filter(), "cells_xtra=debug");

        let cli = Cli::try_parse_from(["cells_xtra", "-q"]).unwrap();
        assert_eq!(cli.verbosity_level(), 0);
        assert_eq!(cli.log_filter(), "cells_xtra=error");
    }
}
