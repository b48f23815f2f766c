pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, LibraryConfig, OutputConfig};
pub use error::{CellsXtraError, Result, UserFriendlyError};

pub use extractor::{
    extract, scan_line, CellExtractor, CellName, DirectoryResult, ExtractionReport, LineMatch,
    OutputFile,
};
pub use scanner::{LibraryDir, LibraryLocator};
pub use ui::{OutputFormatter, OutputMode};

use std::path::Path;

/// Runs the extraction workflow: resolve the library directories, write
/// the output header, then print the cells of each directory in order.
pub struct CellsXtra {
    config: Config,
    output_formatter: OutputFormatter,
    keep_going: bool,
    discover: bool,
}

impl CellsXtra {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            keep_going: false,
            discover: false,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;

        Ok(Self::new(
            config,
            cli_args.output_format.into(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        )
        .with_keep_going(cli_args.keep_going)
        .with_discover(cli_args.discover))
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn with_discover(mut self, discover: bool) -> Self {
        self.discover = discover;
        self
    }

    /// Execute one run. With `keep_going` set, per-directory failures are
    /// recorded in the report instead of aborting; the caller inspects
    /// [`ExtractionReport::failed_directories`].
    pub fn run(&self) -> Result<ExtractionReport> {
        let directories = self.library_directories()?;

        let mut output = OutputFile::create(&self.config.output.path)?;
        output.write_header(&self.config.output.header)?;

        let mut report = ExtractionReport::new(
            self.config.library.root.clone(),
            output.path().to_path_buf(),
        );

        for dir in directories {
            if !dir.exists() {
                self.output_formatter.not_a_directory(&dir.display_path());
            }

            let mut result = DirectoryResult::new(dir.family.clone(), dir.path.clone());

            match self.extract_directory(&dir, &mut result) {
                Ok(()) => {
                    self.output_formatter.info(&format!(
                        "{}: {} cells",
                        dir.family,
                        result.cells.len()
                    ));
                }
                Err(e) if self.keep_going => {
                    log::warn!("skipping {}: {}", dir.display_path(), e);
                    self.output_formatter.warning(&e.user_message());
                    result.error = Some(e.to_string());
                }
                Err(e) => return Err(e),
            }

            report.directories.push(result);
        }

        output.finish()?;
        self.output_formatter.success(&format!(
            "Wrote {}",
            report.output.display()
        ));

        Ok(report)
    }

    fn library_directories(&self) -> Result<Vec<LibraryDir>> {
        let locator = LibraryLocator::new(&self.config.library);

        if self.discover {
            let found = locator.discover()?;
            self.output_formatter.debug(&format!(
                "Discovered {} families under {}",
                found.len(),
                locator.simlib().display()
            ));
            Ok(found)
        } else {
            Ok(locator.candidates())
        }
    }

    fn extract_directory(&self, dir: &LibraryDir, result: &mut DirectoryResult) -> Result<()> {
        let extractor = extract(&dir.path, &self.config.library.source_file)?;

        for cell in extractor {
            let cell = cell?;
            self.output_formatter.cell(&dir.family, &cell);
            result.cells.push(cell);
        }

        Ok(())
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &CellsXtraError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
