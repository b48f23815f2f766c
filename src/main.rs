use cells_xtra::{CellsXtra, CellsXtraError, Cli, OutputFormatter, OutputMode, UserFriendlyError};
use clap::Parser;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(&cli);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match CellsXtra::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e, cli.output_format.into());
            return exit_code_for(&e);
        }
    };

    match app.run() {
        Ok(report) => {
            app.output_formatter().print_extraction_report(&report);

            let failed = report.failed_directories();
            if failed == 0 {
                0
            } else {
                let e = CellsXtraError::DirectoriesFailed {
                    failed,
                    total: report.directories.len(),
                };
                app.handle_error(&e);
                exit_code_for(&e)
            }
        }
        Err(e) => {
            log::debug!("run failed: {:?}", e);
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &CellsXtraError) -> i32 {
    match error {
        CellsXtraError::Config { .. } => 2,
        CellsXtraError::SourceNotFound { .. } => 3,
        CellsXtraError::MissingParenthesis { .. } => 4,
        CellsXtraError::DirectoriesFailed { .. } => 5,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "cells_xtra.toml".to_string());

    match CellsXtra::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  cells_xtra --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &CellsXtraError, mode: OutputMode) {
    let formatter = OutputFormatter::new(mode, 0, false);
    formatter.print_user_friendly_error(error);
}

fn setup_logging(cli: &Cli) {
    let env = env_logger::Env::default().default_filter_or(cli.log_filter());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
