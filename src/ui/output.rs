use crate::error::{CellsXtraError, UserFriendlyError};
use crate::extractor::{CellName, ExtractionReport};
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");

/// Cell names go to stdout, one per line (or one JSON object per line).
/// Everything else except the missing-directory notice goes to stderr so
/// the name list can be piped.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stderr().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn cell(&self, family: &str, cell: &CellName) {
        match self.mode {
            OutputMode::Human | OutputMode::Plain => println!("{}", cell),
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "cell",
                "family": family,
                "name": cell.name,
                "line": cell.line_number,
            })),
        }
    }

    /// Printed regardless of verbosity.
    pub fn not_a_directory(&self, path: &str) {
        let message = format!("{} is not a directory", path);
        log::warn!("{}", message);
        match self.mode {
            OutputMode::Json => self.print_json_message("warning", &message),
            _ => println!("{}", message),
        }
    }

    pub fn success(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => eprintln!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => eprintln!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => eprintln!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human if self.use_colors => eprintln!("  {}", style(message).dim()),
                OutputMode::Json => self.print_json_message("debug", message),
                _ => eprintln!("DEBUG: {}", message),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &CellsXtraError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human if self.use_colors => eprintln!(
                    "{}{}",
                    INFO,
                    style(format!("Suggestion: {}", suggestion)).cyan()
                ),
                OutputMode::Json => self.print_json_object(&serde_json::json!({
                    "type": "suggestion",
                    "message": suggestion
                })),
                _ => eprintln!("Suggestion: {}", suggestion),
            }
        }
    }

    pub fn print_extraction_report(&self, report: &ExtractionReport) {
        match self.mode {
            OutputMode::Json => {
                let mut value = serde_json::to_value(report).unwrap_or_default();
                if let Some(obj) = value.as_object_mut() {
                    obj.insert("type".to_string(), "report".into());
                    obj.insert("total_cells".to_string(), report.total_cells().into());
                }
                self.print_json_object(&value);
            }
            _ => self.debug(&report.display_summary()),
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let styled = match msg_type {
                MessageType::Success => style(message).green().bold(),
                MessageType::Error => style(message).red().bold(),
                MessageType::Warning => style(message).yellow().bold(),
                MessageType::Info => style(message).cyan(),
            };
            let emoji = match msg_type {
                MessageType::Success => CHECKMARK,
                MessageType::Error => CROSS,
                MessageType::Warning => WARNING,
                MessageType::Info => INFO,
            };
            eprintln!("{}{}", emoji, styled);
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };
            eprintln!("{} {}", prefix, message);
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}
