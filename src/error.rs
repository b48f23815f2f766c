use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellsXtraError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Simulation library not found: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line_number}: failed to read line", path.display())]
    ReadFailed {
        path: PathBuf,
        line_number: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line_number}: module declaration has no '('", path.display())]
    MissingParenthesis {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{failed} of {total} library directories failed")]
    DirectoriesFailed { failed: usize, total: usize },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CellsXtraError {
    fn user_message(&self) -> String {
        match self {
            CellsXtraError::SourceNotFound { path, source } => {
                format!("Cannot open {}: {}", path.display(), source)
            }
            CellsXtraError::ReadFailed {
                path,
                line_number,
                source,
            } => {
                format!("Cannot read {} at line {}: {}", path.display(), line_number, source)
            }
            CellsXtraError::MissingParenthesis {
                path,
                line_number,
                line,
            } => {
                format!(
                    "Module declaration without '(' at {}:{}: {}",
                    path.display(),
                    line_number,
                    line.trim_end()
                )
            }
            CellsXtraError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            CellsXtraError::DirectoriesFailed { failed, total } => {
                format!("{} of {} library directories could not be read", failed, total)
            }
            CellsXtraError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CellsXtraError::SourceNotFound { .. } => Some(
                "Pass the Gowin installation directory as the first argument (e.g. cells_xtra /opt/gowin)".to_string()
            ),
            CellsXtraError::MissingParenthesis { .. } => Some(
                "Module headers split across several lines are not supported; join the header onto one line.".to_string()
            ),
            CellsXtraError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            CellsXtraError::DirectoriesFailed { .. } => Some(
                "Use --family to restrict extraction to the device families that are installed.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for CellsXtraError {
    fn from(error: toml::de::Error) -> Self {
        CellsXtraError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CellsXtraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = CellsXtraError::SourceNotFound {
            path: PathBuf::from("/opt/gowin/IDE/simlib/gw1n/prim_sim.v"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(error.user_message().contains("prim_sim.v"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_missing_parenthesis_display() {
        let error = CellsXtraError::MissingParenthesis {
            path: PathBuf::from("prim_sim.v"),
            line_number: 12,
            line: "module DFF\n".to_string(),
        };
        assert_eq!(error.to_string(), "prim_sim.v:12: module declaration has no '('");
        assert!(error.user_message().ends_with("module DFF"));
    }

    #[test]
    fn test_read_failure_carries_location() {
        let error = CellsXtraError::ReadFailed {
            path: PathBuf::from("prim_sim.v"),
            line_number: 7,
            source: std::io::Error::from(std::io::ErrorKind::InvalidData),
        };
        assert_eq!(error.to_string(), "prim_sim.v:7: failed to read line");
        assert!(error.user_message().contains("prim_sim.v at line 7"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let error = CellsXtraError::from(toml_error);
        assert!(matches!(error, CellsXtraError::Config { .. }));
    }
}
