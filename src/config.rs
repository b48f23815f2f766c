use crate::error::{CellsXtraError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_GOWIN_DIR: &str = "/opt/gowin/";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub library: LibraryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Gowin installation root
    pub root: PathBuf,
    /// Simulation library location relative to the root
    pub simlib_dir: PathBuf,
    /// Device families scanned in order
    pub families: Vec<String>,
    /// File holding the primitive declarations inside each family directory
    pub source_file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Text of the generated-by comment written at the top of the output file
    pub header: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_GOWIN_DIR),
            simlib_dir: PathBuf::from("IDE/simlib"),
            families: vec!["gw1n".to_string()],
            source_file: "prim_sim.v".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cells_xtra.v"),
            header: "Created by cells_xtra".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CellsXtraError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CellsXtraError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| CellsXtraError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["cells_xtra.toml", ".cells_xtra.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref root) = cli_args.root {
            self.library.root = root.clone();
        }

        if let Some(ref families) = cli_args.families {
            self.library.families = families
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(ref output) = cli_args.output {
            self.output.path = output.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| CellsXtraError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CellsXtraError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.library.families.is_empty() {
            return Err(CellsXtraError::Config {
                message: "At least one device family must be specified".to_string(),
            });
        }

        if self.library.source_file.is_empty() {
            return Err(CellsXtraError::Config {
                message: "Source file name must not be empty".to_string(),
            });
        }

        if self.library.source_file.contains(['/', '\\']) {
            return Err(CellsXtraError::Config {
                message: format!(
                    "Source file must be a bare file name: {}",
                    self.library.source_file
                ),
            });
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(CellsXtraError::Config {
                message: "Output path must not be empty".to_string(),
            });
        }

        if self.output.header.contains('\n') {
            return Err(CellsXtraError::Config {
                message: "Output header must be a single line".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub families: Option<Vec<String>>,
    pub output: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    pub fn with_families(mut self, families: Option<Vec<String>>) -> Self {
        self.families = families;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}
