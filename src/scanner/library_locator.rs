use crate::config::LibraryConfig;
use crate::error::{CellsXtraError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One device-family directory of the simulation library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDir {
    pub family: String,
    pub path: PathBuf,
}

impl LibraryDir {
    pub fn new(family: impl Into<String>, path: PathBuf) -> Self {
        Self {
            family: family.into(),
            path,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct LibraryLocator {
    simlib: PathBuf,
    families: Vec<String>,
    source_file: String,
}

impl LibraryLocator {
    pub fn new(config: &LibraryConfig) -> Self {
        Self {
            simlib: config.root.join(&config.simlib_dir),
            families: config.families.clone(),
            source_file: config.source_file.clone(),
        }
    }

    pub fn simlib(&self) -> &Path {
        &self.simlib
    }

    /// The configured family directories, in configuration order. Existence
    /// is not checked here.
    pub fn candidates(&self) -> Vec<LibraryDir> {
        self.families
            .iter()
            .map(|family| LibraryDir::new(family.clone(), self.simlib.join(family)))
            .collect()
    }

    /// Every family directory under the simulation library that holds the
    /// source file, sorted by path.
    pub fn discover(&self) -> Result<Vec<LibraryDir>> {
        if !self.simlib.is_dir() {
            return Err(CellsXtraError::InvalidPath {
                path: format!("{} is not a directory", self.simlib.display()),
            });
        }

        let mut found = Vec::new();

        let walker = WalkDir::new(&self.simlib)
            .min_depth(2)
            .max_depth(2)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable library entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() || entry.file_name() != self.source_file.as_str() {
                continue;
            }

            if let Some(dir) = entry.path().parent() {
                let family = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                log::debug!("discovered library family {} at {}", family, dir.display());
                found.push(LibraryDir::new(family, dir.to_path_buf()));
            }
        }

        if found.is_empty() {
            return Err(CellsXtraError::InvalidPath {
                path: format!(
                    "no {} found under {}",
                    self.source_file,
                    self.simlib.display()
                ),
            });
        }

        Ok(found)
    }
}
