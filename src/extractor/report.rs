use crate::extractor::CellName;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryResult {
    pub family: String,
    pub path: PathBuf,
    pub cells: Vec<CellName>,
    pub error: Option<String>,
}

impl DirectoryResult {
    pub fn new(family: impl Into<String>, path: PathBuf) -> Self {
        Self {
            family: family.into(),
            path,
            cells: Vec::new(),
            error: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub root: PathBuf,
    pub output: PathBuf,
    pub directories: Vec<DirectoryResult>,
    pub extraction_time: DateTime<Utc>,
}

impl ExtractionReport {
    pub fn new(root: PathBuf, output: PathBuf) -> Self {
        Self {
            root,
            output,
            directories: Vec::new(),
            extraction_time: Utc::now(),
        }
    }

    pub fn total_cells(&self) -> usize {
        self.directories.iter().map(|d| d.cells.len()).sum()
    }

    pub fn failed_directories(&self) -> usize {
        self.directories.iter().filter(|d| !d.is_ok()).count()
    }

    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Extraction Results:\n  Root: {}\n  Output: {}\n  Total cells: {}\n",
            self.root.display(),
            self.output.display(),
            self.total_cells()
        );

        for dir in &self.directories {
            match dir.error {
                Some(ref error) => {
                    summary.push_str(&format!("    {}: failed ({})\n", dir.family, error))
                }
                None => summary.push_str(&format!("    {}: {} cells\n", dir.family, dir.cells.len())),
            }
        }

        summary
    }
}
