use crate::error::{CellsXtraError, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The generated cell file. Truncated on creation and held open for the
/// whole run; the handle is released when this value is dropped.
pub struct OutputFile {
    path: PathBuf,
    writer: BufWriter<fs::File>,
}

impl OutputFile {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if path.is_dir() {
            return Err(CellsXtraError::InvalidPath {
                path: format!("{} is a directory", path.display()),
            });
        }

        let file = fs::File::create(&path)?;
        log::debug!("created output file {}", path.display());

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Write the generated-by comment followed by a blank line.
    pub fn write_header(&mut self, header: &str) -> Result<()> {
        writeln!(self.writer, "// {}", header)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
