pub mod cell_extractor;
pub mod output_writer;
pub mod report;

pub use cell_extractor::{extract, scan_line, CellExtractor, CellName, LineMatch};
pub use output_writer::OutputFile;
pub use report::{DirectoryResult, ExtractionReport};
