use crate::error::{CellsXtraError, Result};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

const COMMENT_MARKER: &str = "//";
const MODULE_PREFIX: &str = "module ";

/// A primitive module name found in the simulation library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellName {
    pub name: String,
    /// 1-based line of the declaration
    pub line_number: usize,
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Outcome of scanning one line of the library.
#[derive(Debug, PartialEq, Eq)]
pub enum LineMatch<'a> {
    /// Not a module declaration
    Skip,
    Cell(&'a str),
    /// Module declaration without a parameter list on the same line
    MissingParenthesis,
}

/// Classify a single line.
///
/// The line comment is dropped first, then the remaining text must start
/// with exactly `"module "`. The name runs up to the first `(` of the
/// comment-stripped text and is trimmed of surrounding whitespace.
pub fn scan_line(line: &str) -> LineMatch<'_> {
    let code = match line.find(COMMENT_MARKER) {
        Some(pos) => &line[..pos],
        None => line,
    };

    if !code.starts_with(MODULE_PREFIX) {
        return LineMatch::Skip;
    }

    match code.find('(') {
        Some(paren) => LineMatch::Cell(code[MODULE_PREFIX.len()..paren].trim()),
        None => LineMatch::MissingParenthesis,
    }
}

/// Lazily yields the cell names declared in one library file.
///
/// Consumes the underlying reader; a new extractor must be opened to
/// read the file again.
pub struct CellExtractor<R> {
    lines: Lines<R>,
    path: PathBuf,
    line_number: usize,
    finished: bool,
}

impl CellExtractor<BufReader<fs::File>> {
    /// Open `<directory>/<source_file>` for extraction.
    pub fn open<P: AsRef<Path>>(directory: P, source_file: &str) -> Result<Self> {
        let path = directory.as_ref().join(source_file);
        let file = fs::File::open(&path).map_err(|source| CellsXtraError::SourceNotFound {
            path: path.clone(),
            source,
        })?;

        log::debug!("reading cell declarations from {}", path.display());
        Ok(Self::from_reader(BufReader::new(file), path))
    }
}

impl<R: BufRead> CellExtractor<R> {
    pub fn from_reader(reader: R, path: PathBuf) -> Self {
        Self {
            lines: reader.lines(),
            path,
            line_number: 0,
            finished: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: BufRead> Iterator for CellExtractor<R> {
    type Item = Result<CellName>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for line in self.lines.by_ref() {
            self.line_number += 1;

            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    self.finished = true;
                    return Some(Err(CellsXtraError::ReadFailed {
                        path: self.path.clone(),
                        line_number: self.line_number,
                        source,
                    }));
                }
            };

            match scan_line(&line) {
                LineMatch::Skip => continue,
                LineMatch::Cell(name) => {
                    return Some(Ok(CellName {
                        name: name.to_string(),
                        line_number: self.line_number,
                    }));
                }
                LineMatch::MissingParenthesis => {
                    self.finished = true;
                    return Some(Err(CellsXtraError::MissingParenthesis {
                        path: self.path.clone(),
                        line_number: self.line_number,
                        line,
                    }));
                }
            }
        }

        self.finished = true;
        None
    }
}

/// Open the library file in `directory` and iterate its cell names.
pub fn extract<P: AsRef<Path>>(
    directory: P,
    source_file: &str,
) -> Result<CellExtractor<BufReader<fs::File>>> {
    CellExtractor::open(directory, source_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn names(input: &str) -> Vec<String> {
        CellExtractor::from_reader(Cursor::new(input), PathBuf::from("test.v"))
            .map(|cell| cell.unwrap().name)
            .collect()
    }

    #[test]
    fn test_non_module_lines_are_skipped() {
        assert_eq!(scan_line("wire x;"), LineMatch::Skip);
        assert_eq!(scan_line("endmodule"), LineMatch::Skip);
        assert_eq!(scan_line("  module INDENTED(a);"), LineMatch::Skip);
        assert_eq!(scan_line("modules FOO(a);"), LineMatch::Skip);
        assert_eq!(scan_line("module\tTAB(a);"), LineMatch::Skip);
        assert_eq!(scan_line(""), LineMatch::Skip);
    }

    #[test]
    fn test_simple_declaration() {
        assert_eq!(scan_line("module FOO (input A, output O);"), LineMatch::Cell("FOO"));
    }

    #[test]
    fn test_extra_spaces_are_trimmed() {
        assert_eq!(scan_line("module  BAR(a,b,c)"), LineMatch::Cell("BAR"));
    }

    #[test]
    fn test_commented_module_is_ignored() {
        assert_eq!(scan_line("// module FAKE("), LineMatch::Skip);
        assert_eq!(scan_line("wire y; // module FAKE(a);"), LineMatch::Skip);
    }

    #[test]
    fn test_block_comments_are_not_stripped() {
        assert_eq!(names("/*\nmodule HIDDEN(a);\n*/\n"), vec!["HIDDEN"]);
    }

    #[test]
    fn test_trailing_comment_after_parenthesis() {
        assert_eq!(scan_line("module BAZ( // comment"), LineMatch::Cell("BAZ"));
    }

    #[test]
    fn test_parenthesis_only_inside_comment() {
        assert_eq!(scan_line("module QUX // (a, b)"), LineMatch::MissingParenthesis);
    }

    #[test]
    fn test_missing_parenthesis_stops_extraction() {
        let mut extractor = CellExtractor::from_reader(
            Cursor::new("module A(x);\nmodule BROKEN\nmodule C(y);\n"),
            PathBuf::from("lib.v"),
        );

        assert_eq!(extractor.next().unwrap().unwrap().name, "A");
        match extractor.next() {
            Some(Err(CellsXtraError::MissingParenthesis { line_number, line, .. })) => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "module BROKEN");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(extractor.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_reports_location() {
        let mut input = b"module A(x);\nwire w;\n".to_vec();
        input.extend_from_slice(b"module \xff\xfe(y);\n");

        let mut extractor = CellExtractor::from_reader(Cursor::new(input), PathBuf::from("lib.v"));

        assert_eq!(extractor.next().unwrap().unwrap().name, "A");
        match extractor.next() {
            Some(Err(CellsXtraError::ReadFailed { path, line_number, .. })) => {
                assert_eq!(path, PathBuf::from("lib.v"));
                assert_eq!(line_number, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(extractor.next().is_none());
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let input = "// header comment\n\
                     module AND2(input A, input B, output O);\n\
                     module OR2 (input A, input B, output O);\n\
                     wire x;\n\
                     module AND2(input A, input B, output O);\n";
        assert_eq!(names(input), vec!["AND2", "OR2", "AND2"]);
    }

    #[test]
    fn test_line_numbers() {
        let cells: Vec<CellName> = CellExtractor::from_reader(
            Cursor::new("wire a;\n\nmodule DFF (D, CLK, Q);\n"),
            PathBuf::from("lib.v"),
        )
        .collect::<Result<_>>()
        .unwrap();

        assert_eq!(
            cells,
            vec![CellName {
                name: "DFF".to_string(),
                line_number: 3
            }]
        );
        assert_eq!(cells[0].to_string(), "DFF");
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(names("module LUT4 (F, I0);\r\nwire x;\r\n"), vec!["LUT4"]);
    }

    #[test]
    fn test_open_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("prim_sim.v"),
            "module GSR (GSRI);\nendmodule\n",
        )
        .unwrap();

        let extractor = extract(temp_dir.path(), "prim_sim.v").unwrap();
        assert_eq!(extractor.path(), temp_dir.path().join("prim_sim.v"));

        let cells: Vec<String> = extractor.map(|c| c.unwrap().name).collect();
        assert_eq!(cells, vec!["GSR"]);
    }

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = extract(temp_dir.path(), "prim_sim.v");
        assert!(matches!(result, Err(CellsXtraError::SourceNotFound { .. })));
    }
}
