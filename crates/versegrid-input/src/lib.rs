//! Input parsing for versegrid corpora
//!
//! The first stage of the pipeline. A corpus holds one record per line,
//! `surah|ayah|text`; only the text field survives. Lines with any other
//! shape are dropped without complaint, so a stray header or blank line
//! never stops a run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use versegrid_core::{
    error::{InputError, Result},
    traits::TextSource,
};

const BOM: char = '\u{feff}';

/// Record layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub delimiter: char,
    /// A line is a record only when it splits into exactly this many fields
    pub field_count: usize,
    /// Zero-based index of the field to keep
    pub text_field: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: '|',
            field_count: 3,
            text_field: 2,
        }
    }
}

/// Extract the text field from one line, or `None` if the line is not a record
///
/// Surrounding whitespace (including a trailing `\r`) is ignored.
pub fn parse_line(line: &str, options: &ParseOptions) -> Option<String> {
    let fields: Vec<&str> = line.trim().split(options.delimiter).collect();
    if fields.len() != options.field_count {
        return None;
    }
    fields.get(options.text_field).map(|field| (*field).to_string())
}

/// Reads verses from a corpus file
#[derive(Debug, Clone, Default)]
pub struct VerseReader {
    options: ParseOptions,
}

impl VerseReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse corpus text already in memory
    pub fn parse_str(&self, content: &str) -> Vec<String> {
        let mut tally = Tally::default();
        let verses: Vec<String> = content
            .lines()
            .enumerate()
            .filter_map(|(index, line)| tally.keep(self.parse_numbered(index, line)))
            .collect();
        tally.report("<memory>");
        verses
    }

    /// Read and parse a corpus file
    ///
    /// The file is read as UTF-8, one line at a time, and closed before
    /// returning on every path.
    pub fn read_path(&self, path: &Path) -> Result<Vec<String>> {
        let file = File::open(path).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut tally = Tally::default();
        let mut verses = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| {
                if source.kind() == std::io::ErrorKind::InvalidData {
                    InputError::InvalidEncoding {
                        path: path.to_path_buf(),
                        line: index + 1,
                    }
                } else {
                    InputError::Unreadable {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            })?;
            if let Some(verse) = tally.keep(self.parse_numbered(index, &line)) {
                verses.push(verse);
            }
        }

        tally.report(&path.display().to_string());
        Ok(verses)
    }

    fn parse_numbered(&self, index: usize, line: &str) -> Option<String> {
        let line = if index == 0 {
            line.strip_prefix(BOM).unwrap_or(line)
        } else {
            line
        };
        parse_line(line, &self.options)
    }
}

impl TextSource for VerseReader {
    fn name(&self) -> &'static str {
        "verse-reader"
    }

    fn read_verses(&self, path: &Path) -> Result<Vec<String>> {
        self.read_path(path)
    }
}

/// Counts kept and skipped lines for the debug log
#[derive(Default)]
struct Tally {
    kept: usize,
    skipped: usize,
}

impl Tally {
    fn keep(&mut self, verse: Option<String>) -> Option<String> {
        match verse {
            Some(_) => self.kept += 1,
            None => self.skipped += 1,
        }
        verse
    }

    fn report(&self, origin: &str) {
        log::debug!(
            "{origin}: kept {} verses, skipped {} lines",
            self.kept,
            self.skipped
        );
    }
}
