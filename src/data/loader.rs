use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Terminator};
use log::debug;

use super::model::{Cell, Record, RecordSet};
use crate::error::{ProcessError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a gene pool's `fitness.csv` into memory and parse it.
///
/// The whole file is read before parsing starts. A missing or unreadable
/// file is an [`ProcessError::Io`]; malformed fields are not errors, see
/// [`Cell::parse_lenient`].
pub fn load_file(path: &Path) -> Result<RecordSet> {
    let text = std::fs::read_to_string(path).map_err(|e| ProcessError::io(path, e))?;
    let records = parse_records(&text)?;
    debug!("parsed {} records from {}", records.len(), path.display());
    Ok(records)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Layout: no header, rows split on `\n`, fields on `,`, no quoting.
/// Blank lines produce no record. Rows may have any number of fields.
pub fn parse_records(text: &str) -> Result<RecordSet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut lines = LineCounter::new(text);
    for result in reader.records() {
        let row = result?;
        if is_blank(&row) {
            continue;
        }
        // The reader's own line number does not count skipped empty lines.
        let byte = row.position().map_or(text.len(), |p| p.byte() as usize);
        let line = lines.line_of_record_at(byte);
        let cells = row.iter().map(Cell::parse_lenient).collect();
        records.push(Record::new(line, cells));
    }

    Ok(RecordSet::from_records(records))
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|field| field.trim().is_empty()) && row.len() <= 1
}

/// Maps increasing record offsets to 1-based line numbers in one pass.
struct LineCounter<'a> {
    text: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str) -> Self {
        LineCounter {
            text: text.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    /// `byte` may point at empty lines the reader skipped before the
    /// record; those are stepped over first.
    fn line_of_record_at(&mut self, byte: usize) -> usize {
        let mut byte = byte.min(self.text.len());
        while self.text.get(byte) == Some(&b'\n') {
            byte += 1;
        }
        if byte > self.offset {
            self.line += self.text[self.offset..byte]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.offset = byte;
        }
        self.line
    }
}
