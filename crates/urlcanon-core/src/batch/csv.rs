//! CSV record reader: header row, RFC 4180 quoting.

use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};

use super::error::RecordError;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Yields the value of one named column for every data row.
///
/// Quoted fields may contain commas, doubled quotes and line breaks. Blank
/// lines are skipped and not counted as records. Only the URL column has to
/// be valid UTF-8; a bad byte there fails that record alone.
pub struct CsvRecords<R> {
    reader: csv::Reader<R>,
    field: String,
    /// `None` until the header is read; then the column index, if present.
    column: Option<Option<usize>>,
    row: ByteRecord,
    record: u64,
    done: bool,
}

impl<R: Read> CsvRecords<R> {
    pub fn new(reader: R, field: impl Into<String>) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        Self {
            reader,
            field: field.into(),
            column: None,
            row: ByteRecord::new(),
            record: 0,
            done: false,
        }
    }

    fn header_column(&mut self) -> Result<Option<usize>, RecordError> {
        let field = self.field.as_bytes();
        let headers = self.reader.byte_headers().map_err(|e| record_error(0, e))?;
        let column = headers
            .iter()
            .position(|name| name.strip_prefix(UTF8_BOM).unwrap_or(name) == field);
        if column.is_none() {
            tracing::debug!(field = %self.field, "CSV header has no URL column");
        }
        Ok(column)
    }
}

impl<R: Read> Iterator for CsvRecords<R> {
    type Item = Result<String, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let column = match self.column {
            Some(column) => column,
            None => match self.header_column() {
                Ok(column) => {
                    self.column = Some(column);
                    column
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            },
        };

        match self.reader.read_byte_record(&mut self.row) {
            Ok(true) => {}
            Ok(false) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(record_error(self.record + 1, e)));
            }
        }
        self.record += 1;

        let Some(value) = column.and_then(|i| self.row.get(i)) else {
            return Some(Err(RecordError::MissingField {
                record: self.record,
                field: self.field.clone(),
            }));
        };
        Some(
            std::str::from_utf8(value)
                .map(str::to_string)
                .map_err(|e| RecordError::Malformed {
                    record: self.record,
                    reason: format!("invalid UTF-8 in field {:?}: {e}", self.field),
                }),
        )
    }
}

/// Stream failures stay `Io`; anything else the reader rejects is malformed input.
fn record_error(record: u64, err: csv::Error) -> RecordError {
    if !err.is_io_error() {
        return RecordError::Malformed {
            record,
            reason: err.to_string(),
        };
    }
    match err.into_kind() {
        csv::ErrorKind::Io(e) => RecordError::Io(e),
        _ => RecordError::Malformed {
            record,
            reason: "unreadable CSV".to_string(),
        },
    }
}
