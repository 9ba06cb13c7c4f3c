//! Record sources: turn an input stream into a sequence of raw URLs.

use std::io::{self, BufRead};

use super::csv::CsvRecords;
use super::error::RecordError;
use crate::config::InputFormat;

/// A boxed record source, as returned by [`open_source`].
pub type RecordSource<'a> = Box<dyn Iterator<Item = Result<String, RecordError>> + Send + 'a>;

/// Builds the record source for `format`, reading URLs from `field`.
/// `field` is ignored for [`InputFormat::Lines`].
pub fn open_source<'a, R>(format: InputFormat, field: &str, reader: R) -> RecordSource<'a>
where
    R: BufRead + Send + 'a,
{
    match format {
        InputFormat::Csv => Box::new(CsvRecords::new(reader, field)),
        InputFormat::Ndjson => Box::new(NdjsonRecords::new(reader, field)),
        InputFormat::Lines => Box::new(LineRecords::new(reader)),
    }
}

/// Splits input on `\n` without decoding, so a bad byte fails one line
/// instead of the stream. A trailing `\r` is dropped.
struct ByteLines<R> {
    reader: R,
}

impl<R: BufRead> Iterator for ByteLines<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                Some(Ok(buf))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

fn invalid_utf8(record: u64, err: std::string::FromUtf8Error) -> RecordError {
    RecordError::Malformed {
        record,
        reason: format!("invalid UTF-8: {}", err.utf8_error()),
    }
}

/// One JSON object per line; the URL is the string value under `field`.
pub struct NdjsonRecords<R> {
    lines: ByteLines<R>,
    field: String,
    record: u64,
}

impl<R: BufRead> NdjsonRecords<R> {
    pub fn new(reader: R, field: impl Into<String>) -> Self {
        Self {
            lines: ByteLines { reader },
            field: field.into(),
            record: 0,
        }
    }
}

impl<R: BufRead> Iterator for NdjsonRecords<R> {
    type Item = Result<String, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(bytes) => String::from_utf8(bytes),
                Err(e) => return Some(Err(e.into())),
            };
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    self.record += 1;
                    return Some(Err(invalid_utf8(self.record, e)));
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            self.record += 1;
            let value: serde_json::Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    return Some(Err(RecordError::Malformed {
                        record: self.record,
                        reason: format!("invalid JSON: {e}"),
                    }))
                }
            };
            return Some(
                value
                    .get(&self.field)
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .ok_or_else(|| RecordError::MissingField {
                        record: self.record,
                        field: self.field.clone(),
                    }),
            );
        }
    }
}

/// Every non-blank line is a URL.
pub struct LineRecords<R> {
    lines: ByteLines<R>,
    record: u64,
}

impl<R: BufRead> LineRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: ByteLines { reader },
            record: 0,
        }
    }
}

impl<R: BufRead> Iterator for LineRecords<R> {
    type Item = Result<String, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bytes = match self.lines.next()? {
                Ok(bytes) => bytes,
                Err(e) => return Some(Err(e.into())),
            };
            match String::from_utf8(bytes) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    self.record += 1;
                    return Some(Ok(line.trim().to_string()));
                }
                Err(e) => {
                    self.record += 1;
                    return Some(Err(invalid_utf8(self.record, e)));
                }
            }
        }
    }
}
