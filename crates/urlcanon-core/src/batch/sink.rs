//! Output sinks for canonical URLs.

use std::io::{self, BufWriter, Write};

/// Accepts canonical URLs one at a time, in input order.
pub trait OutputSink {
    fn emit(&mut self, canonical: &str) -> io::Result<()>;

    /// Flushes anything buffered. Called once at the end of a run.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes each URL on its own line.
pub struct LineSink<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> OutputSink for LineSink<W> {
    fn emit(&mut self, canonical: &str) -> io::Result<()> {
        self.out.write_all(canonical.as_bytes())?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Collects URLs in memory.
impl OutputSink for Vec<String> {
    fn emit(&mut self, canonical: &str) -> io::Result<()> {
        self.push(canonical.to_string());
        Ok(())
    }
}
