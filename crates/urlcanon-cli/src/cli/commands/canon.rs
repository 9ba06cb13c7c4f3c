//! `urlcanon canon <url>...` – canonicalize URLs given on the command line.

use anyhow::Result;
use std::io::{self, Write};
use urlcanon_core::canonicalize_url;

/// Prints one canonical URL per argument; failures go to stderr.
/// Returns exit code 1 if any URL failed to parse.
pub fn run_canon(urls: &[String]) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let failed = write_canonical(urls, &mut out)?;
    out.flush()?;
    Ok(if failed > 0 { 1 } else { 0 })
}

pub(crate) fn write_canonical(urls: &[String], out: &mut impl Write) -> Result<usize> {
    let mut failed = 0;
    for url in urls {
        match canonicalize_url(url) {
            Ok(canonical) => writeln!(out, "{canonical}")?,
            Err(e) => {
                failed += 1;
                tracing::warn!(url = %url, "cannot canonicalize: {}", e);
                eprintln!("{url}: {e}");
            }
        }
    }
    Ok(failed)
}
