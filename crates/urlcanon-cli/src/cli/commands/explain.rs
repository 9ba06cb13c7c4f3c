//! `urlcanon explain <url>` – show how a URL is canonicalized step by step.

use anyhow::Result;
use std::io::{self, Write};
use urlcanon_core::url_model::{split_url, ParsedUrl};

/// Prints the split components and the URL after every rule.
/// Returns exit code 1 if the URL cannot be parsed.
pub fn run_explain(url: &str) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = write_explanation(url, &mut out)?;
    out.flush()?;
    Ok(code)
}

pub(crate) fn write_explanation(url: &str, out: &mut impl Write) -> Result<i32> {
    let parts = match split_url(url) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("{url}: {e}");
            return Ok(1);
        }
    };
    writeln!(out, "scheme:    {:?} (dropped)", parts.scheme)?;
    writeln!(out, "authority: {:?}", parts.authority)?;
    writeln!(out, "path:      {:?}", parts.path)?;
    writeln!(out, "query:     {:?}", parts.query)?;
    writeln!(out, "fragment:  {:?} (dropped)", parts.fragment)?;

    let parsed = ParsedUrl::parse(url)?;
    writeln!(out, "start      {}", parsed)?;
    let (canonical, trace) = parsed.canonicalize_traced();
    for step in &trace {
        let mark = if step.fired { '*' } else { ' ' };
        writeln!(out, "{mark} {:<26} {}", step.step, step.after)?;
    }
    writeln!(out, "canonical  {}", canonical)?;
    Ok(0)
}
