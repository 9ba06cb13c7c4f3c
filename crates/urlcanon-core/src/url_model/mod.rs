//! URL modeling and canonicalization.
//!
//! Splits a URL into components, runs the fixed rule table over them and
//! serializes the result as a scheme-relative string. Equivalent inputs
//! (tracking parameters, `www.`, index files, trailing slashes, short links)
//! reduce to the same canonical string.

mod error;
mod parsed;
mod query;
mod rules;
mod split;

pub use error::ParseError;
pub use parsed::ParsedUrl;
pub use query::QueryMap;
pub use rules::{Rule, RuleKind, RuleTrace, INDEX_FILES, RULES, TRACKING_PARAMS, TRACKING_PREFIXES};
pub use split::{join_url, split_url, Components};

/// Splits `raw` into a [`ParsedUrl`] with scheme and fragment erased.
pub fn parse(raw: &str) -> Result<ParsedUrl, ParseError> {
    ParsedUrl::parse(raw)
}

/// Runs the rule table over `url`.
pub fn canonicalize(url: ParsedUrl) -> ParsedUrl {
    url.canonicalize()
}

/// Serializes `url` as a scheme-relative string.
pub fn serialize(url: &ParsedUrl) -> String {
    url.serialize()
}

/// Parses, canonicalizes and serializes in one step.
///
/// # Examples
///
/// - `canonicalize_url("https://www.example.com/a/?utm_source=x")` → `"//example.com/a"`
/// - `canonicalize_url("https://youtu.be/abc123?t=42")` → `"//youtube.com/watch?v=abc123"`
pub fn canonicalize_url(raw: &str) -> Result<String, ParseError> {
    Ok(parse(raw)?.canonicalize().serialize())
}
