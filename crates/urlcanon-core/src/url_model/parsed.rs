//! Decomposed URL that the canonicalization rules operate on.

use std::fmt;

use super::error::ParseError;
use super::query::QueryMap;
use super::rules::{RuleTrace, RULES};
use super::split::{join_url, split_url};

/// A URL split into components, with scheme and fragment already erased.
///
/// The query is kept only in parsed form; the query string is derived when
/// the URL is serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    pub authority: String,
    pub path: String,
    pub query: QueryMap,
}

impl ParsedUrl {
    /// Splits `raw` and drops its scheme and fragment.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let parts = split_url(raw)?;
        Ok(Self {
            authority: parts.authority,
            path: parts.path,
            query: QueryMap::parse(&parts.query),
        })
    }

    /// Always empty; canonical output is scheme-relative.
    pub fn scheme(&self) -> &str {
        ""
    }

    /// Always empty; fragments never survive parsing.
    pub fn fragment(&self) -> &str {
        ""
    }

    /// Applies every canonicalization rule once, in table order.
    pub fn canonicalize(mut self) -> Self {
        for rule in RULES {
            if rule.apply(&mut self) {
                tracing::trace!(step = rule.name(), "rule applied");
            }
        }
        self
    }

    /// Same as [`canonicalize`](Self::canonicalize), also recording the URL
    /// after every step.
    pub fn canonicalize_traced(mut self) -> (Self, Vec<RuleTrace>) {
        let mut trace = Vec::with_capacity(RULES.len());
        for rule in RULES {
            let fired = rule.apply(&mut self);
            trace.push(RuleTrace {
                step: rule.name(),
                fired,
                after: self.serialize(),
            });
        }
        (self, trace)
    }

    /// Re-encodes the query and joins the components into a
    /// scheme-relative string such as `//example.com/path?x=1`.
    pub fn serialize(&self) -> String {
        join_url(&self.authority, &self.path, &self.query.encode())
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
