//! Error returned when a raw URL cannot be split into components.

use thiserror::Error;

/// The input could not be decomposed into scheme, authority, path, query
/// and fragment.
///
/// Only authority-level problems are fatal; query strings and paths are
/// accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Authority has a `[` without a matching `]` (or the reverse).
    #[error("invalid IPv6 URL: unbalanced brackets in authority {authority:?}")]
    UnbalancedBrackets { authority: String },
    /// Bracketed host is not an IPv6 or IPvFuture literal.
    #[error("invalid bracketed host {host:?}: {reason}")]
    InvalidBracketedHost { host: String, reason: &'static str },
}
