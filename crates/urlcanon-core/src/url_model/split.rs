//! Splitting a raw URL into its five components and joining them back.
//!
//! Splitting follows the generic `scheme://authority/path?query#fragment`
//! grammar without validating any component beyond bracketed hosts. Nothing
//! is lowercased or resolved: what goes in is what the rules see.

use std::net::{Ipv4Addr, Ipv6Addr};

use super::error::ParseError;

/// Characters allowed in a scheme after its leading ASCII letter.
const SCHEME_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789+-.";

/// Raw (still encoded) components of a split URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Components {
    pub scheme: String,
    pub authority: String,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

/// Splits `raw` into scheme, authority, path, query and fragment.
///
/// Leading control characters and spaces are dropped and embedded tab, CR
/// and LF characters are removed before splitting.
pub fn split_url(raw: &str) -> Result<Components, ParseError> {
    let cleaned: String = raw
        .trim_start_matches(|c: char| c <= '\u{20}')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();
    let mut rest = cleaned.as_str();
    let mut parts = Components::default();

    if let Some(i) = rest.find(':') {
        let prefix = &rest[..i];
        if i > 0
            && prefix.starts_with(|c: char| c.is_ascii_alphabetic())
            && prefix.chars().all(|c| SCHEME_CHARS.contains(c))
        {
            parts.scheme = prefix.to_ascii_lowercase();
            rest = &rest[i + 1..];
        }
    }

    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        let authority = &after[..end];
        check_authority(authority)?;
        parts.authority = authority.to_string();
        rest = &after[end..];
    }

    if let Some((before, fragment)) = rest.split_once('#') {
        parts.fragment = fragment.to_string();
        rest = before;
    }

    if let Some((before, query)) = rest.split_once('?') {
        parts.query = query.to_string();
        rest = before;
    }

    parts.path = rest.to_string();
    Ok(parts)
}

/// Joins a scheme-relative URL from authority, path and an encoded query.
pub fn join_url(authority: &str, path: &str, query: &str) -> String {
    let mut out = String::with_capacity(authority.len() + path.len() + query.len() + 4);
    if !authority.is_empty() {
        out.push_str("//");
        out.push_str(authority);
        if !path.is_empty() && !path.starts_with('/') {
            out.push('/');
        }
    } else if path.starts_with("//") {
        out.push_str("//");
    }
    out.push_str(path);
    if !query.is_empty() {
        out.push('?');
        out.push_str(query);
    }
    out
}

fn check_authority(authority: &str) -> Result<(), ParseError> {
    let open = authority.contains('[');
    let close = authority.contains(']');
    if open != close {
        return Err(ParseError::UnbalancedBrackets {
            authority: authority.to_string(),
        });
    }
    if open {
        let inner = authority
            .split_once('[')
            .map(|(_, after)| after.split_once(']').map_or(after, |(host, _)| host))
            .unwrap_or_default();
        check_bracketed_host(inner)?;
    }
    Ok(())
}

fn check_bracketed_host(host: &str) -> Result<(), ParseError> {
    let invalid = |reason| ParseError::InvalidBracketedHost {
        host: host.to_string(),
        reason,
    };

    if let Some(future) = host.strip_prefix('v') {
        let (version, address) = future
            .split_once('.')
            .ok_or_else(|| invalid("IPvFuture address is invalid"))?;
        if version.is_empty() || !version.chars().all(|c| c.is_ascii_hexdigit()) || address.is_empty() {
            return Err(invalid("IPvFuture address is invalid"));
        }
        return Ok(());
    }

    if host.parse::<Ipv4Addr>().is_ok() {
        return Err(invalid("an IPv4 address cannot be in brackets"));
    }

    let address = match host.split_once('%') {
        Some((address, zone)) => {
            if zone.is_empty() || zone.contains('%') {
                return Err(invalid("invalid IPv6 zone identifier"));
            }
            address
        }
        None => host,
    };
    address
        .parse::<Ipv6Addr>()
        .map(|_| ())
        .map_err(|_| invalid("not a valid IPv6 address"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(raw: &str) -> Components {
        split_url(raw).unwrap()
    }

    #[test]
    fn splits_all_five_components() {
        let c = split("HTTPS://user@Example.com:8443/a/b?x=1&y=2#frag");
        assert_eq!(c.scheme, "https");
        assert_eq!(c.authority, "user@Example.com:8443");
        assert_eq!(c.path, "/a/b");
        assert_eq!(c.query, "x=1&y=2");
        assert_eq!(c.fragment, "frag");
    }

    #[test]
    fn no_authority_without_double_slash() {
        let c = split("example.com/x?q");
        assert_eq!(c.scheme, "");
        assert_eq!(c.authority, "");
        assert_eq!(c.path, "example.com/x");
        assert_eq!(c.query, "q");
    }

    #[test]
    fn scheme_must_start_with_letter() {
        let c = split("1http://x");
        assert_eq!(c.scheme, "");
        assert_eq!(c.path, "1http://x");

        let c = split("mailto:someone@example.com");
        assert_eq!(c.scheme, "mailto");
        assert_eq!(c.path, "someone@example.com");
    }

    #[test]
    fn question_mark_inside_fragment_stays_in_fragment() {
        let c = split("//h/p#frag?notquery");
        assert_eq!(c.path, "/p");
        assert_eq!(c.query, "");
        assert_eq!(c.fragment, "frag?notquery");
    }

    #[test]
    fn strips_leading_controls_and_embedded_newlines() {
        let c = split("  \thttps://exa\nmple.com/p\r\n");
        assert_eq!(c.authority, "example.com");
        assert_eq!(c.path, "/p");
    }

    #[test]
    fn authority_ends_at_query_or_fragment() {
        assert_eq!(split("https://h?x=1").authority, "h");
        assert_eq!(split("https://h?x=1").path, "");
        assert_eq!(split("https://h#f").authority, "h");
    }

    #[test]
    fn ipv6_literals() {
        assert_eq!(split("http://[::1]:8080/").authority, "[::1]:8080");
        assert_eq!(split("http://[fe80::1%25eth0]/").authority, "[fe80::1%25eth0]");
        assert_eq!(split("http://[v1.fe]/").authority, "[v1.fe]");
    }

    #[test]
    fn rejects_unbalanced_brackets() {
        assert!(matches!(
            split_url("http://[::1/"),
            Err(ParseError::UnbalancedBrackets { .. })
        ));
        assert!(matches!(
            split_url("http://::1]/"),
            Err(ParseError::UnbalancedBrackets { .. })
        ));
    }

    #[test]
    fn rejects_bad_bracketed_hosts() {
        for raw in ["http://[127.0.0.1]/", "http://[not-an-ip]/", "http://[v.x]/", "http://[fe80::1%]/"] {
            assert!(
                matches!(split_url(raw), Err(ParseError::InvalidBracketedHost { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn brackets_outside_authority_are_not_checked() {
        let c = split("https://h/p[1]?a=[");
        assert_eq!(c.path, "/p[1]");
        assert_eq!(c.query, "a=[");
    }

    #[test]
    fn join_prefixes_authority_and_slash() {
        assert_eq!(join_url("h", "/p", "x=1"), "//h/p?x=1");
        assert_eq!(join_url("h", "p", ""), "//h/p");
        assert_eq!(join_url("h", "", ""), "//h");
        assert_eq!(join_url("", "rel/path", "q=1"), "rel/path?q=1");
        assert_eq!(join_url("", "//odd", ""), "////odd");
    }
}
