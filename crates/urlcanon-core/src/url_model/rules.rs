//! The fixed canonicalization rule table.
//!
//! Rules run exactly once each, top to bottom. Several of them read state
//! written by an earlier one (the YouTube rules depend on the rewritten
//! host, parameter stripping depends on the `.html` wipe), so the table
//! order is part of the output format. Any twin implementation must apply
//! the same table with the same literals.

use super::parsed::ParsedUrl;

/// Query parameters that never identify a page.
pub const TRACKING_PARAMS: &[&str] = &["ref", "sms_ss", "gclid", "fbclid", "at_xt", "_r"];

/// Any query parameter starting with one of these is dropped.
pub const TRACKING_PREFIXES: &[&str] = &["utm_"];

/// Index files trimmed from the end of a path; only the first match is removed.
///
/// Twin implementations that check each suffix independently differ on one
/// shape only: `/a/index.phpindex.html` becomes `/a/index.php` here and `/a`
/// there.
pub const INDEX_FILES: &[&str] = &["index.html", "index.php"];

/// The rule table, in application order.
pub const RULES: &[Rule] = &[
    Rule::new(
        "html-query-wipe",
        RuleKind::ClearQueryForPathSuffix { suffix: ".html" },
    ),
    Rule::new(
        "tracking-params",
        RuleKind::DropParams {
            names: TRACKING_PARAMS,
            prefixes: TRACKING_PREFIXES,
        },
    ),
    Rule::new(
        "index-and-trailing-slash",
        RuleKind::TrimIndexFile {
            index_files: INDEX_FILES,
        },
    ),
    Rule::new("www-prefix", RuleKind::StripHostPrefix { prefix: "www." }),
    Rule::new(
        "youtu.be-expand",
        RuleKind::ExpandShortLink {
            host: "youtu.be",
            target_host: "youtube.com",
            param: "v",
            target_path: "/watch",
        },
    ),
    Rule::new(
        "youtube-keep-video",
        RuleKind::KeepOnlyParam {
            host: "youtube.com",
            param: "v",
        },
    ),
    Rule::new(
        "youtube-keep-list",
        RuleKind::KeepOnlyParam {
            host: "youtube.com",
            param: "list",
        },
    ),
    Rule::new(
        "amazon-query-wipe",
        RuleKind::ClearQueryForHost { host: "amazon.com" },
    ),
    Rule::new(
        "wikipedia-mobile-host",
        RuleKind::RewriteHost {
            from: "en.m.wikipedia.org",
            to: "en.wikipedia.org",
        },
    ),
];

/// What a single rule matches on and how it rewrites the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Empty the query when the path ends with `suffix`.
    ClearQueryForPathSuffix { suffix: &'static str },
    /// Remove every parameter named in `names` or starting with one of `prefixes`.
    DropParams {
        names: &'static [&'static str],
        prefixes: &'static [&'static str],
    },
    /// Remove the first index file found at the end of the path, then all
    /// trailing slashes unless the path is exactly `/`.
    TrimIndexFile { index_files: &'static [&'static str] },
    /// Remove `prefix` from the start of the authority.
    StripHostPrefix { prefix: &'static str },
    /// Turn `host/<id>` into `target_host<target_path>?param=<id>`, where
    /// `<id>` is the path with surrounding slashes removed.
    ExpandShortLink {
        host: &'static str,
        target_host: &'static str,
        param: &'static str,
        target_path: &'static str,
    },
    /// On `host`, reduce the query to `param` (with all its values) if present.
    KeepOnlyParam {
        host: &'static str,
        param: &'static str,
    },
    /// Empty the query whenever the authority equals `host`.
    ClearQueryForHost { host: &'static str },
    /// Replace the authority `from` with `to`.
    RewriteHost {
        from: &'static str,
        to: &'static str,
    },
}

/// A named entry of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    name: &'static str,
    kind: RuleKind,
}

/// Outcome of one rule during a traced canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTrace {
    pub step: &'static str,
    /// Whether the rule changed the URL.
    pub fired: bool,
    /// Serialized URL after the step.
    pub after: String,
}

impl Rule {
    pub const fn new(name: &'static str, kind: RuleKind) -> Self {
        Self { name, kind }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Applies the rule in place and reports whether anything changed.
    pub fn apply(&self, url: &mut ParsedUrl) -> bool {
        match self.kind {
            RuleKind::ClearQueryForPathSuffix { suffix } => {
                url.path.ends_with(suffix) && clear_query(url)
            }
            RuleKind::DropParams { names, prefixes } => {
                let before = url.query.len();
                url.query.retain(|name| {
                    !names.contains(&name) && !prefixes.iter().any(|p| name.starts_with(p))
                });
                url.query.len() != before
            }
            RuleKind::TrimIndexFile { index_files } => {
                let before = url.path.len();
                if let Some(index) = index_files.iter().find(|f| url.path.ends_with(*f)) {
                    url.path.truncate(url.path.len() - index.len());
                }
                if url.path != "/" {
                    let trimmed = url.path.trim_end_matches('/').len();
                    url.path.truncate(trimmed);
                }
                url.path.len() != before
            }
            RuleKind::StripHostPrefix { prefix } => match url.authority.strip_prefix(prefix) {
                Some(rest) => {
                    url.authority = rest.to_string();
                    true
                }
                None => false,
            },
            RuleKind::ExpandShortLink {
                host,
                target_host,
                param,
                target_path,
            } => {
                if url.authority != host {
                    return false;
                }
                url.authority = target_host.to_string();
                let id = url.path.trim_matches('/').to_string();
                url.query.set(param, id);
                url.path = target_path.to_string();
                true
            }
            RuleKind::KeepOnlyParam { host, param } => {
                if url.authority != host || !url.query.contains_key(param) {
                    return false;
                }
                let before = url.query.len();
                url.query.keep_only(param);
                before > 1
            }
            RuleKind::ClearQueryForHost { host } => url.authority == host && clear_query(url),
            RuleKind::RewriteHost { from, to } => {
                if url.authority != from {
                    return false;
                }
                url.authority = to.to_string();
                true
            }
        }
    }
}

fn clear_query(url: &mut ParsedUrl) -> bool {
    let had_params = !url.query.is_empty();
    url.query.clear();
    had_params
}
