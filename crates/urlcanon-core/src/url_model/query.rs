//! Ordered multi-valued query mapping.

use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

/// Bytes left unescaped in query names and values (besides alphanumerics).
/// Space is handled separately and becomes `+`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Query parameters keyed by decoded name, in order of first appearance.
///
/// Names are unique; each name holds one or more values in the order they
/// were recorded. Equality is order-sensitive, like the encoded form.
#[derive(Debug, Clone, Default)]
pub struct QueryMap {
    entries: IndexMap<String, Vec<String>>,
}

impl PartialEq for QueryMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for QueryMap {}

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string. Never fails: empty segments are skipped,
    /// a segment without `=` is a name with an empty value, and bad
    /// percent-escapes are kept literally.
    pub fn parse(raw: &str) -> Self {
        let mut map = Self::new();
        for (name, value) in form_urlencoded::parse(raw.as_bytes()) {
            map.append(name.into_owned(), value.into_owned());
        }
        map
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Adds `value` under `name`, creating the key at the end if needed.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(name.into()).or_default().push(value.into());
    }

    /// Replaces every value of `name` with the single `value`. An existing
    /// key keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), vec![value.into()]);
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.entries.shift_remove(name)
    }

    /// Keeps only the keys for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|name, _| keep(name));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Reduces the mapping to the single key `name` with all its values.
    /// Returns false (and leaves the mapping alone) when `name` is absent.
    pub fn keep_only(&mut self, name: &str) -> bool {
        match self.entries.shift_remove(name) {
            Some(values) => {
                self.entries.clear();
                self.entries.insert(name.to_string(), values);
                true
            }
            None => false,
        }
    }

    /// Iterates `(name, value)` pairs, expanding multi-valued keys in
    /// recorded order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.as_str(), v.as_str())))
    }

    /// Encodes the mapping as `name=value` pairs joined with `&`.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.pairs() {
            if !out.is_empty() {
                out.push('&');
            }
            push_encoded(&mut out, name);
            out.push('=');
            push_encoded(&mut out, value);
        }
        out
    }
}

fn push_encoded(out: &mut String, text: &str) {
    for (i, word) in text.split(' ').enumerate() {
        if i > 0 {
            out.push('+');
        }
        out.extend(utf8_percent_encode(word, QUERY_COMPONENT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_first_seen_order_and_repeats() {
        let q = QueryMap::parse("b=1&a=2&b=3");
        let pairs: Vec<_> = q.pairs().collect();
        assert_eq!(pairs, vec![("b", "1"), ("b", "3"), ("a", "2")]);
        assert_eq!(q.get("b"), Some(&["1".to_string(), "3".to_string()][..]));
    }

    #[test]
    fn parse_keeps_blank_and_bare_names() {
        let q = QueryMap::parse("empty=&bare&&=anon");
        assert_eq!(q.get("empty"), Some(&[String::new()][..]));
        assert_eq!(q.get("bare"), Some(&[String::new()][..]));
        assert_eq!(q.get(""), Some(&["anon".to_string()][..]));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn parse_decodes_plus_and_percent() {
        let q = QueryMap::parse("q=a+b%20c&caf%C3%A9=%E2%9C%93");
        assert_eq!(q.get("q").unwrap()[0], "a b c");
        assert_eq!(q.get("café").unwrap()[0], "✓");
    }

    #[test]
    fn parse_never_fails_on_garbage() {
        let q = QueryMap::parse("%zz=%&x=%4");
        assert_eq!(q.get("%zz").unwrap()[0], "%");
        assert_eq!(q.get("x").unwrap()[0], "%4");
        let q = QueryMap::parse("bad=%FF");
        assert_eq!(q.get("bad").unwrap()[0], "\u{FFFD}");
    }

    #[test]
    fn set_replaces_in_place() {
        let mut q = QueryMap::parse("a=1&v=old&v=older&z=2");
        q.set("v", "new");
        assert_eq!(q.encode(), "a=1&v=new&z=2");
        q.set("w", "x");
        assert_eq!(q.encode(), "a=1&v=new&z=2&w=x");
    }

    #[test]
    fn keep_only_preserves_all_values() {
        let mut q = QueryMap::parse("index=3&list=A&t=1&list=B");
        assert!(q.keep_only("list"));
        assert_eq!(q.encode(), "list=A&list=B");
        assert!(!q.keep_only("v"));
        assert_eq!(q.encode(), "list=A&list=B");
    }

    #[test]
    fn encode_uses_quote_plus_rules() {
        let mut q = QueryMap::new();
        q.append("a b", "x y");
        q.append("safe", "-_.~");
        q.append("star", "*&=/?#+");
        q.append("uni", "é");
        assert_eq!(
            q.encode(),
            "a+b=x+y&safe=-_.~&star=%2A%26%3D%2F%3F%23%2B&uni=%C3%A9"
        );
    }

    #[test]
    fn encode_empty_is_empty() {
        assert_eq!(QueryMap::new().encode(), "");
        assert_eq!(QueryMap::parse("&&").encode(), "");
    }

    #[test]
    fn bare_name_encodes_with_equals() {
        assert_eq!(QueryMap::parse("flag").encode(), "flag=");
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut q = QueryMap::parse("a=1&b=2&c=3");
        assert_eq!(q.remove("b"), Some(vec!["2".to_string()]));
        assert_eq!(q.encode(), "a=1&c=3");
        assert_eq!(q.remove("b"), None);
    }

    #[test]
    fn equality_depends_on_order() {
        assert_eq!(QueryMap::parse("a=1&b=2"), QueryMap::parse("a=1&b=2"));
        assert_ne!(QueryMap::parse("a=1&b=2"), QueryMap::parse("b=2&a=1"));
        assert_ne!(QueryMap::parse("a=1"), QueryMap::parse("a=1&a=2"));
    }

    #[test]
    fn many_distinct_names_parse_in_linear_time() {
        let n = 50_000;
        let raw = (0..n).map(|i| format!("p{i}=1")).collect::<Vec<_>>().join("&");
        let started = std::time::Instant::now();
        let mut q = QueryMap::parse(&raw);
        assert_eq!(q.len(), n);
        assert!(q.contains_key("p49999"));
        assert!(q.keep_only("p25000"));
        assert_eq!(q.encode(), "p25000=1");
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }
}
