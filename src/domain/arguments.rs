//! Activation argument codec
//!
//! Key/value pairs travel through the OS activation channel as a single
//! string: `key1=value1;key2=value2`. Reserved characters are percent-escaped
//! so arbitrary keys and values survive the round trip. The format is shared
//! with already scheduled notifications and must not change.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Escape table, applied top to bottom. `%` must come first.
const ESCAPES: [(&str, &str); 8] = [
    ("%", "%25"),
    (";", "%3B"),
    ("=", "%3D"),
    ("\"", "%22"),
    ("'", "%27"),
    ("<", "%3C"),
    (">", "%3E"),
    ("&", "%26"),
];

/// Percent-escape the reserved characters `%;="'<>&`
pub fn encode(raw: &str) -> String {
    ESCAPES
        .iter()
        .fold(raw.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Reverse of [`encode`]; `%25` is unescaped last
pub fn decode(encoded: &str) -> String {
    ESCAPES
        .iter()
        .skip(1)
        .chain(ESCAPES.iter().take(1))
        .fold(encoded.to_string(), |acc, (from, to)| acc.replace(to, from))
}

fn encode_pair(key: &str, value: &str) -> String {
    if value.is_empty() {
        encode(key)
    } else {
        format!("{}={}", encode(key), encode(value))
    }
}

/// Argument map exchanged with the OS activation subsystem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastArguments {
    pairs: BTreeMap<String, String>,
}

impl ToastArguments {
    /// Create an empty argument map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a serialized argument string
    pub fn parsed(raw: &str) -> Self {
        let mut arguments = Self::new();
        arguments.parse(raw);
        arguments
    }

    /// Replace the contents with the pairs parsed from `raw`.
    ///
    /// A segment without `=` becomes a key with an empty value; duplicate keys
    /// keep the last value.
    pub fn parse(&mut self, raw: &str) {
        self.pairs.clear();

        if raw.trim_start_matches(' ').is_empty() {
            return;
        }

        for segment in raw.split(';') {
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (decode(key), decode(value)),
                None => (decode(segment), String::new()),
            };
            self.pairs.insert(key, value);
        }
    }

    /// Insert or overwrite a pair
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.insert(key.into(), value.into());
        self
    }

    /// Remove a key, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.pairs.remove(key).is_some()
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate pairs in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.pairs.iter()
    }
}

impl fmt::Display for ToastArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let serialized = self
            .pairs
            .iter()
            .map(|(key, value)| encode_pair(key, value))
            .collect::<Vec<_>>()
            .join(";");
        f.write_str(&serialized)
    }
}

impl FromStr for ToastArguments {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parsed(s))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ToastArguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl Index<&str> for ToastArguments {
    type Output = String;

    fn index(&self, key: &str) -> &Self::Output {
        &self.pairs[key]
    }
}

impl<'a> IntoIterator for &'a ToastArguments {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_escapes_every_reserved_character() {
        let encoded = encode("%;=\"'<>&");
        assert_eq!(encoded, "%25%3B%3D%22%27%3C%3E%26");
        for reserved in ['%', ';', '=', '"', '\'', '<', '>', '&'] {
            if reserved == '%' {
                continue;
            }
            assert!(!encoded.contains(reserved), "found {:?}", reserved);
        }
    }

    #[test]
    fn encode_does_not_double_escape() {
        assert_eq!(encode("a;b"), "a%3Bb");
        assert_eq!(encode("100%"), "100%25");
    }

    #[test]
    fn decode_reverses_encode() {
        let raw = "key=<value> & \"quoted\" 'single'; 50%";
        assert_eq!(decode(&encode(raw)), raw);
    }

    #[test]
    fn decode_percent_last() {
        // "%253B" is an escaped literal "%3B", not a semicolon
        assert_eq!(decode("%253B"), "%3B");
    }

    #[test]
    fn parse_pairs_and_bare_keys() {
        let args = ToastArguments::parsed("actionId=1;flag;name=a%3Db");
        assert_eq!(args.get("actionId"), Some("1"));
        assert_eq!(args.get("flag"), Some(""));
        assert_eq!(args.get("name"), Some("a=b"));
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn parse_splits_on_first_equals() {
        let args = ToastArguments::parsed("k=v=w");
        assert_eq!(args.get("k"), Some("v=w"));
    }

    #[test]
    fn parse_last_write_wins() {
        let args = ToastArguments::parsed("k=1;k=2");
        assert_eq!(args.get("k"), Some("2"));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn parse_blank_is_empty() {
        assert!(ToastArguments::parsed("").is_empty());
        assert!(ToastArguments::parsed("   ").is_empty());
    }

    #[test]
    fn parse_clears_previous_pairs() {
        let mut args = ToastArguments::parsed("a=1");
        args.parse("b=2");
        assert!(!args.contains("a"));
        assert!(args.contains("b"));
    }

    #[test]
    fn to_string_empty_map() {
        assert_eq!(ToastArguments::new().to_string(), "");
    }

    #[test]
    fn to_string_omits_empty_values() {
        let mut args = ToastArguments::new();
        args.add("actionId", "0").add("flag", "");
        assert_eq!(args.to_string(), "actionId=0;flag");
    }

    #[test]
    fn round_trip_with_reserved_characters() {
        let args: ToastArguments = [
            ("actionId", "3"),
            ("a;b", "c=d"),
            ("html", "<b>&amp;</b>"),
            ("quote", "\"'"),
            ("percent", "100%"),
        ]
        .into_iter()
        .collect();

        let parsed: ToastArguments = args.to_string().parse().unwrap();
        assert_eq!(parsed, args);
    }

    #[test]
    fn remove_reports_presence() {
        let mut args = ToastArguments::parsed("a=1");
        assert!(args.remove("a"));
        assert!(!args.remove("a"));
    }

    #[test]
    fn index_returns_value() {
        let args = ToastArguments::parsed("actionId=7");
        assert_eq!(args["actionId"], "7");
    }
}
