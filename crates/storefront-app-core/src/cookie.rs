// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cookie access port.
//!
//! Cart and session identifiers are issued by the server as cookies. Page
//! behaviors never read `document.cookie` themselves; they receive a
//! [`CookieStore`] so tests can substitute an in-memory store.

use std::collections::BTreeMap;

/// Read-only access to the cookies visible to the page.
pub trait CookieStore {
    /// Return the decoded value of cookie `name`, if present and valued.
    fn cookie(&self, name: &str) -> Option<String>;

    /// Like [`CookieStore::cookie`] but treats an empty value as absent.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.cookie(name).filter(|value| !value.is_empty())
    }
}

impl<T: CookieStore + ?Sized> CookieStore for &T {
    fn cookie(&self, name: &str) -> Option<String> {
        (**self).cookie(name)
    }
}

/// Snapshot of a cookie header, parsed once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: BTreeMap<String, Option<String>>,
}

impl CookieJar {
    /// Parse a `document.cookie` style header.
    ///
    /// Plain headers are `name=value` pairs separated by `;` or `,`. Names are
    /// trimmed on the left, values on the right, both percent-decoded, and a
    /// value wrapped in double quotes loses its quotes. A pair without `=`
    /// is recorded with no value. Headers opening with `$Version=1` use the
    /// RFC 2109 form: `$`-attributes are skipped and quoted values unescaped.
    pub fn parse(header: &str) -> Self {
        let entries = match strip_version_prefix(header) {
            Some(rest) => parse_rfc2109(rest),
            None => parse_plain(header),
        };
        Self { entries }
    }

    /// Number of named cookies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the header carried no named cookie.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate cookie names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl CookieStore for CookieJar {
    fn cookie(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned().flatten()
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |cow| cow.into_owned())
}

fn parse_plain(header: &str) -> BTreeMap<String, Option<String>> {
    let mut entries = BTreeMap::new();
    for pair in header.split([';', ',']) {
        let (raw_name, raw_value) = match pair.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (pair, None),
        };
        let name = decode(raw_name.trim_start());
        if name.trim().is_empty() {
            continue;
        }
        let value = raw_value.map(|v| {
            let decoded = decode(v.trim_end());
            match decoded.strip_prefix('"') {
                // a lone quote has nothing to strip at the other end
                Some(inner) => inner
                    .strip_suffix('"')
                    .unwrap_or(inner)
                    .to_string(),
                None => decoded,
            }
        });
        entries.insert(name, value);
    }
    entries
}

fn strip_version_prefix(header: &str) -> Option<&str> {
    let trimmed = header.trim_start();
    let rest = trimmed.strip_prefix("$Version=")?;
    let rest = rest
        .strip_prefix("\"1\"")
        .or_else(|| rest.strip_prefix('1'))?;
    let rest = rest.trim_start().strip_prefix(';')?;
    Some(rest)
}

fn parse_rfc2109(rest: &str) -> BTreeMap<String, Option<String>> {
    let mut entries = BTreeMap::new();
    for pair in split_outside_quotes(rest) {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || name.starts_with('$') {
            continue;
        }
        let value = value.trim();
        let value = match value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
        {
            Some(quoted) => unescape(quoted),
            None => value.to_string(),
        };
        entries.insert(name.to_string(), Some(value));
    }
    entries
}

fn split_outside_quotes(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (i, ch) in input.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' | ',' if !quoted => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

fn unescape(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_pairs() {
        let jar = CookieJar::parse("cart_count=3; cart_total=%E2%82%B9%20120; full_name=Ada");
        assert_eq!(jar.cookie("cart_count").as_deref(), Some("3"));
        assert_eq!(jar.cookie("cart_total").as_deref(), Some("₹ 120"));
        assert_eq!(jar.cookie("full_name").as_deref(), Some("Ada"));
        assert_eq!(jar.len(), 3);
    }

    #[test]
    fn strips_surrounding_quotes() {
        let jar = CookieJar::parse(r#"cart_items="[{\"item_code\":\"A\"}]""#);
        assert_eq!(
            jar.cookie("cart_items").as_deref(),
            Some(r#"[{\"item_code\":\"A\"}]"#)
        );
    }

    #[test]
    fn keeps_equals_inside_value() {
        let jar = CookieJar::parse("token=abc==; x=1");
        assert_eq!(jar.cookie("token").as_deref(), Some("abc=="));
    }

    #[test]
    fn pair_without_value_is_present_but_unvalued() {
        let jar = CookieJar::parse("flag; a=1");
        assert_eq!(jar.cookie("flag"), None);
        assert!(jar.names().any(|n| n == "flag"));
    }

    #[test]
    fn empty_header_has_no_cookies() {
        assert!(CookieJar::parse("").is_empty());
        assert!(CookieJar::parse(" ; ").is_empty());
    }

    #[test]
    fn non_empty_treats_blank_as_missing() {
        let jar = CookieJar::parse("cart_count=; cart_total=5");
        assert_eq!(jar.cookie("cart_count").as_deref(), Some(""));
        assert_eq!(jar.non_empty("cart_count"), None);
        assert_eq!(jar.non_empty("cart_total").as_deref(), Some("5"));
    }

    #[test]
    fn parses_rfc2109_header() {
        let jar = CookieJar::parse(
            r#"$Version="1"; sid="a\"b;c"; $Path="/"; user_id=guest"#,
        );
        assert_eq!(jar.cookie("sid").as_deref(), Some("a\"b;c"));
        assert_eq!(jar.cookie("user_id").as_deref(), Some("guest"));
        assert_eq!(jar.cookie("$Path"), None);
    }

    #[test]
    fn borrowed_store_delegates() {
        let jar = CookieJar::parse("a=1");
        let store: &dyn CookieStore = &jar;
        assert_eq!((&store).cookie("a").as_deref(), Some("1"));
    }
}
