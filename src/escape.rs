//! Key and string escaping.
//!
//! Keys made only of alphanumerics, `-` and `_` are written bare. Every other
//! key, and every string value, is written as a basic (double-quoted) string.

use std::borrow::Cow;

/// Returns `key` unchanged when it is a valid bare key, otherwise quoted.
///
/// "Alphanumeric" follows [`char::is_alphanumeric`], so non-ASCII letters and
/// digits stay bare. The empty key is always quoted.
///
/// # Examples
///
/// ```rust
/// use toml_dump::escape_id;
///
/// assert_eq!(escape_id("server-1_a"), "server-1_a");
/// assert_eq!(escape_id("with space"), "\"with space\"");
/// assert_eq!(escape_id("a.b"), "\"a.b\"");
/// assert_eq!(escape_id(""), "\"\"");
/// ```
#[must_use]
pub fn escape_id(key: &str) -> Cow<'_, str> {
    if !key.is_empty() && key.chars().all(is_bare_key_char) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(escape_string(key))
    }
}

#[inline]
fn is_bare_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Writes `s` as a double-quoted basic string.
///
/// `"`, `\`, and the control characters `\b \t \n \f \r` get their short
/// escapes; every other character below U+0020 becomes `\u00XX`. Everything
/// else is copied through.
///
/// # Examples
///
/// ```rust
/// use toml_dump::escape_string;
///
/// assert_eq!(escape_string("plain"), "\"plain\"");
/// assert_eq!(escape_string("a\"b\\c"), r#""a\"b\\c""#);
/// assert_eq!(escape_string("tab\there"), r#""tab\there""#);
/// assert_eq!(escape_string("\u{1}"), r#""\u0001""#);
/// ```
#[must_use]
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    write_escaped(&mut out, s);
    out.push('"');
    out
}

/// Appends the escaped body of `s` (without quotes) to `out`.
///
/// Runs of characters that need no escaping are copied with a single
/// `push_str`.
pub(crate) fn write_escaped(out: &mut String, s: &str) {
    let mut start = 0;

    for (i, c) in s.char_indices() {
        let short = match c {
            '\n' => Some('n'),
            '\r' => Some('r'),
            '\\' => Some('\\'),
            '\t' => Some('t'),
            '\u{0008}' => Some('b'),
            '\u{000C}' => Some('f'),
            '"' => Some('"'),
            c if (c as u32) < 0x20 => None,
            _ => continue,
        };

        out.push_str(&s[start..i]);
        start = i + c.len_utf8();

        match short {
            Some(e) => {
                out.push('\\');
                out.push(e);
            }
            None => out.push_str(&format!("\\u{:04x}", c as u32)),
        }
    }

    out.push_str(&s[start..]);
}
