//! Line scanner: text to a flat map of dotted keys.
//!
//! The scanner is the first decoding stage. It reads the input line by line,
//! tracks the current `[section]` and records every `key = value` line under
//! `section.key`. Values are classified into [`Literal`]s without any
//! knowledge of the target schema; type decisions happen later, in the
//! instantiator.
//!
//! ## Value rules
//!
//! Tried in order: `null`, a quoted string (one quote stripped from each end,
//! no escape processing), `true`/`false`, a bracketed list, a token containing
//! `.` as a float, an integer. Anything else is kept as a [`Literal::Bare`]
//! string so that unquoted text still round-trips.
//!
//! ```rust
//! use serde_tomlish::{scan, CodecOptions, Literal};
//!
//! let text = "name = \"Dima\"\nage = 22\n\n[address]\ncity = \"Paris\"";
//! let flat = scan(text, &CodecOptions::default()).unwrap();
//!
//! assert_eq!(flat.get("age"), Some(&Literal::Integer(22)));
//! assert_eq!(flat.get("address.city"), Some(&Literal::Str("Paris".to_string())));
//! ```

use crate::tracing_macros::trace;
use crate::{CodecOptions, Error, FieldMap, Result};
use std::fmt;

/// A scanned, untyped value.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// A quoted string, quotes removed.
    Str(String),
    /// An unquoted token that is not a keyword or a number.
    Bare(String),
    List(Vec<Literal>),
}

impl Literal {
    /// Kind and content, for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Literal::Null => "null".to_string(),
            Literal::Bool(b) => format!("boolean {}", b),
            Literal::Integer(i) => format!("integer {}", i),
            Literal::Float(f) => format!("float {}", f),
            Literal::Str(s) => format!("string \"{}\"", s),
            Literal::Bare(s) => format!("bare token `{}`", s),
            Literal::List(items) => format!("list of {} element(s)", items.len()),
        }
    }
}

/// The textual form of the literal, without quotes.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(fl) => write!(f, "{}", fl),
            Literal::Str(s) | Literal::Bare(s) => f.write_str(s),
            Literal::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Dotted key to literal, in the order keys first appeared.
pub type FlatMap = FieldMap<Literal>;

/// Scans `text` into a flat map.
///
/// Blank lines are skipped. A repeated key keeps its first position and its
/// last value. Section headers only prefix keys here; use
/// [`scan_with_sections`] to keep headers that have no lines under them.
///
/// # Errors
///
/// Only in strict mode (`options.lenient == false`): returns
/// [`Error::Syntax`] for a line that is neither a section header nor an
/// assignment, and for a bare token that is not a number.
pub fn scan(text: &str, options: &CodecOptions) -> Result<FlatMap> {
    scan_with_sections(text, options).map(|(flat, _)| flat)
}

/// Scans `text` into a flat map and the list of section paths in the order
/// their headers appear.
///
/// ```rust
/// use serde_tomlish::{scan_with_sections, CodecOptions};
///
/// let (flat, sections) =
///     scan_with_sections("id = 1\n\n[marker]\n\n[a.b]\nx = 2", &CodecOptions::default()).unwrap();
/// assert_eq!(flat.len(), 2);
/// assert_eq!(sections, vec!["marker", "a.b"]);
/// ```
///
/// # Errors
///
/// Same as [`scan`].
pub fn scan_with_sections(text: &str, options: &CodecOptions) -> Result<(FlatMap, Vec<String>)> {
    let mut flat = FlatMap::new();
    let mut sections = Vec::new();
    let mut section = String::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(path) = section_header(trimmed) {
            trace!(line = line_no, section = path, "scan: entering section");
            section = path.to_string();
            if !section.is_empty() {
                sections.push(section.clone());
            }
            continue;
        }

        let Some((key, raw)) = trimmed.split_once('=') else {
            skip_line(options, line_no, "expected `key = value` or `[section]`")?;
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            skip_line(options, line_no, "assignment without a key")?;
            continue;
        }

        let literal = parse_value(raw.trim(), line_no, options)?;
        let full_key = if section.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", section, key)
        };
        flat.insert(full_key, literal);
    }

    Ok((flat, sections))
}

fn section_header(line: &str) -> Option<&str> {
    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        Some(line[1..line.len() - 1].trim())
    } else {
        None
    }
}

fn skip_line(options: &CodecOptions, line_no: usize, message: &str) -> Result<()> {
    if options.lenient {
        trace!(line = line_no, reason = message, "scan: ignoring line");
        Ok(())
    } else {
        Err(Error::syntax(line_no, message))
    }
}

fn unquote(token: &str) -> Option<&str> {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

fn parse_value(raw: &str, line_no: usize, options: &CodecOptions) -> Result<Literal> {
    if let Some(items) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        if items.trim().is_empty() {
            return Ok(Literal::List(Vec::new()));
        }
        return items
            .split(',')
            .map(|item| parse_scalar(item.trim(), line_no, options))
            .collect::<Result<Vec<_>>>()
            .map(Literal::List);
    }
    parse_scalar(raw, line_no, options)
}

fn parse_scalar(token: &str, line_no: usize, options: &CodecOptions) -> Result<Literal> {
    if token == "null" {
        return Ok(Literal::Null);
    }
    if let Some(inner) = unquote(token) {
        return Ok(Literal::Str(inner.to_string()));
    }
    match token {
        "true" => return Ok(Literal::Bool(true)),
        "false" => return Ok(Literal::Bool(false)),
        _ => {}
    }

    let number = if token.contains('.') {
        token.parse::<f64>().ok().map(Literal::Float)
    } else {
        token.parse::<i64>().ok().map(Literal::Integer)
    };
    if let Some(number) = number {
        return Ok(number);
    }

    // `NaN`, `inf` and exponent forms are accepted even in strict mode; the
    // instantiator parses them when the target is a float.
    if !options.lenient && token.parse::<f64>().is_err() {
        return Err(Error::syntax(
            line_no,
            &format!("unquoted token `{}` is not a literal", token),
        ));
    }
    Ok(Literal::Bare(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(text: &str) -> FlatMap {
        scan(text, &CodecOptions::default()).unwrap()
    }

    #[test]
    fn test_scalar_literals() {
        let flat = lenient(
            "s = \"hello\"\ni = -42\nf = 2.75\nt = true\nn = null\nb = plain",
        );
        assert_eq!(flat.get("s"), Some(&Literal::Str("hello".to_string())));
        assert_eq!(flat.get("i"), Some(&Literal::Integer(-42)));
        assert_eq!(flat.get("f"), Some(&Literal::Float(2.75)));
        assert_eq!(flat.get("t"), Some(&Literal::Bool(true)));
        assert_eq!(flat.get("n"), Some(&Literal::Null));
        assert_eq!(flat.get("b"), Some(&Literal::Bare("plain".to_string())));
    }

    #[test]
    fn test_quoted_keywords_stay_strings() {
        let flat = lenient("a = \"true\"\nb = \"null\"\nc = \"123\"");
        assert_eq!(flat.get("a"), Some(&Literal::Str("true".to_string())));
        assert_eq!(flat.get("b"), Some(&Literal::Str("null".to_string())));
        assert_eq!(flat.get("c"), Some(&Literal::Str("123".to_string())));
    }

    #[test]
    fn test_lists() {
        let flat = lenient("tags = [\"a\", \"b\", \"c\"]\nempty = []\nnums = [1, 2.5, x]");
        assert_eq!(
            flat.get("tags"),
            Some(&Literal::List(vec![
                Literal::Str("a".to_string()),
                Literal::Str("b".to_string()),
                Literal::Str("c".to_string()),
            ]))
        );
        assert_eq!(flat.get("empty"), Some(&Literal::List(vec![])));
        assert_eq!(
            flat.get("nums"),
            Some(&Literal::List(vec![
                Literal::Integer(1),
                Literal::Float(2.5),
                Literal::Bare("x".to_string()),
            ]))
        );
    }

    #[test]
    fn test_sections_prefix_keys() {
        let flat = lenient("id = 1\n\n[a]\nx = 1\n\n[a.b]\ny = 2\n[c]\nz = 3");
        let keys: Vec<_> = flat.keys().cloned().collect();
        assert_eq!(keys, vec!["id", "a.x", "a.b.y", "c.z"]);
    }

    #[test]
    fn test_value_keeps_equals_signs() {
        let flat = lenient("expr = \"a = b\"");
        assert_eq!(flat.get("expr"), Some(&Literal::Str("a = b".to_string())));
    }

    #[test]
    fn test_malformed_numbers_degrade_to_bare() {
        let flat = lenient("version = 1.2.3\nbig = 99999999999999999999\nid = 12ab");
        assert_eq!(flat.get("version"), Some(&Literal::Bare("1.2.3".to_string())));
        assert_eq!(
            flat.get("big"),
            Some(&Literal::Bare("99999999999999999999".to_string()))
        );
        assert_eq!(flat.get("id"), Some(&Literal::Bare("12ab".to_string())));
    }

    #[test]
    fn test_junk_lines_ignored_when_lenient() {
        let flat = lenient("# not a comment syntax\nx = 1\njust words");
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_strict_mode_rejects_junk_and_bare_tokens() {
        let strict = CodecOptions::strict();
        assert_eq!(
            scan("x = 1\njust words", &strict).unwrap_err(),
            Error::syntax(2, "expected `key = value` or `[section]`")
        );
        assert!(matches!(
            scan("name = Dima", &strict),
            Err(Error::Syntax { line: 1, .. })
        ));
        let flat = scan("f = NaN\ng = 1e5", &strict).unwrap();
        assert_eq!(flat.get("f"), Some(&Literal::Bare("NaN".to_string())));
    }

    #[test]
    fn test_empty_sections_are_recorded() {
        let (flat, sections) = scan_with_sections(
            "id = 1\n[marker]\n[]\n[a]\n[a.b]\nx = 2",
            &CodecOptions::default(),
        )
        .unwrap();
        let keys: Vec<_> = flat.keys().cloned().collect();
        assert_eq!(keys, vec!["id", "a.b.x"]);
        assert_eq!(sections, vec!["marker", "a", "a.b"]);
    }

    #[test]
    fn test_literal_display() {
        let list = Literal::List(vec![Literal::Str("a".to_string()), Literal::Integer(1)]);
        assert_eq!(list.to_string(), "[a, 1]");
        assert_eq!(Literal::Float(2.5).to_string(), "2.5");
        assert_eq!(Literal::Str("x".to_string()).describe(), "string \"x\"");
    }
}
