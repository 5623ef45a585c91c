use regex::Regex;
use std::sync::LazyLock;

/// One classified, grammar-checked sheet line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `REM <NAME> <value>`; key is stored as `"REM <NAME>"`.
    Rem { key: &'a str, value: &'a str },
    /// `FILE <value> <TYPE>`; the type tag is checked but dropped.
    File { value: &'a str },
    /// `TRACK <digits> AUDIO`
    Track { number: &'a str },
    /// `INDEX <digits> <timestamp>`; never stored.
    Index,
    /// `<KEY> <value>` for everything else (PERFORMER, TITLE, ...).
    Generic { key: &'a str, value: &'a str },
}

static REM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(REM [A-Z_]+) (.+)$").unwrap());

static FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^FILE (.+) [A-Z]{3,4}$").unwrap());

static TRACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TRACK ([0-9]+) AUDIO$").unwrap());

// Timestamps are mm:ss:ff-like; only the shape is checked.
static INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^INDEX ([0-9]+) ([0-9:]{8,11})$").unwrap());

static GENERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+) (.+)$").unwrap());

/// Classify a trimmed, non-blank line by its prefix and validate it against
/// that prefix's grammar. `None` means the line is malformed.
pub fn classify(line: &str) -> Option<Directive<'_>> {
    if line.starts_with("REM ") {
        let caps = REM_RE.captures(line)?;
        Some(Directive::Rem {
            key: caps.get(1)?.as_str(),
            value: caps.get(2)?.as_str(),
        })
    } else if line.starts_with("FILE ") {
        let caps = FILE_RE.captures(line)?;
        Some(Directive::File { value: caps.get(1)?.as_str() })
    } else if line.starts_with("TRACK ") {
        let caps = TRACK_RE.captures(line)?;
        Some(Directive::Track { number: caps.get(1)?.as_str() })
    } else if line.starts_with("INDEX ") {
        INDEX_RE.is_match(line).then_some(Directive::Index)
    } else {
        let caps = GENERIC_RE.captures(line)?;
        Some(Directive::Generic {
            key: caps.get(1)?.as_str(),
            value: caps.get(2)?.as_str(),
        })
    }
}

/// Strip a surrounding pair of double quotes and all whitespace around and
/// inside them.
///
/// A value that opens a quote without closing it is kept verbatim (trimmed),
/// which real-world sheets rely on.
pub fn unquote_trimmed(value: &str) -> &str {
    match quoted_body(value) {
        Some(inner) => inner.trim(),
        None => value.trim(),
    }
}

/// Strip a surrounding pair of double quotes but keep the whitespace inside
/// them. Used for `TITLE_RAW`, which must match the splitter's file names.
pub fn unquote_raw(value: &str) -> &str {
    quoted_body(value).unwrap_or(value)
}

fn quoted_body(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        Some(&trimmed[1..trimmed.len() - 1])
    } else {
        None
    }
}
