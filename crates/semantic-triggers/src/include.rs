//! `#include` / `#import` statement detection
//!
//! Used by C-family completers to switch to include-path completion. Both
//! functions look at a single line and never touch the filesystem.

use once_cell::sync::Lazy;
use regex::Regex;

static INCLUDE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*#\s*(?:include|import)\s*("|<)"#).expect("include regex is valid")
});

/// Result of parsing one line as an include statement
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncludeMatch {
    /// Whether the line starts with an include/import prefix
    pub is_include: bool,
    /// Path between the delimiters, or everything after the opening one when
    /// closing is not required. `None` if not an include or still unterminated.
    pub path: Option<String>,
    /// `"path"` rather than `<path>`
    pub quoted: bool,
    /// Byte offset just past the opening delimiter
    pub path_start: Option<usize>,
}

/// True iff the whole line is an include prefix ending at its opening delimiter
///
/// `#include "` matches; `#include "foo.h"` does not.
pub fn is_include_statement_start(line: &str) -> bool {
    INCLUDE_REGEX
        .find(line)
        .is_some_and(|m| m.end() == line.len())
}

/// Extract the path of an include statement and its quoting style
///
/// With `require_closing`, the path is the text up to the matching `"` or
/// `>`, and is absent when that delimiter has not been typed yet.
pub fn parse_include_statement(line: &str, require_closing: bool) -> IncludeMatch {
    let Some(captures) = INCLUDE_REGEX.captures(line) else {
        return IncludeMatch::default();
    };

    let (Some(prefix), Some(opening)) = (captures.get(0), captures.get(1)) else {
        return IncludeMatch::default();
    };

    let quoted = opening.as_str() == "\"";
    let start = prefix.end();
    let rest = &line[start..];

    let path = if require_closing {
        let closing = if quoted { '"' } else { '>' };
        rest.find(closing).map(|end| rest[..end].to_string())
    } else {
        Some(rest.to_string())
    };

    IncludeMatch {
        is_include: true,
        path,
        quoted,
        path_start: Some(start),
    }
}
