/// Trigger specifications and their compiled form
///
/// A trigger is written either as a literal (`"->"`, `"::"`) or as a raw regex
/// carrying the [`TRIGGER_REGEX_PREFIX`] marker (`"re!\[[_a-zA-Z]+\w*\s"`).
/// Both kinds compile to the same [`CompiledTrigger`], so the matcher never
/// has to branch on the kind at query time.
use crate::error::{TriggerError, TriggerResult};
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker that turns the rest of a trigger spec into a raw regex
pub const TRIGGER_REGEX_PREFIX: &str = "re!";

/// A trigger as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TriggerSpec {
    /// Matched verbatim; regex metacharacters are escaped
    Literal(String),
    /// Compiled as-is; anchoring is the author's responsibility
    Regex(String),
}

impl TriggerSpec {
    /// Classify a spec string by its prefix
    ///
    /// # Example
    ///
    /// ```ignore
    /// assert_eq!(TriggerSpec::parse("->"), TriggerSpec::Literal("->".to_string()));
    /// assert_eq!(TriggerSpec::parse(r"re!\w+\s"), TriggerSpec::Regex(r"\w+\s".to_string()));
    /// ```
    pub fn parse(spec: &str) -> Self {
        match spec.strip_prefix(TRIGGER_REGEX_PREFIX) {
            Some(pattern) => TriggerSpec::Regex(pattern.to_string()),
            None => TriggerSpec::Literal(spec.to_string()),
        }
    }

    /// The regex source this spec compiles to
    pub fn pattern(&self) -> String {
        match self {
            TriggerSpec::Literal(text) => regex::escape(text),
            TriggerSpec::Regex(pattern) => pattern.clone(),
        }
    }

    /// Compile into a matcher
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::InvalidPattern`] if a regex spec does not compile.
    /// Literal specs always compile.
    pub fn compile(&self) -> TriggerResult<CompiledTrigger> {
        let pattern = self.pattern();
        let regex = Regex::new(&pattern).map_err(|source| TriggerError::InvalidPattern {
            spec: self.to_string(),
            source,
        })?;

        Ok(CompiledTrigger {
            regex,
            spec: self.clone(),
        })
    }
}

impl fmt::Display for TriggerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerSpec::Literal(text) => f.write_str(text),
            TriggerSpec::Regex(pattern) => write!(f, "{}{}", TRIGGER_REGEX_PREFIX, pattern),
        }
    }
}

impl From<&str> for TriggerSpec {
    fn from(spec: &str) -> Self {
        TriggerSpec::parse(spec)
    }
}

/// Compile a raw spec string in one step
pub fn compile_trigger_spec(spec: &str) -> TriggerResult<CompiledTrigger> {
    TriggerSpec::parse(spec).compile()
}

/// A compiled, Unicode-aware trigger pattern
///
/// Identity is the final pattern text: a literal `"."` and a regex `"re!\."`
/// are the same trigger.
#[derive(Debug, Clone)]
pub struct CompiledTrigger {
    regex: Regex,
    spec: TriggerSpec,
}

impl CompiledTrigger {
    /// Pattern text handed to the regex engine
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// The spec this trigger was compiled from
    pub fn spec(&self) -> &TriggerSpec {
        &self.spec
    }

    pub fn is_regex(&self) -> bool {
        matches!(self.spec, TriggerSpec::Regex(_))
    }

    /// Whether some match of this trigger in `line` ends exactly at byte `end`
    ///
    /// Matches are found left to right without overlap.
    pub fn has_match_ending_at(&self, line: &str, end: usize) -> bool {
        self.regex.find_iter(line).any(|m| m.end() == end)
    }
}

impl PartialEq for CompiledTrigger {
    fn eq(&self, other: &Self) -> bool {
        self.pattern() == other.pattern()
    }
}

impl Eq for CompiledTrigger {}

impl Hash for CompiledTrigger {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern().hash(state);
    }
}

impl fmt::Display for CompiledTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.spec, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        assert_eq!(
            TriggerSpec::parse("::"),
            TriggerSpec::Literal("::".to_string())
        );
    }

    #[test]
    fn test_parse_regex() {
        assert_eq!(
            TriggerSpec::parse(r"re!\[.*\]\s"),
            TriggerSpec::Regex(r"\[.*\]\s".to_string())
        );
    }

    #[test]
    fn test_prefix_only_at_start() {
        assert_eq!(
            TriggerSpec::parse("xre!"),
            TriggerSpec::Literal("xre!".to_string())
        );
    }

    #[test]
    fn test_literal_is_escaped() {
        let trigger = compile_trigger_spec(".").unwrap();
        assert_eq!(trigger.pattern(), r"\.");
        assert!(!trigger.is_regex());
        assert!(!trigger.has_match_ending_at("foo", 1));
        assert!(trigger.has_match_ending_at("foo.", 4));
    }

    #[test]
    fn test_regex_is_verbatim() {
        let trigger = compile_trigger_spec(r"re!\w+\s").unwrap();
        assert_eq!(trigger.pattern(), r"\w+\s");
        assert!(trigger.is_regex());
    }

    #[test]
    fn test_invalid_regex_fails() {
        let result = compile_trigger_spec("re![unclosed");
        assert!(matches!(
            result,
            Err(TriggerError::InvalidPattern { ref spec, .. }) if spec == "re![unclosed"
        ));
    }

    #[test]
    fn test_literal_with_metacharacters_compiles() {
        assert!(compile_trigger_spec("[(").is_ok());
    }

    #[test]
    fn test_equality_by_pattern() {
        let literal = compile_trigger_spec(".").unwrap();
        let regex = compile_trigger_spec(r"re!\.").unwrap();
        assert_eq!(literal, regex);
        assert_ne!(literal, compile_trigger_spec("->").unwrap());
    }

    #[test]
    fn test_display_round_trips_spec() {
        let trigger = compile_trigger_spec(r"re!\w\s").unwrap();
        assert_eq!(trigger.to_string(), r"re!\w\s");
    }

    #[test]
    fn test_unicode_word_class() {
        let trigger = compile_trigger_spec(r"re!\w+\s").unwrap();
        let line = "données ";
        assert!(trigger.has_match_ending_at(line, line.len()));
    }
}
