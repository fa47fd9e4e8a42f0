/// Caret-anchored trigger matching
///
/// A trigger fires when one of its matches ends exactly at the caret column on
/// the text before the caret. Occurrences earlier in the line, or matches that
/// run past the caret, do not count.
///
/// # Example
///
/// ```ignore
/// use semantic_triggers::PreparedTriggers;
///
/// let triggers = PreparedTriggers::default();
/// assert!(triggers.matches("foo->", 5, "cpp"));
/// assert!(!triggers.matches("foo->bar", 6, "cpp"));
/// ```
use crate::config::TriggerConfig;
use crate::defaults::default_triggers;
use crate::error::TriggerResult;
use crate::table::{FiletypeTriggerTable, TriggerSet, TriggerSpecTable};
use crate::trigger::CompiledTrigger;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Final per-filetype trigger sets for one completion session
///
/// Built once from the defaults plus optional user triggers; read-only after.
#[derive(Debug, Clone)]
pub struct PreparedTriggers {
    table: FiletypeTriggerTable,
}

impl PreparedTriggers {
    /// Union the built-in table with `user_triggers`, then optionally keep only
    /// the filetypes in `filetype_filter`
    ///
    /// An empty filter is treated like no filter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TriggerError::InvalidPattern`] if a user `re!` trigger
    /// does not compile.
    pub fn new(
        user_triggers: Option<&TriggerSpecTable>,
        filetype_filter: Option<&HashSet<String>>,
    ) -> TriggerResult<Self> {
        let user_table = match user_triggers {
            Some(spec) => FiletypeTriggerTable::from_spec(spec)?,
            None => FiletypeTriggerTable::new(),
        };

        let mut table = default_triggers().union(&user_table);

        // an empty filter means no filter
        if let Some(filter) = filetype_filter.filter(|f| !f.is_empty()) {
            for filetype in filter {
                if !table.contains_filetype(filetype) {
                    warn!("No triggers configured for filtered filetype '{}'", filetype);
                }
            }
            table.retain(|filetype| filter.contains(filetype));
        }

        debug!(
            "Prepared triggers for {} filetypes (filter: {:?})",
            table.len(),
            filetype_filter.map(HashSet::len)
        );

        Ok(Self { table })
    }

    /// Build from a loaded configuration
    pub fn from_config(config: &TriggerConfig) -> TriggerResult<Self> {
        let filter = config
            .filetypes
            .as_ref()
            .map(|filetypes| filetypes.iter().cloned().collect::<HashSet<_>>());
        Self::new(Some(&config.triggers), filter.as_ref())
    }

    /// The trigger that ends exactly at `column` on `line`, if any
    ///
    /// `column` is a 0-based char offset. Unknown filetypes, empty lines and
    /// columns past the end of the line yield `None`.
    pub fn matching_trigger(
        &self,
        line: &str,
        column: usize,
        filetype: &str,
    ) -> Option<&CompiledTrigger> {
        let triggers = self.table.get(filetype)?;
        let matched = matching_trigger_in(line, column, triggers);
        if let Some(trigger) = matched {
            trace!(
                "Trigger '{}' matched for {} at column {}",
                trigger,
                filetype,
                column
            );
        }
        matched
    }

    /// Whether any trigger ends exactly at `column`
    pub fn matches(&self, line: &str, column: usize, filetype: &str) -> bool {
        self.matching_trigger(line, column, filetype).is_some()
    }

    /// Triggers configured for `filetype`, if any
    pub fn triggers_for(&self, filetype: &str) -> Option<&TriggerSet> {
        self.table.get(filetype)
    }

    /// Filetypes with at least one trigger entry, in no particular order
    pub fn filetypes(&self) -> impl Iterator<Item = &str> {
        self.table.filetypes()
    }

    /// The merged per-filetype table backing this session
    pub fn table(&self) -> &FiletypeTriggerTable {
        &self.table
    }
}

impl Default for PreparedTriggers {
    /// Built-in triggers only
    fn default() -> Self {
        Self {
            table: default_triggers().clone(),
        }
    }
}

/// First trigger in `triggers` with a match ending exactly at `column`
///
/// Works on any trigger collection; [`PreparedTriggers::matching_trigger`]
/// is this plus the filetype lookup.
pub fn matching_trigger_in<'a, I>(line: &str, column: usize, triggers: I) -> Option<&'a CompiledTrigger>
where
    I: IntoIterator<Item = &'a CompiledTrigger>,
{
    if line.is_empty() {
        return None;
    }

    // ignore everything after the caret
    let before_caret = truncate_chars(line, column)?;
    let end = before_caret.len();

    triggers
        .into_iter()
        .find(|trigger| trigger.has_match_ending_at(before_caret, end))
}

pub fn matches_trigger_in<'a, I>(line: &str, column: usize, triggers: I) -> bool
where
    I: IntoIterator<Item = &'a CompiledTrigger>,
{
    matching_trigger_in(line, column, triggers).is_some()
}

/// Prefix of `line` holding its first `column` chars, or `None` if the line is shorter
fn truncate_chars(line: &str, column: usize) -> Option<&str> {
    if column == 0 {
        return Some("");
    }
    match line.char_indices().nth(column) {
        Some((offset, _)) => Some(&line[..offset]),
        None if line.chars().count() == column => Some(line),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::spec_table_from as user;
    use crate::trigger::compile_trigger_spec;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 0), Some(""));
        assert_eq!(truncate_chars("abc", 2), Some("ab"));
        assert_eq!(truncate_chars("abc", 3), Some("abc"));
        assert_eq!(truncate_chars("abc", 4), None);
        assert_eq!(truncate_chars("héllo", 2), Some("hé"));
    }

    #[test]
    fn test_dot_anchored_at_caret() {
        let triggers = PreparedTriggers::default();
        assert!(triggers.matches("foo.", 4, "c"));
        assert!(!triggers.matches("foo.", 3, "c"));
        assert!(!triggers.matches("foo.", 5, "c"));
    }

    #[test]
    fn test_arrow_only_at_its_end() {
        let triggers = PreparedTriggers::default();
        assert!(triggers.matches("foo->bar", 5, "cpp"));
        for column in [4, 6, 7, 8] {
            assert!(!triggers.matches("foo->bar", column, "cpp"), "column {}", column);
        }
    }

    #[test]
    fn test_earlier_occurrence_does_not_count() {
        let triggers = PreparedTriggers::default();
        assert!(!triggers.matches("a.b", 3, "python"));
        assert!(triggers.matches("a.b.", 4, "python"));
    }

    #[test]
    fn test_objc_bracketed_call() {
        let triggers = PreparedTriggers::default();
        let line = "[myObject ";
        assert!(triggers.matches(line, line.len(), "objc"));
        let line = "[myObject";
        assert!(!triggers.matches(line, line.len(), "objc"));
    }

    #[test]
    fn test_objc_bracketless_call() {
        let triggers = PreparedTriggers::default();
        let line = "  foo ";
        assert!(triggers.matches(line, line.len(), "objc"));
        let line = "  9foo ";
        assert!(!triggers.matches(line, line.len(), "objc"));
    }

    #[test]
    fn test_objc_method_composition() {
        let triggers = PreparedTriggers::default();
        let line = "x = [[NSObject alloc] ";
        assert!(triggers.matches(line, line.len(), "objc"));
    }

    #[test]
    fn test_unknown_filetype() {
        let triggers = PreparedTriggers::default();
        assert!(triggers.matching_trigger("foo.", 4, "haskell").is_none());
    }

    #[test]
    fn test_empty_line_and_out_of_range() {
        let triggers = PreparedTriggers::default();
        assert!(!triggers.matches("", 0, "c"));
        assert!(!triggers.matches("foo.", 10, "c"));
    }

    #[test]
    fn test_column_counts_chars() {
        let triggers = PreparedTriggers::default();
        let line = "résumé.x";
        assert!(triggers.matches(line, 7, "go"));
        assert!(!triggers.matches(line, 8, "go"));
    }

    #[test]
    fn test_returns_matching_trigger() {
        let triggers = PreparedTriggers::default();
        let found = triggers.matching_trigger("Foo::", 5, "rust").unwrap();
        assert_eq!(found, &compile_trigger_spec("::").unwrap());
    }

    #[test]
    fn test_user_triggers_extend_defaults() {
        let spec = user(&[("c", &["re!\\w+\\("]), ("haskell", &["."])]);
        let triggers = PreparedTriggers::new(Some(&spec), None).unwrap();

        assert!(triggers.matches("printf(", 7, "c"));
        assert!(triggers.matches("foo->", 5, "c"));
        assert!(triggers.matches("Data.", 5, "haskell"));
    }

    #[test]
    fn test_filter_drops_other_filetypes() {
        let filter: HashSet<String> = ["c".to_string()].into_iter().collect();
        let triggers = PreparedTriggers::new(None, Some(&filter)).unwrap();

        assert_eq!(triggers.filetypes().collect::<Vec<_>>(), vec!["c"]);
        assert!(triggers.matches("foo.", 4, "c"));
        assert!(!triggers.matches("foo.", 4, "cpp"));
    }

    #[test]
    fn test_empty_filter_keeps_all_filetypes() {
        let filter = HashSet::new();
        let triggers = PreparedTriggers::new(None, Some(&filter)).unwrap();

        assert_eq!(triggers.table(), default_triggers());
        assert!(triggers.matches("self.", 5, "python"));
    }

    #[test]
    fn test_filter_with_unknown_filetype() {
        let filter: HashSet<String> = ["c".to_string(), "cobol".to_string()]
            .into_iter()
            .collect();
        let triggers = PreparedTriggers::new(None, Some(&filter)).unwrap();
        assert!(triggers.triggers_for("cobol").is_none());
        assert!(triggers.triggers_for("c").is_some());
    }

    #[test]
    fn test_invalid_user_regex_fails_construction() {
        let spec = user(&[("c", &["re!("])]);
        assert!(PreparedTriggers::new(Some(&spec), None).is_err());
    }

    #[test]
    fn test_matching_trigger_in_plain_slice() {
        let triggers = vec![
            compile_trigger_spec("->").unwrap(),
            compile_trigger_spec("::").unwrap(),
        ];
        assert!(matches_trigger_in("a::", 3, &triggers));
        assert!(!matches_trigger_in("a::", 2, &triggers));
    }
}
