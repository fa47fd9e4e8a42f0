//! Semantic-completion triggers
//!
//! Decides whether the caret sits right after a language-specific trigger
//! (`->`, `::`, `.`, or a structural regex) so a completion engine can switch
//! from lexical to semantic completion, and recognizes `#include`/`#import`
//! statements for include-path completion.
//!
//! # Architecture
//!
//! 1. **Trigger specs** ([`TriggerSpec`]): literal strings, or raw regexes
//!    behind the `re!` prefix, compiled to a single [`CompiledTrigger`] form
//! 2. **Tables** ([`FiletypeTriggerTable`]): comma-joined filetype keys fanned
//!    out to per-filetype [`TriggerSet`]s, combined by set union
//! 3. **Defaults** ([`default_triggers`]): the built-in table, compiled once
//!    per process and shared read-only
//! 4. **Matching** ([`PreparedTriggers`]): defaults plus user triggers,
//!    optionally filtered to a set of filetypes, queried per request
//! 5. **Include parsing** ([`parse_include_statement`]): single-line, stateless
//!
//! # Example
//!
//! ```ignore
//! use semantic_triggers::{ConfigFormat, ConfigLoader, PreparedTriggers};
//!
//! let config = ConfigLoader::load_from_string(
//!     "triggers:\n  haskell: [\".\"]\n",
//!     ConfigFormat::Yaml,
//! )?;
//! let triggers = config.prepare()?;
//!
//! assert!(triggers.matches("Data.Map.", 9, "haskell"));
//! assert!(triggers.matches("self.", 5, "python"));
//! assert!(!triggers.matches("self.x", 6, "python"));
//! ```
pub mod config;
pub mod defaults;
pub mod error;
pub mod include;
pub mod matcher;
pub mod table;
pub mod trigger;

pub use config::{ConfigFormat, ConfigLoader, TriggerConfig};
pub use defaults::{
    default_trigger_spec, default_triggers, spec_table_from, DEFAULT_FILETYPE_TRIGGERS,
};
pub use error::{TriggerError, TriggerResult};
pub use include::{is_include_statement_start, parse_include_statement, IncludeMatch};
pub use matcher::{matches_trigger_in, matching_trigger_in, PreparedTriggers};
pub use table::{FiletypeTriggerTable, TriggerSet, TriggerSpecTable};
pub use trigger::{compile_trigger_spec, CompiledTrigger, TriggerSpec, TRIGGER_REGEX_PREFIX};
