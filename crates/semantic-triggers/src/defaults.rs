/// Built-in trigger table shared by every session
///
/// The table is compiled once on first use and only ever handed out by shared
/// reference.
use crate::table::{FiletypeTriggerTable, TriggerSpecTable};
use once_cell::sync::Lazy;
use tracing::debug;

/// Built-in trigger specs, keyed by comma-joined filetype lists
pub const DEFAULT_FILETYPE_TRIGGERS: &[(&str, &[&str])] = &[
    ("c", &["->", "."]),
    (
        "objc",
        &[
            "->",
            ".",
            // bracketed calls
            r"re!\[[_a-zA-Z]+\w*\s",
            // bracketless calls
            r"re!^\s*[^\W\d]\w*\s",
            // method composition
            r"re!\[.*\]\s",
        ],
    ),
    ("ocaml", &[".", "#"]),
    ("cpp,objcpp", &["->", ".", "::"]),
    ("perl", &["->"]),
    ("php", &["->", "::"]),
    (
        "cs,java,javascript,typescript,d,python,perl6,scala,vb,elixir,go",
        &["."],
    ),
    ("ruby,rust", &[".", "::"]),
    ("lua", &[".", ":"]),
    ("erlang", &[":"]),
];

static PREPARED_DEFAULT_TRIGGERS: Lazy<FiletypeTriggerTable> = Lazy::new(|| {
    let table = FiletypeTriggerTable::from_spec(&default_trigger_spec())
        .expect("built-in trigger patterns are valid");
    debug!("Prepared default triggers for {} filetypes", table.len());
    table
});

/// The built-in specs as a [`TriggerSpecTable`]
pub fn default_trigger_spec() -> TriggerSpecTable {
    spec_table_from(DEFAULT_FILETYPE_TRIGGERS)
}

/// Build a [`TriggerSpecTable`] from `(filetypes, triggers)` pairs
///
/// Pairs sharing a key have their trigger lists concatenated.
pub fn spec_table_from(entries: &[(&str, &[&str])]) -> TriggerSpecTable {
    let mut table = TriggerSpecTable::new();
    for (filetypes, triggers) in entries {
        table
            .entry(filetypes.to_string())
            .or_default()
            .extend(triggers.iter().map(|t| t.to_string()));
    }
    table
}

/// The compiled built-in table
pub fn default_triggers() -> &'static FiletypeTriggerTable {
    &PREPARED_DEFAULT_TRIGGERS
}
