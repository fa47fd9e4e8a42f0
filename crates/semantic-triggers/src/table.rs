//! Per-filetype trigger tables
//!
//! Configuration names triggers under comma-joined filetype keys
//! (`"cpp,objcpp"`). [`FiletypeTriggerTable::from_spec`] fans each key out to
//! its filetypes and compiles the triggers; [`FiletypeTriggerTable::union`]
//! layers two tables without mutating either.

use crate::error::TriggerResult;
use crate::trigger::{compile_trigger_spec, CompiledTrigger};
use indexmap::IndexSet;
use std::collections::{BTreeMap, HashMap};

/// Input format: comma-joined filetype list → trigger spec strings
pub type TriggerSpecTable = BTreeMap<String, Vec<String>>;

/// Deduplicated set of compiled triggers for one filetype
///
/// Iteration follows first insertion. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerSet {
    triggers: IndexSet<CompiledTrigger>,
}

impl TriggerSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trigger; returns false if an equal pattern was already present
    pub fn insert(&mut self, trigger: CompiledTrigger) -> bool {
        self.triggers.insert(trigger)
    }

    /// Add every trigger not already present, keeping first-insertion order
    pub fn extend<I: IntoIterator<Item = CompiledTrigger>>(&mut self, triggers: I) {
        self.triggers.extend(triggers);
    }

    pub fn contains(&self, trigger: &CompiledTrigger) -> bool {
        self.triggers.contains(trigger)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledTrigger> {
        self.triggers.iter()
    }
}

impl<'a> IntoIterator for &'a TriggerSet {
    type Item = &'a CompiledTrigger;
    type IntoIter = indexmap::set::Iter<'a, CompiledTrigger>;

    fn into_iter(self) -> Self::IntoIter {
        self.triggers.iter()
    }
}

impl FromIterator<CompiledTrigger> for TriggerSet {
    fn from_iter<I: IntoIterator<Item = CompiledTrigger>>(iter: I) -> Self {
        Self {
            triggers: iter.into_iter().collect(),
        }
    }
}

/// Filetype identifier → trigger set
///
/// A filetype without an entry behaves exactly like one with an empty set.
#[derive(Debug, Clone, Default)]
pub struct FiletypeTriggerTable {
    entries: HashMap<String, TriggerSet>,
}

impl FiletypeTriggerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand a spec table into compiled per-filetype sets
    ///
    /// Keys are split on `,` with no trimming; an empty component is kept as
    /// a filetype named `""`. A filetype named under several keys accumulates
    /// all of their triggers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TriggerError::InvalidPattern`] for the first `re!`
    /// spec that fails to compile.
    pub fn from_spec(spec: &TriggerSpecTable) -> TriggerResult<Self> {
        let mut table = Self::new();

        for (key, specs) in spec {
            let compiled = specs
                .iter()
                .map(|s| compile_trigger_spec(s))
                .collect::<TriggerResult<Vec<_>>>()?;

            for filetype in key.split(',') {
                table.entry(filetype).extend(compiled.iter().cloned());
            }
        }

        Ok(table)
    }

    /// New table holding, per filetype, the union of both sides
    ///
    /// Entries from `self` come first in each set's iteration order.
    pub fn union(&self, other: &FiletypeTriggerTable) -> FiletypeTriggerTable {
        let mut merged = self.clone();
        for (filetype, triggers) in &other.entries {
            merged.entry(filetype).extend(triggers.iter().cloned());
        }
        merged
    }

    /// Keep only the filetypes accepted by `keep`
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.entries.retain(|filetype, _| keep(filetype.as_str()));
    }

    pub fn get(&self, filetype: &str) -> Option<&TriggerSet> {
        self.entries.get(filetype)
    }

    pub fn contains_filetype(&self, filetype: &str) -> bool {
        self.entries.contains_key(filetype)
    }

    pub fn filetypes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&mut self, filetype: &str) -> &mut TriggerSet {
        self.entries.entry(filetype.to_string()).or_default()
    }
}

/// Tables compare as maps of sets; an empty entry equals an absent one
impl PartialEq for FiletypeTriggerTable {
    fn eq(&self, other: &Self) -> bool {
        let covers = |a: &Self, b: &Self| {
            a.entries
                .iter()
                .all(|(filetype, set)| match b.entries.get(filetype) {
                    Some(other_set) => set == other_set,
                    None => set.is_empty(),
                })
        };
        covers(self, other) && covers(other, self)
    }
}

impl Eq for FiletypeTriggerTable {}
