//! Workspace-wide symbol table.
//!
//! One table per workspace root. Each compilation unit owns an immutable
//! `Arc<[Symbol]>` slice; replacement swaps the whole slice under a write
//! lock held only for the swap, so a query running concurrently observes
//! either the old or the new sequence for any given unit, never a mix.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::Symbol;

/// Mapping from compilation-unit identifier (workspace-relative path) to
/// its ordered symbol sequence.
pub struct WorkspaceSymbolTable {
    units: RwLock<BTreeMap<String, Arc<[Symbol]>>>,
}

impl WorkspaceSymbolTable {
    pub fn new() -> Self {
        Self {
            units: RwLock::new(BTreeMap::new()),
        }
    }

    /// Atomically replace one unit's entries. The previous entries, if
    /// any, are discarded wholesale; there is no partial patching.
    pub fn replace(&self, rel_path: &str, symbols: Vec<Symbol>) {
        let entry: Arc<[Symbol]> = symbols.into();
        let mut units = self.units.write().expect("symbol table lock poisoned");
        units.insert(rel_path.to_string(), entry);
    }

    /// Drop one unit's entries entirely (unit removal).
    pub fn remove(&self, rel_path: &str) {
        let mut units = self.units.write().expect("symbol table lock poisoned");
        if units.remove(rel_path).is_some() {
            debug!("Removed symbols for {}", rel_path);
        }
    }

    /// The stored source-order sequence for one unit, or `None` when the
    /// unit is unknown to this table.
    pub fn document_symbols(&self, rel_path: &str) -> Option<Arc<[Symbol]>> {
        let units = self.units.read().expect("symbol table lock poisoned");
        units.get(rel_path).cloned()
    }

    /// Number of loaded units.
    pub fn unit_count(&self) -> usize {
        self.units.read().expect("symbol table lock poisoned").len()
    }

    /// Total number of symbols across all units.
    pub fn symbol_count(&self) -> usize {
        let units = self.units.read().expect("symbol table lock poisoned");
        units.values().map(|s| s.len()).sum()
    }

    /// The flat view in canonical order: package-level declarations for
    /// every unit (units lexicographic by relative path, names
    /// lexicographic within a unit), then every method and field symbol,
    /// ordered the same way. The sort is imposed here precisely because
    /// the underlying declaration enumeration carries no usable order.
    pub fn all_symbols(&self) -> Vec<Symbol> {
        let snapshot: Vec<Arc<[Symbol]>> = {
            let units = self.units.read().expect("symbol table lock poisoned");
            units.values().cloned().collect()
        };

        let mut flat: Vec<Symbol> = snapshot
            .iter()
            .flat_map(|unit| unit.iter().cloned())
            .collect();
        flat.sort_by(|a, b| canonical_key(a).cmp(&canonical_key(b)));
        flat
    }
}

impl Default for WorkspaceSymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical total order of the flat view. Line and column break ties
/// between identically named declarations so repeated queries stay
/// byte-identical.
fn canonical_key(s: &Symbol) -> (bool, &str, &str, u32, u32) {
    (
        s.kind.is_attached(),
        s.rel_path.as_str(),
        s.qualified_name.as_str(),
        s.line,
        s.column,
    )
}
