//! Symbol records and the workspace-wide symbol table.
//!
//! A [`Symbol`] is one declaration found in one compilation unit. Symbols
//! are immutable once extracted; updating a unit replaces its whole
//! sequence in the [`WorkspaceSymbolTable`].

pub mod query;
pub mod table;

use std::path::PathBuf;

use serde::Serialize;

pub use query::{SymbolDescriptor, TextQuery, WorkspaceSymbolQuery};
pub use table::WorkspaceSymbolTable;

/// Kind of a declared symbol.
///
/// This is the closed taxonomy reported to clients; the mapping from Go
/// declarations is exhaustive so an unhandled declaration form is a
/// compile-time error in the extractor, not a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// A function declared without a receiver
    Function,
    /// A function bound to a receiver type
    Method,
    /// A top-level `var` binding
    Variable,
    /// A top-level `const` binding
    Constant,
    /// A named struct (or any other non-interface named type)
    Class,
    /// A named interface type
    Interface,
    /// A field of a named struct type
    Field,
}

impl SymbolKind {
    /// Lower-case wire name, as used in the canonical record encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Method => "method",
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
            SymbolKind::Field => "field",
        }
    }

    /// Whether this kind is attached to an owning type (method or field).
    ///
    /// Attached symbols sort after all package-level declarations in the
    /// canonical workspace order.
    pub fn is_attached(&self) -> bool {
        matches!(self, SymbolKind::Method | SymbolKind::Field)
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declaration found in one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Identifier as written in the source
    pub name: String,
    /// `name`, or `Owner.name` for fields and receiver-bound functions
    pub qualified_name: String,
    /// Declaration kind
    pub kind: SymbolKind,
    /// Visible outside the declaring package (every dotted component of
    /// the qualified name is capitalized)
    pub exported: bool,
    /// Absolute path of the declaring compilation unit
    pub path: PathBuf,
    /// Workspace-relative unit path with `/` separators
    pub rel_path: String,
    /// 1-based line of the identifier's first character
    pub line: u32,
    /// 1-based column of the identifier's first character
    pub column: u32,
    /// Workspace-relative directory of the unit, `""` for the root
    pub dir: String,
    /// Import path of the owning package
    pub import_path: String,
    /// Declared package name of the owning unit
    pub package_name: String,
    /// Receiver type name when `kind == Method`, else empty
    pub receiver: String,
    /// The unit lives under a vendored-dependency subtree
    pub vendored: bool,
}

impl Symbol {
    /// Canonical identity, matched exactly by the descriptor `id` key.
    pub fn id(&self) -> String {
        format!("{}/-/{}", self.import_path, self.name)
    }

    /// Unit file name without the `.go` extension, used for the
    /// file-name fallback group in free-text matching.
    pub fn file_stem(&self) -> &str {
        let base = self
            .rel_path
            .rsplit('/')
            .next()
            .unwrap_or(self.rel_path.as_str());
        base.strip_suffix(".go").unwrap_or(base)
    }
}

/// Whether an identifier is exported under the Go naming convention.
pub fn is_exported_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Exported status of a possibly qualified name: every dotted component
/// must itself be exported. An exported field of an unexported type is
/// not reachable from outside the package.
pub fn is_exported_qualified(qualified: &str) -> bool {
    !qualified.is_empty() && qualified.split('.').all(is_exported_name)
}
