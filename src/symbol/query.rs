//! Query evaluation over the canonical symbol view.
//!
//! Two incompatible query surfaces share one evaluator: a free-text
//! string with embedded filter tokens, and a structured attribute
//! descriptor. Both consume candidates in canonical order and preserve
//! it; neither ever fails — "no matches" is an empty list.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use super::Symbol;
use crate::location::normalize_dir_filter;

/// A parsed free-text query.
///
/// `is:exported` and `dir:<path>` tokens become filters; every other
/// token (including unrecognized `x:y` forms) joins the substring
/// pattern. Parsing is permissive and never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    pub exported_only: bool,
    pub dir: Option<String>,
    /// Lower-cased substring pattern; empty means "list everything"
    pub pattern: String,
}

impl TextQuery {
    pub fn parse(raw: &str) -> Self {
        let mut exported_only = false;
        let mut dir = None;
        let mut pattern_tokens: Vec<&str> = Vec::new();

        for token in raw.split_whitespace() {
            if token == "is:exported" {
                exported_only = true;
            } else if let Some(path) = token.strip_prefix("dir:") {
                dir = Some(normalize_dir_filter(path));
            } else {
                pattern_tokens.push(token);
            }
        }

        Self {
            exported_only,
            dir,
            pattern: pattern_tokens.join(" ").to_lowercase(),
        }
    }

    fn passes_filters(&self, symbol: &Symbol) -> bool {
        if self.exported_only && !symbol.exported {
            return false;
        }
        match &self.dir {
            Some(dir) => symbol.dir == *dir,
            None => true,
        }
    }

    /// Evaluate against candidates already in canonical order.
    ///
    /// With a pattern, qualified-name matches (group A) precede symbols
    /// matched only through their unit's file stem (group B); canonical
    /// order is preserved within each group and no symbol appears twice.
    pub fn evaluate(&self, candidates: Vec<Symbol>) -> Vec<Symbol> {
        let filtered: Vec<Symbol> = candidates
            .into_iter()
            .filter(|s| self.passes_filters(s))
            .collect();

        if self.pattern.is_empty() {
            return filtered;
        }

        let (mut by_name, rest): (Vec<Symbol>, Vec<Symbol>) = filtered
            .into_iter()
            .partition(|s| s.qualified_name.to_lowercase().contains(&self.pattern));

        let by_file = rest
            .into_iter()
            .filter(|s| s.file_stem().to_lowercase().contains(&self.pattern));

        by_name.extend(by_file);
        by_name
    }
}

/// Structured attribute descriptor. All present keys AND-combine;
/// unrecognized keys are ignored at deserialization. An empty descriptor
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct SymbolDescriptor {
    /// Package import path
    pub package: Option<String>,
    /// Unqualified symbol name
    pub name: Option<String>,
    /// Declared package name
    #[serde(rename = "packageName")]
    pub package_name: Option<String>,
    /// Receiver type name (`""` matches non-methods)
    pub recv: Option<String>,
    /// Vendored-unit flag
    pub vendor: Option<bool>,
    /// Canonical identity `package/-/name`; takes precedence as an
    /// exact-match lookup when present
    pub id: Option<String>,
}

impl SymbolDescriptor {
    pub fn is_empty(&self) -> bool {
        self.package.is_none()
            && self.name.is_none()
            && self.package_name.is_none()
            && self.recv.is_none()
            && self.vendor.is_none()
            && self.id.is_none()
    }

    /// One predicate per present key, AND-combined by the caller.
    fn predicates(&self) -> Vec<Box<dyn Fn(&Symbol) -> bool + '_>> {
        let mut predicates: Vec<Box<dyn Fn(&Symbol) -> bool + '_>> = Vec::new();
        if let Some(package) = &self.package {
            predicates.push(Box::new(move |s| s.import_path == *package));
        }
        if let Some(name) = &self.name {
            predicates.push(Box::new(move |s| s.name == *name));
        }
        if let Some(package_name) = &self.package_name {
            predicates.push(Box::new(move |s| s.package_name == *package_name));
        }
        if let Some(recv) = &self.recv {
            predicates.push(Box::new(move |s| s.receiver == *recv));
        }
        if let Some(vendor) = self.vendor {
            predicates.push(Box::new(move |s| s.vendored == vendor));
        }
        predicates
    }

    /// Evaluate against candidates already in canonical order. The `id`
    /// key short-circuits every other predicate.
    pub fn evaluate(&self, candidates: Vec<Symbol>) -> Vec<Symbol> {
        if let Some(id) = &self.id {
            return candidates.into_iter().filter(|s| s.id() == *id).collect();
        }
        let predicates = self.predicates();
        candidates
            .into_iter()
            .filter(|s| predicates.iter().all(|p| p(s)))
            .collect()
    }
}

/// One workspace-symbol query, either surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceSymbolQuery {
    Text(String),
    Descriptor(SymbolDescriptor),
}

impl WorkspaceSymbolQuery {
    /// Evaluate over candidates in canonical order.
    pub fn evaluate(&self, candidates: Vec<Symbol>) -> Vec<Symbol> {
        match self {
            WorkspaceSymbolQuery::Text(raw) => {
                let query = TextQuery::parse(raw);
                debug!(?query, "Evaluating free-text query");
                query.evaluate(candidates)
            }
            WorkspaceSymbolQuery::Descriptor(descriptor) => {
                debug!(?descriptor, "Evaluating descriptor query");
                descriptor.evaluate(candidates)
            }
        }
    }
}
