//! Request adapter for document-symbol and workspace-symbol requests.
//!
//! This is the only layer that sees location identifiers; it converts
//! them at the boundary and hands paths to the engine. Each request is
//! served on its own task; evaluation itself is synchronous and bounded
//! by the loaded index.

use std::path::PathBuf;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::SymbolEngine;
use crate::error::EngineError;
use crate::location::{path_to_uri, rel_unit_path, uri_to_path};
use crate::symbol::{Symbol, SymbolDescriptor, SymbolKind, WorkspaceSymbolQuery};

/// Parameters of a document-symbol request.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentSymbolParams {
    /// Location identifier of the compilation unit
    pub uri: String,
}

/// Parameters of a workspace-symbol request: a free-text query, a
/// structured descriptor, or both (the descriptor wins).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct WorkspaceSymbolParams {
    /// Free-text query with optional `is:exported` / `dir:` tokens
    #[serde(default)]
    pub query: Option<String>,
    /// Structured attribute descriptor
    #[serde(default)]
    pub symbol: Option<SymbolDescriptor>,
}

/// One location-qualified symbol record as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolInformation {
    /// Location identifier of the declaring unit
    pub uri: String,
    /// Lower-cased declaration kind
    pub kind: SymbolKind,
    /// Qualified symbol name
    pub name: String,
    /// 1-based line of the identifier
    pub line: u32,
    /// 1-based column of the identifier
    pub column: u32,
}

impl SymbolInformation {
    fn from_symbol(symbol: &Symbol) -> Self {
        Self {
            uri: path_to_uri(&symbol.path),
            kind: symbol.kind,
            name: symbol.qualified_name.clone(),
            line: symbol.line,
            column: symbol.column,
        }
    }

    /// Canonical external encoding used throughout conformance testing.
    pub fn encode(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.uri, self.kind, self.name, self.line, self.column
        )
    }
}

/// Serves symbol requests for one workspace root.
pub struct SymbolServer {
    root: PathBuf,
    engine: Arc<SymbolEngine>,
}

impl SymbolServer {
    pub fn new(root: PathBuf, engine: Arc<SymbolEngine>) -> Self {
        Self { root, engine }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// List the declarations of one compilation unit in source
    /// declaration order. A file the loader does not attribute to any
    /// loaded package yields an empty list.
    pub async fn document_symbols(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Vec<SymbolInformation>, EngineError> {
        let path = uri_to_path(&params.uri)?;
        let rel_path = rel_unit_path(&self.root, &path)?;
        debug!("Document symbols for {}", rel_path);

        let table = self.engine.table(&self.root).await?;
        let symbols = match table.document_symbols(&rel_path) {
            Some(symbols) => symbols,
            None => return Ok(Vec::new()),
        };
        Ok(symbols.iter().map(SymbolInformation::from_symbol).collect())
    }

    /// Find declarations across the workspace. The result order is the
    /// query engine's: canonical order, with name matches before
    /// file-name matches for free-text patterns.
    pub async fn workspace_symbols(
        &self,
        params: WorkspaceSymbolParams,
    ) -> Result<Vec<SymbolInformation>, EngineError> {
        // When both surfaces are supplied the descriptor wins; the free
        // text is ignored rather than rejected.
        let query = match (params.symbol, params.query) {
            (Some(descriptor), _) => WorkspaceSymbolQuery::Descriptor(descriptor),
            (None, Some(raw)) => WorkspaceSymbolQuery::Text(raw),
            (None, None) => WorkspaceSymbolQuery::Text(String::new()),
        };

        let table = self.engine.table(&self.root).await?;
        let matches = query.evaluate(table.all_symbols());
        Ok(matches.iter().map(SymbolInformation::from_symbol).collect())
    }
}
