//! Per-root lifecycle of the symbol index.
//!
//! A workspace root is loaded lazily, on the first request that touches
//! it. Concurrent first requests share one in-flight load per root; two
//! distinct roots never contend. Extraction across a root's units runs
//! on the rayon pool, one parser per worker unit of work.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::extract::SymbolExtractor;
use crate::loader::{CompilationUnit, PackageLoader};
use crate::symbol::{Symbol, WorkspaceSymbolTable};

type TableCell = Arc<OnceCell<Arc<WorkspaceSymbolTable>>>;

/// Owns the symbol tables of every workspace root touched so far.
pub struct SymbolEngine {
    loader: PackageLoader,
    tables: Mutex<HashMap<PathBuf, TableCell>>,
}

impl SymbolEngine {
    pub fn new(loader: PackageLoader) -> Self {
        Self {
            loader,
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// The symbol table for `root`, loading it on first use. A failed
    /// load is returned to this request and retried by the next one; it
    /// never poisons other roots.
    pub async fn table(&self, root: &Path) -> Result<Arc<WorkspaceSymbolTable>, EngineError> {
        let cell = {
            let mut tables = self.tables.lock().expect("engine table map poisoned");
            tables
                .entry(root.to_path_buf())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        cell.get_or_try_init(|| async {
            self.load_root(root)
                .map(Arc::new)
                .map_err(|e| EngineError::load(root, format!("{:#}", e)))
        })
        .await
        .cloned()
    }

    /// Re-extract one unit and swap its entries wholesale. A unit the
    /// loader no longer attributes to the root is removed instead.
    pub async fn reload_unit(&self, root: &Path, rel_path: &str) -> Result<(), EngineError> {
        let table = self.table(root).await?;
        let unit = self
            .loader
            .discover_unit(root, rel_path)
            .map_err(|e| EngineError::load(root, format!("{:#}", e)))?;

        match unit {
            Some(unit) => {
                let symbols = extract_unit_symbols(&unit)
                    .map_err(|e| EngineError::load(root, format!("{:#}", e)))?;
                debug!("Reloaded {} ({} symbols)", rel_path, symbols.len());
                table.replace(rel_path, symbols);
            }
            None => {
                warn!("{} no longer loads as part of {}", rel_path, root.display());
                table.remove(rel_path);
            }
        }
        Ok(())
    }

    fn load_root(&self, root: &Path) -> Result<WorkspaceSymbolTable> {
        let units = self.loader.discover(root)?;

        let extracted: Vec<(String, Vec<Symbol>)> = units
            .par_iter()
            .map(|unit| {
                let symbols = extract_unit_symbols(unit)?;
                Ok((unit.rel_path.clone(), symbols))
            })
            .collect::<Result<_>>()?;

        let table = WorkspaceSymbolTable::new();
        for (rel_path, symbols) in extracted {
            table.replace(&rel_path, symbols);
        }

        info!(
            "Loaded {}: {} units, {} symbols",
            root.display(),
            table.unit_count(),
            table.symbol_count()
        );
        Ok(table)
    }
}

/// Read and extract one unit from disk.
fn extract_unit_symbols(unit: &CompilationUnit) -> Result<Vec<Symbol>> {
    let source = std::fs::read_to_string(&unit.path)
        .with_context(|| format!("Failed to read {}", unit.path.display()))?;
    let mut extractor = SymbolExtractor::new()?;
    extractor.extract_unit(unit, &source)
}
