//! CLI command implementations.

pub mod index;
pub mod lookup;
pub mod search;
pub mod symbols;

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::engine::SymbolEngine;
use crate::loader::PackageLoader;
use crate::server::SymbolServer;

/// Build a request server over `root` from configuration.
fn server_for(root: &Path, config: &Config) -> SymbolServer {
    let loader = PackageLoader::new(config.loader.clone());
    SymbolServer::new(root.to_path_buf(), Arc::new(SymbolEngine::new(loader)))
}
