pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod loader;
pub mod location;
pub mod logging;
pub mod server;
pub mod symbol;

pub use config::Config;
pub use engine::SymbolEngine;
pub use error::EngineError;
pub use server::{DocumentSymbolParams, SymbolInformation, SymbolServer, WorkspaceSymbolParams};
pub use symbol::{Symbol, SymbolDescriptor, SymbolKind, WorkspaceSymbolTable};
