use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::server::WorkspaceSymbolParams;
use crate::symbol::SymbolDescriptor;

/// Run the lookup command: evaluate a structured descriptor built from
/// command-line flags and print one canonical record per line.
pub async fn run(root: &Path, descriptor: SymbolDescriptor, config: &Config) -> Result<()> {
    let server = super::server_for(root, config);
    let records = server
        .workspace_symbols(WorkspaceSymbolParams {
            query: None,
            symbol: Some(descriptor),
        })
        .await?;

    if records.is_empty() {
        println!("No symbols matching descriptor");
        return Ok(());
    }
    for record in records {
        println!("{}", record.encode());
    }
    Ok(())
}
