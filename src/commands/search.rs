use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::server::WorkspaceSymbolParams;

/// Run the search command: evaluate a free-text workspace-symbol query
/// and print one canonical record per line.
pub async fn run(root: &Path, query: &str, config: &Config) -> Result<()> {
    let server = super::server_for(root, config);
    let records = server
        .workspace_symbols(WorkspaceSymbolParams {
            query: Some(query.to_string()),
            symbol: None,
        })
        .await?;

    if records.is_empty() {
        println!("No symbols matching: {:?}", query);
        return Ok(());
    }
    for record in records {
        println!("{}", record.encode());
    }
    Ok(())
}
