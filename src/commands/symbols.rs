use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::Config;
use crate::location::path_to_uri;
use crate::server::DocumentSymbolParams;

/// Run the symbols command: print one file's declarations in source
/// declaration order, one canonical record per line.
pub async fn run(root: &Path, file: &Path, config: &Config) -> Result<()> {
    let path: PathBuf = if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    };

    let server = super::server_for(root, config);
    let records = server
        .document_symbols(DocumentSymbolParams {
            uri: path_to_uri(&path),
        })
        .await?;

    if records.is_empty() {
        println!("No symbols in {}", path.display());
        return Ok(());
    }
    for record in records {
        println!("{}", record.encode());
    }
    Ok(())
}
