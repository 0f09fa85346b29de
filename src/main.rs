use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use symdex::cli::{Cli, Commands};
use symdex::config::Config;
use symdex::logging::init_logging;
use symdex::symbol::SymbolDescriptor;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let root: PathBuf = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    // Load configuration (if available, otherwise use defaults)
    let config = Config::load(&root).unwrap_or_default();

    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&config.logging, &root)?;

    tracing::info!("symdex starting up");
    tracing::debug!("Workspace root: {}", root.display());

    match cli.command {
        Commands::Index => {
            symdex::commands::index::run(&root, &config).await?;
        }
        Commands::Symbols { file } => {
            symdex::commands::symbols::run(&root, &file, &config).await?;
        }
        Commands::Search { query } => {
            symdex::commands::search::run(&root, &query, &config).await?;
        }
        Commands::Lookup {
            package,
            name,
            package_name,
            recv,
            vendor,
            id,
        } => {
            let descriptor = SymbolDescriptor {
                package,
                name,
                package_name,
                recv,
                vendor,
                id,
            };
            symdex::commands::lookup::run(&root, descriptor, &config).await?;
        }
    }

    Ok(())
}
