use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::engine::SymbolEngine;
use crate::loader::PackageLoader;

/// Run the index command: load the workspace root and report what the
/// table now holds.
pub async fn run(root: &Path, config: &Config) -> Result<()> {
    let engine = SymbolEngine::new(PackageLoader::new(config.loader.clone()));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("Indexing {}", root.display()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let started = Instant::now();
    let table = engine.table(root).await?;
    spinner.finish_and_clear();

    let symbols = table.all_symbols();
    let vendored = symbols.iter().filter(|s| s.vendored).count();
    let exported = symbols.iter().filter(|s| s.exported).count();

    println!(
        "Indexed {} in {:.2}s",
        root.display(),
        started.elapsed().as_secs_f64()
    );
    println!("  units:    {}", table.unit_count());
    println!("  symbols:  {} ({} exported, {} vendored)", symbols.len(), exported, vendored);

    Ok(())
}
