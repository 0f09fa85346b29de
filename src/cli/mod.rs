use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "symdex")]
#[command(author, version, about = "Symbol indexing and query engine for Go workspaces")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Workspace root (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index the workspace and print summary statistics
    Index,

    /// List the declarations of one file in source order
    Symbols {
        /// File path, absolute or relative to the workspace root
        file: PathBuf,
    },

    /// Query workspace symbols with free text
    ///
    /// `is:exported` and `dir:<path>` tokens filter the result set; the
    /// remaining tokens match symbol names case-insensitively.
    Search {
        /// Query string (empty lists every symbol in canonical order)
        #[arg(default_value = "")]
        query: String,
    },

    /// Look up workspace symbols by structured attributes
    Lookup {
        /// Package import path
        #[arg(long)]
        package: Option<String>,

        /// Unqualified symbol name
        #[arg(long)]
        name: Option<String>,

        /// Declared package name
        #[arg(long)]
        package_name: Option<String>,

        /// Receiver type name (use "" to match non-methods)
        #[arg(long)]
        recv: Option<String>,

        /// Vendored-unit flag
        #[arg(long)]
        vendor: Option<bool>,

        /// Canonical identity `package/-/name` (overrides other keys)
        #[arg(long)]
        id: Option<String>,
    },
}
