//! Go package loader.
//!
//! Discovers the compilation units of a workspace root: walks the tree
//! respecting .gitignore and configured ignore patterns, reads each
//! unit's package clause, resolves import paths and classifies vendored
//! subtrees. The loader owns the one-production-package-per-directory
//! rule; the extractor and table never see the dropped units.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::config::LoaderConfig;
use crate::location::{parent_dir, slash_path};

/// One discovered compilation unit, before extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Absolute file path
    pub path: PathBuf,
    /// Workspace-relative path with `/` separators
    pub rel_path: String,
    /// Workspace-relative directory, `""` for the root
    pub dir: String,
    /// Import path of the owning package
    pub import_path: String,
    /// Declared package name
    pub package_name: String,
    /// The unit lives under a `vendor/` subtree
    pub vendored: bool,
}

/// Walks a workspace root and returns its compilation units.
pub struct PackageLoader {
    config: LoaderConfig,
}

impl PackageLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Discover the compilation units under `root`, sorted by their
    /// workspace-relative path.
    pub fn discover(&self, root: &Path) -> Result<Vec<CompilationUnit>> {
        let module = self.module_path(root);
        debug!("Discovering units under {} (module {})", root.display(), module);

        let mut by_dir: BTreeMap<String, Vec<(String, PathBuf, String)>> = BTreeMap::new();

        for path in self.walk(root) {
            let rel = path
                .strip_prefix(root)
                .map(slash_path)
                .with_context(|| format!("{} escaped root {}", path.display(), root.display()))?;

            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;

            let Some(package_name) = package_clause(&source) else {
                warn!("{}: no package clause, skipping", rel);
                continue;
            };

            by_dir
                .entry(parent_dir(&rel))
                .or_default()
                .push((rel, path, package_name));
        }

        let mut units = Vec::new();
        for (dir, mut files) in by_dir {
            files.sort_by(|a, b| a.0.cmp(&b.0));

            let chosen = choose_package(&dir, root, &files);
            let vendored = is_vendored_dir(&dir);
            let import_path = import_path_for(&module, &dir, vendored);

            for (rel_path, path, package_name) in files {
                if package_name != chosen && package_name != format!("{}_test", chosen) {
                    warn!(
                        "{}: package {} shadowed by package {} in the same directory, dropping",
                        rel_path, package_name, chosen
                    );
                    continue;
                }
                units.push(CompilationUnit {
                    path,
                    rel_path,
                    dir: dir.clone(),
                    import_path: import_path.clone(),
                    package_name,
                    vendored,
                });
            }
        }

        units.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        debug!("Discovered {} units under {}", units.len(), root.display());
        Ok(units)
    }

    /// Discover the single unit for `rel_path`, if the loader still
    /// attributes it to the directory's production package.
    pub fn discover_unit(&self, root: &Path, rel_path: &str) -> Result<Option<CompilationUnit>> {
        Ok(self
            .discover(root)?
            .into_iter()
            .find(|u| u.rel_path == rel_path))
    }

    fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> + '_ {
        let mut builder = WalkBuilder::new(root);
        builder.git_ignore(true);
        builder.git_global(true);
        builder.git_exclude(true);
        builder.hidden(true);

        let ignore_patterns = self.config.ignore_patterns.clone();

        builder
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("go"))
            .filter(move |path| {
                !path.components().any(|c| {
                    c.as_os_str()
                        .to_str()
                        .map(|name| ignore_patterns.iter().any(|p| p == name))
                        .unwrap_or(false)
                })
            })
    }

    /// Module import path of the root: configuration wins, then the
    /// `module` directive of `go.mod`, then the root directory name.
    fn module_path(&self, root: &Path) -> String {
        if let Some(module) = &self.config.module_path {
            return module.clone();
        }
        if let Some(module) = read_go_mod_module(root) {
            return module;
        }
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Read the `module` directive from `<root>/go.mod`.
fn read_go_mod_module(root: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(root.join("go.mod")).ok()?;
    for line in raw.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("module") {
            if rest.starts_with(char::is_whitespace) {
                let rest = rest.trim();
                if !rest.is_empty() {
                    return Some(rest.trim_matches('"').to_string());
                }
            }
        }
    }
    None
}

/// Production package for a directory holding several package names:
/// prefer the package named after the directory, then the
/// lexicographically-first non-`main` name, then the first name.
/// External `<pkg>_test` packages ride along with their base package.
fn choose_package(dir: &str, root: &Path, files: &[(String, PathBuf, String)]) -> String {
    let mut base_names: Vec<&str> = files
        .iter()
        .map(|(_, _, pkg)| pkg.strip_suffix("_test").unwrap_or(pkg))
        .collect();
    base_names.sort_unstable();
    base_names.dedup();

    if base_names.len() <= 1 {
        return base_names.first().copied().unwrap_or_default().to_string();
    }

    let dir_base = match dir.rsplit_once('/') {
        Some((_, base)) => base.to_string(),
        None if dir.is_empty() => root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        None => dir.to_string(),
    };

    if let Some(name) = base_names.iter().find(|n| **n == dir_base) {
        return name.to_string();
    }
    base_names
        .iter()
        .find(|n| **n != "main")
        .or(base_names.first())
        .copied()
        .unwrap_or_default()
        .to_string()
}

fn is_vendored_dir(dir: &str) -> bool {
    dir.split('/').any(|c| c == "vendor")
}

/// Import path of a unit directory. Vendored units take the path
/// remainder after the last `vendor/` segment, mirroring how the
/// analyzed language resolves vendored imports.
fn import_path_for(module: &str, dir: &str, vendored: bool) -> String {
    if vendored {
        if let Some(idx) = dir.rfind("vendor/") {
            return dir[idx + "vendor/".len()..].to_string();
        }
    }
    if dir.is_empty() {
        module.to_string()
    } else if module.is_empty() {
        dir.to_string()
    } else {
        format!("{}/{}", module, dir)
    }
}

/// Extract the package clause identifier from source text, skipping
/// leading comments. Returns `None` when the file declares no package.
pub fn package_clause(source: &str) -> Option<String> {
    let mut in_block_comment = false;

    for line in source.lines() {
        let mut rest = line.trim_start();

        loop {
            if in_block_comment {
                match rest.find("*/") {
                    Some(idx) => {
                        rest = rest[idx + 2..].trim_start();
                        in_block_comment = false;
                    }
                    None => {
                        rest = "";
                        break;
                    }
                }
            } else if rest.starts_with("//") || rest.is_empty() {
                rest = "";
                break;
            } else if rest.starts_with("/*") {
                in_block_comment = true;
                rest = &rest[2..];
            } else {
                break;
            }
        }

        if rest.is_empty() {
            continue;
        }

        let name = rest.strip_prefix("package")?;
        let name = name.trim_start();
        let ident: String = name
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        return if ident.is_empty() { None } else { Some(ident) };
    }

    None
}
