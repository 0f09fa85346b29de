//! Test workspaces built from inline Go sources.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use symdex::config::LoaderConfig;
use symdex::loader::PackageLoader;
use symdex::server::{DocumentSymbolParams, WorkspaceSymbolParams};
use symdex::symbol::SymbolDescriptor;
use symdex::{SymbolEngine, SymbolServer};

/// A temporary workspace root with a request server over it.
pub struct Workspace {
    dir: TempDir,
    pub engine: Arc<SymbolEngine>,
    pub server: SymbolServer,
}

/// Write `files` (relative path, source) into a fresh workspace rooted
/// at a temp directory, with `module` as its import path.
pub fn workspace(module: &str, files: &[(&str, &str)]) -> Workspace {
    let dir = tempfile::tempdir().expect("create temp workspace");
    for (rel, source) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture directory");
        }
        fs::write(path, source).expect("write fixture file");
    }

    let loader = PackageLoader::new(LoaderConfig {
        module_path: Some(module.to_string()),
        ..Default::default()
    });
    let engine = Arc::new(SymbolEngine::new(loader));
    let server = SymbolServer::new(dir.path().to_path_buf(), engine.clone());

    Workspace { dir, engine, server }
}

impl Workspace {
    pub fn root(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn uri(&self, rel: &str) -> String {
        format!("file://{}/{}", self.dir.path().display(), rel)
    }

    /// Expected records: `"a.go:function:A:1:17"` forms, prefixed with
    /// this workspace's location.
    pub fn expect(&self, specs: &[&str]) -> Vec<String> {
        specs
            .iter()
            .map(|spec| format!("file://{}/{}", self.dir.path().display(), spec))
            .collect()
    }

    /// Encoded document-symbol records for one unit.
    pub async fn document(&self, rel: &str) -> Vec<String> {
        self.server
            .document_symbols(DocumentSymbolParams { uri: self.uri(rel) })
            .await
            .expect("document symbol request failed")
            .iter()
            .map(|s| s.encode())
            .collect()
    }

    /// Encoded workspace-symbol records for a free-text query.
    pub async fn query(&self, query: &str) -> Vec<String> {
        self.server
            .workspace_symbols(WorkspaceSymbolParams {
                query: Some(query.to_string()),
                symbol: None,
            })
            .await
            .expect("workspace symbol request failed")
            .iter()
            .map(|s| s.encode())
            .collect()
    }

    /// Encoded workspace-symbol records for a structured descriptor.
    pub async fn lookup(&self, descriptor: SymbolDescriptor) -> Vec<String> {
        self.server
            .workspace_symbols(WorkspaceSymbolParams {
                query: None,
                symbol: Some(descriptor),
            })
            .await
            .expect("workspace symbol request failed")
            .iter()
            .map(|s| s.encode())
            .collect()
    }
}

/// Two single-function units in one package.
pub fn basic_workspace() -> Workspace {
    workspace(
        "test/pkg",
        &[
            ("a.go", "package p; func A() { A() }"),
            ("b.go", "package p; func B() { B() }"),
        ],
    )
}

/// One struct with one field.
pub fn detailed_workspace() -> Workspace {
    workspace("test/pkg", &[("a.go", "package p; type T struct { F string }")])
}

/// An exported field on an unexported type.
pub fn exported_workspace() -> Workspace {
    workspace("test/pkg", &[("a.go", "package p; type t struct { F string }")])
}

/// A root-level unit and a nested directory unit.
pub fn subdirectory_workspace() -> Workspace {
    workspace(
        "test/pkg/d",
        &[
            ("a.go", "package d; func A() { A() }"),
            (
                "d2/b.go",
                "package d2; import \"test/pkg/d\"; func B() { d.A() }",
            ),
        ],
    )
}

/// Two production packages sharing one directory.
pub fn multiple_package_workspace() -> Workspace {
    workspace(
        "test/pkg",
        &[
            ("a.go", "package p; func A() { A() }"),
            ("b.go", "package q; func B() { B() }"),
        ],
    )
}

/// In-package and external test-variant units.
pub fn xtest_workspace() -> Workspace {
    workspace(
        "test/pkg",
        &[
            ("a.go", "package p; func A() { A() }"),
            ("b_test.go", "package p; func Y() { Y() }"),
            ("y_test.go", "package p_test; func Y() { Y() }"),
        ],
    )
}

/// The full declaration-kind spread across four units.
pub fn symbols_workspace() -> Workspace {
    let abc = "package a\n\
               \n\
               type XYZ struct{}\n\
               \n\
               func (x XYZ) ABC() {}\n\
               \n\
               var (\n\
               \tA = 1\n\
               )\n\
               \n\
               const (\n\
               \tB = 2\n\
               )\n\
               \n\
               \n\
               type (\n\
               \tC struct{}\n\
               )\n\
               \n\
               type UVW interface{}\n\
               \n\
               type T struct{}\n";
    let bcd = "package a\n\
               \n\
               type YZA struct{}\n\
               \n\
               func (y YZA) BCD() {}\n";
    let cde = "package a\n\
               \n\
               var (\n\
               \ta, b = 1, 2\n\
               \tc = 3\n\
               )\n";
    let xyz = "package a\n\
               \n\
               func yza() {}\n";

    workspace(
        "test/pkg",
        &[
            ("abc.go", abc),
            ("bcd.go", bcd),
            ("cde.go", cde),
            ("xyz.go", xyz),
        ],
    )
}

/// A method whose receiver type is declared in a different unit.
pub fn split_receiver_workspace() -> Workspace {
    workspace(
        "test/pkg",
        &[
            ("abc.go", "package p\ntype XYZ struct{}\n"),
            ("bcd.go", "package p\nfunc (x XYZ) ABC() {}\n"),
        ],
    )
}

/// A project-owned unit next to a vendored dependency tree.
pub fn vendored_workspace() -> Workspace {
    workspace(
        "test/pkg",
        &[
            ("a.go", "package p; func A() { A() }"),
            ("vendor/foo/b.go", "package foo; func B() { B() }"),
        ],
    )
}
