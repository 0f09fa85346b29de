//! Symbol extraction from parsed compilation units.
//!
//! Walks a tree-sitter Go parse tree and emits one [`Symbol`] per
//! top-level declaration, in source declaration order. Struct fields are
//! emitted at their structural position inside the owning type, qualified
//! as `Type.Field`. Methods are emitted at their own position with the
//! receiver type name as written; the receiver's declaration may live in
//! a different unit entirely.

use anyhow::{anyhow, Context, Result};
use tree_sitter::{Node, Parser, Tree};

use crate::loader::CompilationUnit;
use crate::symbol::{is_exported_qualified, Symbol, SymbolKind};

/// Extracts the symbol sequence of one compilation unit.
pub struct SymbolExtractor {
    parser: Parser,
}

impl SymbolExtractor {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .context("Failed to load Go grammar")?;
        Ok(Self { parser })
    }

    /// Parse `source` and extract the unit's symbols, sorted ascending by
    /// (line, column) of the declared identifier.
    pub fn extract_unit(&mut self, unit: &CompilationUnit, source: &str) -> Result<Vec<Symbol>> {
        let tree = self
            .parser
            .parse(source.as_bytes(), None)
            .ok_or_else(|| anyhow!("Failed to parse {}", unit.rel_path))?;

        let mut symbols = self.extract_tree(&tree, source.as_bytes(), unit);
        symbols.sort_by_key(|s| (s.line, s.column));
        Ok(symbols)
    }

    fn extract_tree(&self, tree: &Tree, source: &[u8], unit: &CompilationUnit) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        let root = tree.root_node();
        let mut cursor = root.walk();

        for decl in root.named_children(&mut cursor) {
            match decl.kind() {
                "function_declaration" => {
                    if let Some(name) = decl.child_by_field_name("name") {
                        symbols.push(self.symbol_at(
                            &name,
                            source,
                            unit,
                            SymbolKind::Function,
                            None,
                        ));
                    }
                }
                "method_declaration" => {
                    if let Some(name) = decl.child_by_field_name("name") {
                        let receiver = receiver_type_name(&decl, source);
                        symbols.push(self.symbol_at(
                            &name,
                            source,
                            unit,
                            SymbolKind::Method,
                            receiver.as_deref(),
                        ));
                    }
                }
                "type_declaration" => {
                    self.extract_type_declaration(&decl, source, unit, &mut symbols);
                }
                "var_declaration" => {
                    self.extract_value_declaration(
                        &decl,
                        "var_spec",
                        source,
                        unit,
                        SymbolKind::Variable,
                        &mut symbols,
                    );
                }
                "const_declaration" => {
                    self.extract_value_declaration(
                        &decl,
                        "const_spec",
                        source,
                        unit,
                        SymbolKind::Constant,
                        &mut symbols,
                    );
                }
                _ => {}
            }
        }

        symbols
    }

    /// A `type` declaration holds one or more type specs (and alias
    /// forms). Struct and interface specs map to class/interface; every
    /// other named type also reports as class.
    fn extract_type_declaration(
        &self,
        decl: &Node,
        source: &[u8],
        unit: &CompilationUnit,
        symbols: &mut Vec<Symbol>,
    ) {
        let mut cursor = decl.walk();
        for spec in decl.named_children(&mut cursor) {
            if spec.kind() != "type_spec" && spec.kind() != "type_alias" {
                continue;
            }
            let Some(name) = spec.child_by_field_name("name") else {
                continue;
            };

            let type_node = spec.child_by_field_name("type");
            let kind = match type_node.as_ref().map(|n| n.kind()) {
                Some("interface_type") => SymbolKind::Interface,
                _ => SymbolKind::Class,
            };
            symbols.push(self.symbol_at(&name, source, unit, kind, None));

            if let Some(type_node) = type_node {
                if type_node.kind() == "struct_type" {
                    let owner = node_text(&name, source).to_string();
                    self.extract_struct_fields(&type_node, &owner, source, unit, symbols);
                }
            }
        }
    }

    /// Fields are emitted right after their owning type, qualified as
    /// `Type.Field`. Embedded (unnamed) fields carry no identifier of
    /// their own and are skipped.
    fn extract_struct_fields(
        &self,
        struct_node: &Node,
        owner: &str,
        source: &[u8],
        unit: &CompilationUnit,
        symbols: &mut Vec<Symbol>,
    ) {
        let mut cursor = struct_node.walk();
        for child in struct_node.named_children(&mut cursor) {
            if child.kind() != "field_declaration_list" {
                continue;
            }
            let mut field_cursor = child.walk();
            for field in child.named_children(&mut field_cursor) {
                if field.kind() != "field_declaration" {
                    continue;
                }
                let mut name_cursor = field.walk();
                for name in field.children_by_field_name("name", &mut name_cursor) {
                    symbols.push(self.symbol_at(
                        &name,
                        source,
                        unit,
                        SymbolKind::Field,
                        Some(owner),
                    ));
                }
            }
        }
    }

    /// `var` and `const` declarations hold one or more specs, each
    /// declaring one or more names (`var a, b = 1, 2`).
    fn extract_value_declaration(
        &self,
        decl: &Node,
        spec_kind: &str,
        source: &[u8],
        unit: &CompilationUnit,
        kind: SymbolKind,
        symbols: &mut Vec<Symbol>,
    ) {
        let mut cursor = decl.walk();
        for spec in decl.named_children(&mut cursor) {
            if spec.kind() != spec_kind {
                continue;
            }
            let mut name_cursor = spec.walk();
            for name in spec.children_by_field_name("name", &mut name_cursor) {
                symbols.push(self.symbol_at(&name, source, unit, kind, None));
            }
        }
    }

    fn symbol_at(
        &self,
        name_node: &Node,
        source: &[u8],
        unit: &CompilationUnit,
        kind: SymbolKind,
        owner: Option<&str>,
    ) -> Symbol {
        let name = node_text(name_node, source).to_string();
        let qualified_name = match owner {
            Some(owner) if !owner.is_empty() => format!("{}.{}", owner, name),
            _ => name.clone(),
        };
        let receiver = match kind {
            SymbolKind::Method => owner.unwrap_or_default().to_string(),
            _ => String::new(),
        };
        let position = name_node.start_position();

        Symbol {
            exported: is_exported_qualified(&qualified_name),
            name,
            qualified_name,
            kind,
            path: unit.path.clone(),
            rel_path: unit.rel_path.clone(),
            line: position.row as u32 + 1,
            column: position.column as u32 + 1,
            dir: unit.dir.clone(),
            import_path: unit.import_path.clone(),
            package_name: unit.package_name.clone(),
            receiver,
            vendored: unit.vendored,
        }
    }
}

/// Receiver type name as written at the declaration, with any pointer
/// star and type-parameter list stripped.
fn receiver_type_name(method: &Node, source: &[u8]) -> Option<String> {
    let receiver = method.child_by_field_name("receiver")?;
    let mut cursor = receiver.walk();
    for param in receiver.named_children(&mut cursor) {
        if param.kind() != "parameter_declaration" {
            continue;
        }
        if let Some(type_node) = param.child_by_field_name("type") {
            let text = node_text(&type_node, source).trim_start_matches('*');
            let name = text.split('[').next().unwrap_or(text);
            return Some(name.to_string());
        }
    }
    None
}

fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.start_byte()..node.end_byte()]).unwrap_or("")
}
