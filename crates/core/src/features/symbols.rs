//! Document outline.

use crate::ast::NodeKind;
use crate::engine::DocumentSnapshot;
use crate::index::AstIndex;
use crate::symbols::declared_variable;
use groovyscope_api::models::{DocumentSymbol, NodeId, SymbolKind};

/// Classes with their members, then script-level methods and variables,
/// in source order. Synthetic classes are flattened into their parent.
pub fn document_symbols(snapshot: &DocumentSnapshot) -> Vec<DocumentSymbol> {
    let index = &snapshot.index;
    match index.root() {
        Some(root) => outline(snapshot, index, root.id, true),
        None => Vec::new(),
    }
}

fn outline(
    snapshot: &DocumentSnapshot,
    index: &AstIndex,
    parent: NodeId,
    script_level: bool,
) -> Vec<DocumentSymbol> {
    let mut out = Vec::new();

    for child in index.children(parent) {
        let Some(range) = child.range else {
            out.extend(outline(snapshot, index, child.id, script_level));
            continue;
        };
        let selection_range = child.name_range().unwrap_or(range);

        let symbol = match &child.kind {
            NodeKind::ClassDecl {
                synthetic: true, ..
            } => {
                out.extend(outline(snapshot, index, child.id, true));
                continue;
            }
            NodeKind::ClassDecl { name, .. } => DocumentSymbol {
                name: name.clone(),
                kind: SymbolKind::Class,
                detail: None,
                range,
                selection_range,
                children: outline(snapshot, index, child.id, false),
            },
            NodeKind::MethodDecl {
                name,
                is_constructor,
                ..
            } => DocumentSymbol {
                name: name.clone(),
                kind: if *is_constructor {
                    SymbolKind::Constructor
                } else {
                    SymbolKind::Method
                },
                detail: snapshot.registry.method(child.id).map(|m| m.signature().label()),
                range,
                selection_range,
                children: Vec::new(),
            },
            NodeKind::FieldDecl {
                name, type_name, ..
            }
            | NodeKind::PropertyDecl {
                name, type_name, ..
            } => DocumentSymbol {
                name: name.clone(),
                kind: if matches!(child.kind, NodeKind::PropertyDecl { .. }) {
                    SymbolKind::Property
                } else {
                    SymbolKind::Field
                },
                detail: type_name.as_ref().map(ToString::to_string),
                range,
                selection_range,
                children: Vec::new(),
            },
            NodeKind::Declaration { type_name } if script_level => {
                let Some(lhs) = declared_variable(index, child) else {
                    continue;
                };
                let (Some(name), Some(lhs_range)) = (lhs.name(), lhs.range) else {
                    continue;
                };
                DocumentSymbol {
                    name: name.clone(),
                    kind: SymbolKind::Variable,
                    detail: type_name.as_ref().map(ToString::to_string),
                    range,
                    selection_range: lhs_range,
                    children: Vec::new(),
                }
            }
            _ => continue,
        };
        out.push(symbol);
    }

    out
}
