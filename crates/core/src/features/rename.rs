//! Rename as one atomic batch of text edits.

use super::references::references_to;
use super::QueryContext;
use crate::ast::NodeKind;
use crate::config::ServiceConfig;
use crate::index::IndexedNode;
use crate::naming::{self, accessor_prefixes};
use crate::resolver::definition_for;
use groovyscope_api::models::{Definition, Position, Range, SymbolKind, TextEdit, WorkspaceEdit};
use groovyscope_api::{IndexError, IndexResult};
use tracing::{debug, trace};

/// Identifier range of the renameable symbol at `pos`.
pub fn prepare_rename(
    ctx: &QueryContext<'_>,
    pos: Position,
    config: &ServiceConfig,
) -> IndexResult<Range> {
    let (node, _) = rename_target(ctx, pos, config)?;
    node.name_range().ok_or(IndexError::NodeNotFound)
}

/// Edits renaming the symbol at `pos` and, for fields and properties,
/// their conventionally named accessors.
///
/// Nothing is returned unless the complete batch could be built.
pub fn rename(
    ctx: &QueryContext<'_>,
    pos: Position,
    new_name: &str,
    config: &ServiceConfig,
) -> IndexResult<WorkspaceEdit> {
    naming::validate_identifier(new_name)?;
    let (_, target) = rename_target(ctx, pos, config)?;

    let references = references_to(ctx, &target, true);
    if references.is_empty() {
        return Err(IndexError::NodeNotFound);
    }

    let mut edit = WorkspaceEdit::new();
    for reference in references {
        edit.add_edit(
            reference.location.uri,
            TextEdit::new(reference.location.range, new_name),
        );
    }

    if target.kind == SymbolKind::Class {
        add_constructor_edits(ctx, &target, new_name, &mut edit);
    }
    if config.synthesize_accessors && target.kind.has_accessors() {
        add_accessor_edits(ctx, &target, new_name, &mut edit);
    }

    edit.normalize();
    debug!(
        from = %target.name,
        to = new_name,
        edits = edit.edit_count(),
        "rename batch built"
    );
    Ok(edit)
}

fn rename_target<'a>(
    ctx: &QueryContext<'a>,
    pos: Position,
    config: &ServiceConfig,
) -> IndexResult<(&'a IndexedNode, Definition)> {
    let node = ctx.node_at(pos)?;
    if !is_renameable(node, config) {
        return Err(IndexError::UnsupportedNodeKind);
    }
    let target = ctx.resolve(node)?;
    // Usages inside auxiliary documents are never scanned.
    if target.uri != ctx.snapshot.document.uri {
        return Err(IndexError::UnsupportedNodeKind);
    }
    // A constructor is renamed together with its class.
    let target = match (target.kind, target.owner) {
        (SymbolKind::Constructor, Some(class)) => {
            definition_for(ctx.snapshot, class).ok_or(IndexError::NodeNotFound)?
        }
        _ => target,
    };
    match target.kind {
        SymbolKind::Import => Err(IndexError::UnsupportedNodeKind),
        SymbolKind::Class if config.is_builtin_type(&target.name) => {
            Err(IndexError::UnsupportedNodeKind)
        }
        _ => Ok((node, target)),
    }
}

fn is_renameable(node: &IndexedNode, config: &ServiceConfig) -> bool {
    match &node.kind {
        NodeKind::VariableRef { .. }
        | NodeKind::Call { .. }
        | NodeKind::PropertyRef { .. }
        | NodeKind::MethodDecl { .. }
        | NodeKind::FieldDecl { .. }
        | NodeKind::PropertyDecl { .. } => true,
        NodeKind::ClassDecl {
            name, synthetic, ..
        } => !synthetic && !config.is_builtin_type(name),
        _ => false,
    }
}

/// Constructors carry the class name and resolve to themselves.
fn add_constructor_edits(
    ctx: &QueryContext<'_>,
    target: &Definition,
    new_name: &str,
    edit: &mut WorkspaceEdit,
) {
    let constructors = ctx
        .snapshot
        .registry
        .methods()
        .iter()
        .filter(|m| m.is_constructor && m.owner == Some(target.node));
    for constructor in constructors {
        edit.add_edit(
            target.uri.clone(),
            TextEdit::new(constructor.name_range, new_name),
        );
    }
}

/// `getX`/`setX`/`isX` declared on the same owner get renamed along with `x`.
fn add_accessor_edits(
    ctx: &QueryContext<'_>,
    target: &Definition,
    new_name: &str,
    edit: &mut WorkspaceEdit,
) {
    let Some(owning) = ctx.owning_snapshot(target) else {
        return;
    };

    for prefix in accessor_prefixes(target.type_name.as_deref()) {
        let old_accessor = prefix.apply(&target.name);
        let new_accessor = prefix.apply(new_name);

        for method in owning.registry.find_method_declarations(&old_accessor) {
            if method.owner != target.owner {
                continue;
            }
            let Some(accessor) = definition_for(owning, method.node) else {
                continue;
            };
            trace!(accessor = %old_accessor, renamed = %new_accessor, "synthesized accessor rename");
            for reference in references_to(ctx, &accessor, true) {
                edit.add_edit(
                    reference.location.uri,
                    TextEdit::new(reference.location.range, new_accessor.clone()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AstBuilder, LiteralKind, ParsedModule, SourceDocument};
    use crate::engine::DocumentSnapshot;
    use crate::resolver::DefinitionResolver;
    use url::Url;

    fn snapshot(root: crate::ast::AstNode) -> DocumentSnapshot {
        let uri = Url::parse("file:///rename.groovy").unwrap();
        DocumentSnapshot::build(ParsedModule::new(SourceDocument::new(uri, 1), root), 1)
    }

    // class Person {
    //   boolean active
    //   boolean isActive() { active }
    //   def setActive(v) { active = v }
    // }
    // new Person().isActive()
    fn person() -> DocumentSnapshot {
        let mut b = AstBuilder::new();
        let field = b.property("active", Range::new(1, 10, 1, 16), Range::new(1, 2, 1, 16), Some("boolean"));

        let read = b.var_ref("active", Range::new(2, 23, 2, 29));
        let read_stmt = b.statement(read);
        let body = b.block(Range::new(2, 21, 2, 31), vec![read_stmt]);
        let is_active = b.method("isActive", Range::new(2, 10, 2, 18), Range::new(2, 2, 2, 31), Some("boolean"), vec![], body);

        let param = b.parameter("v", Range::new(3, 16, 3, 17), None);
        let lhs = b.var_ref("active", Range::new(3, 21, 3, 27));
        let rhs = b.var_ref("v", Range::new(3, 30, 3, 31));
        let assign = b.branch(NodeKind::Binary { op: "=".into() }, Some(Range::new(3, 21, 3, 31)), vec![lhs, rhs]);
        let assign_stmt = b.statement(assign);
        let body = b.block(Range::new(3, 19, 3, 33), vec![assign_stmt]);
        let set_active = b.method("setActive", Range::new(3, 6, 3, 15), Range::new(3, 2, 3, 33), None, vec![param], body);

        let class = b.class("Person", Range::new(0, 6, 0, 12), Range::new(0, 0, 4, 1), vec![field, is_active, set_active]);

        let ctor = b.branch(
            NodeKind::ConstructorCall {
                type_name: "Person".into(),
                name_range: Some(Range::new(5, 4, 5, 10)),
            },
            Some(Range::new(5, 0, 5, 12)),
            vec![],
        );
        let call = b.call("isActive", Range::new(5, 13, 5, 21), Range::new(5, 0, 5, 23), Some(ctor), Range::new(5, 21, 5, 23), vec![]);
        let stmt = b.statement(call);
        snapshot(b.module(None, vec![class, stmt]))
    }

    #[test]
    fn test_property_rename_synthesizes_accessors() {
        let snap = person();
        let resolver = DefinitionResolver::new();
        let ctx = QueryContext::new(&snap, &resolver, &[]);

        let edit = rename(&ctx, Position::new(1, 12), "enabled", &ServiceConfig::default()).unwrap();
        let edits = edit.edits_for(&snap.document.uri);
        let texts: Vec<_> = edits.iter().map(|e| (e.range.start(), e.new_text.as_str())).collect();
        assert_eq!(
            texts,
            vec![
                (Position::new(1, 10), "enabled"),
                (Position::new(2, 10), "isEnabled"),
                (Position::new(2, 23), "enabled"),
                (Position::new(3, 6), "setEnabled"),
                (Position::new(3, 21), "enabled"),
                (Position::new(5, 13), "isEnabled"),
            ]
        );
    }

    #[test]
    fn test_accessor_synthesis_can_be_disabled() {
        let snap = person();
        let resolver = DefinitionResolver::new();
        let ctx = QueryContext::new(&snap, &resolver, &[]);
        let config = ServiceConfig {
            synthesize_accessors: false,
            ..ServiceConfig::default()
        };

        let edit = rename(&ctx, Position::new(1, 12), "enabled", &config).unwrap();
        assert_eq!(edit.edit_count(), 3);
    }

    #[test]
    fn test_invalid_new_name_produces_no_edits() {
        let snap = person();
        let resolver = DefinitionResolver::new();
        let ctx = QueryContext::new(&snap, &resolver, &[]);
        let config = ServiceConfig::default();

        for bad in ["", "1st", "two words", "class"] {
            assert_eq!(
                rename(&ctx, Position::new(1, 12), bad, &config),
                Err(IndexError::InvalidIdentifier(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_literal_and_builtin_class_are_not_renameable() {
        let mut b = AstBuilder::new();
        let lit = b.literal(LiteralKind::String, Range::new(0, 0, 0, 7));
        let class = b.class("Script", Range::new(1, 6, 1, 12), Range::new(1, 0, 1, 15), vec![]);
        let snap = snapshot(b.module(None, vec![lit, class]));
        let resolver = DefinitionResolver::new();
        let ctx = QueryContext::new(&snap, &resolver, &[]);
        let config = ServiceConfig::default();

        assert_eq!(
            prepare_rename(&ctx, Position::new(0, 3), &config),
            Err(IndexError::UnsupportedNodeKind)
        );
        assert_eq!(
            prepare_rename(&ctx, Position::new(1, 8), &config),
            Err(IndexError::UnsupportedNodeKind)
        );
    }

    #[test]
    fn test_prepare_rename_returns_identifier_range() {
        let snap = person();
        let resolver = DefinitionResolver::new();
        let ctx = QueryContext::new(&snap, &resolver, &[]);

        let range = prepare_rename(&ctx, Position::new(5, 15), &ServiceConfig::default()).unwrap();
        assert_eq!(range, Range::new(5, 13, 5, 21));
    }
}
