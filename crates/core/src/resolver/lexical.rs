//! Scope-walking resolution over a single document.

use super::{definition_for, Resolution, ResolutionContext, ResolveStrategy};
use crate::ast::NodeKind;
use crate::engine::DocumentSnapshot;
use crate::index::IndexedNode;
use crate::symbols::is_declared_variable;
use groovyscope_api::models::{NodeId, Position};
use groovyscope_api::IndexError;

/// Generic lexical strategy. Always last in the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalStrategy;

impl ResolveStrategy for LexicalStrategy {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn is_terminal(&self) -> bool {
        true
    }

    fn resolve(&self, ctx: &ResolutionContext<'_>) -> Resolution {
        let node = ctx.node;
        let found = match &node.kind {
            kind if kind.is_declaration() => Some(node.id),
            NodeKind::VariableRef { .. } if is_declared_variable(&ctx.snapshot.index, node) => {
                Some(node.id)
            }
            NodeKind::VariableRef { name } => {
                resolve_variable(ctx.snapshot, node, name, ctx.position())
            }
            NodeKind::Call {
                name,
                implicit_this,
                ..
            } => resolve_call(ctx.snapshot, node, name, *implicit_this, ctx.position()),
            NodeKind::PropertyRef { name, .. } => resolve_property(ctx.snapshot, node, name),
            NodeKind::ClassRef { name } | NodeKind::ConstructorCall {
                type_name: name, ..
            } => resolve_class(ctx.snapshot, name),
            _ => return Resolution::NotApplicable,
        };

        match found.and_then(|id| definition_for(ctx.snapshot, id)) {
            Some(def) => Resolution::Found(def),
            None => Resolution::NotFound(IndexError::NodeNotFound),
        }
    }
}

/// Innermost visible declaration: locals and parameters in block, method
/// and file scopes; fields when the walk crosses a class body.
fn resolve_variable(
    snapshot: &DocumentSnapshot,
    node: &IndexedNode,
    name: &str,
    at: Position,
) -> Option<NodeId> {
    let registry = &snapshot.registry;
    snapshot.index.enclosing_scopes(node.id).find_map(|scope| {
        let field_owner = match scope.kind {
            NodeKind::ClassDecl { .. } => Some(Some(scope.id)),
            NodeKind::Module => Some(None),
            _ => None,
        };
        registry
            .variable_in_scope(scope.id, name, at)
            .map(|v| v.node)
            .or_else(|| {
                field_owner
                    .and_then(|owner| registry.find_field(owner, name))
                    .map(|f| f.node)
            })
    })
}

/// First declared method of that name; closures held in variables otherwise.
fn resolve_call(
    snapshot: &DocumentSnapshot,
    node: &IndexedNode,
    name: &str,
    implicit_this: bool,
    at: Position,
) -> Option<NodeId> {
    if let Some(method) = snapshot.registry.find_method_declarations(name).first() {
        return Some(method.node);
    }
    if !implicit_this {
        return None;
    }
    resolve_variable(snapshot, node, name, at)
}

fn resolve_property(snapshot: &DocumentSnapshot, node: &IndexedNode, name: &str) -> Option<NodeId> {
    let registry = &snapshot.registry;
    let owner = snapshot.index.enclosing_class(node.id).map(|c| c.id);
    registry
        .find_field(owner, name)
        .or_else(|| registry.find_fields(name).next())
        .map(|f| f.node)
}

fn resolve_class(snapshot: &DocumentSnapshot, name: &str) -> Option<NodeId> {
    let registry = &snapshot.registry;
    registry
        .find_classes(name)
        .first()
        .map(|c| c.node)
        .or_else(|| registry.find_import(name).map(|i| i.node))
}
