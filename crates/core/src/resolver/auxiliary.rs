//! Lookup of calls and class references in auxiliary documents.
//!
//! Runs ahead of the lexical strategy but only claims nodes that have no
//! declaration in their own document, so local declarations always win.

use super::{definition_for, Resolution, ResolutionContext, ResolveStrategy};
use crate::ast::NodeKind;
use crate::engine::DocumentSnapshot;
use groovyscope_api::models::{Definition, NodeId};
use groovyscope_api::IndexError;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone, Copy, Default)]
pub struct AuxiliaryStrategy;

impl ResolveStrategy for AuxiliaryStrategy {
    fn name(&self) -> &'static str {
        "auxiliary"
    }

    fn resolve(&self, ctx: &ResolutionContext<'_>) -> Resolution {
        if ctx.auxiliary.is_empty() {
            return Resolution::NotApplicable;
        }
        let local = &ctx.snapshot.registry;

        let found = match &ctx.node.kind {
            NodeKind::Call {
                name,
                implicit_this,
                ..
            } => {
                if !local.find_method_declarations(name).is_empty() {
                    return Resolution::NotApplicable;
                }
                if *implicit_this
                    && local
                        .find_visible_variable(&ctx.snapshot.index, name, ctx.node.id, ctx.position())
                        .is_some()
                {
                    return Resolution::NotApplicable;
                }
                find_in(ctx.auxiliary, |snap| {
                    snap.registry
                        .find_method_declarations(name)
                        .first()
                        .map(|m| m.node)
                })
            }
            NodeKind::ClassRef { name } | NodeKind::ConstructorCall {
                type_name: name, ..
            } => {
                if !local.find_classes(name).is_empty() {
                    return Resolution::NotApplicable;
                }
                find_in(ctx.auxiliary, |snap| {
                    snap.registry.find_classes(name).first().map(|c| c.node)
                })
            }
            _ => return Resolution::NotApplicable,
        };

        match found {
            Some(def) => {
                trace!(node = %ctx.node.id, target = %def.uri, "resolved in auxiliary document");
                Resolution::Found(def)
            }
            None => Resolution::NotFound(IndexError::NodeNotFound),
        }
    }
}

fn find_in<F>(auxiliary: &[Arc<DocumentSnapshot>], lookup: F) -> Option<Definition>
where
    F: Fn(&DocumentSnapshot) -> Option<NodeId>,
{
    auxiliary
        .iter()
        .find_map(|snap| lookup(snap).and_then(|id| definition_for(snap, id)))
}
