//! Signature help for the call surrounding the cursor.

use super::QueryContext;
use crate::ast::NodeKind;
use crate::index::IndexedNode;
use groovyscope_api::models::{Position, SignatureHelp, SignatureInfo, SymbolKind};
use groovyscope_api::{IndexError, IndexResult};
use std::iter;

pub fn signature_help(ctx: &QueryContext<'_>, pos: Position) -> IndexResult<SignatureHelp> {
    let index = &ctx.snapshot.index;
    let node = ctx.node_at(pos)?;
    let call = iter::once(node)
        .chain(index.ancestors(node.id))
        .find(|n| {
            matches!(
                n.kind,
                NodeKind::Call { .. } | NodeKind::ConstructorCall { .. }
            )
        })
        .ok_or(IndexError::NodeNotFound)?;

    let target = ctx.resolve(call)?;
    let owning = ctx
        .owning_snapshot(&target)
        .ok_or(IndexError::NodeNotFound)?;

    let (signatures, active_signature) = match target.kind {
        SymbolKind::Method | SymbolKind::Constructor => {
            let overloads = owning.registry.find_method_declarations(&target.name);
            let active = overloads
                .iter()
                .position(|m| m.node == target.node)
                .unwrap_or(0);
            (overloads.iter().map(|m| m.signature()).collect(), active)
        }
        SymbolKind::Class => {
            let constructors: Vec<SignatureInfo> = owning
                .registry
                .methods()
                .iter()
                .filter(|m| m.is_constructor && m.owner == Some(target.node))
                .map(|m| m.signature())
                .collect();
            if constructors.is_empty() {
                (
                    vec![SignatureInfo {
                        name: target.name.clone(),
                        return_type: None,
                        parameters: Vec::new(),
                    }],
                    0,
                )
            } else {
                (constructors, 0)
            }
        }
        _ => return Err(IndexError::UnsupportedNodeKind),
    };

    let parameter_count = signatures
        .get(active_signature)
        .map_or(0, |s: &SignatureInfo| s.parameters.len());
    let active_parameter = arguments_before(ctx, call, pos).min(parameter_count.saturating_sub(1));

    Ok(SignatureHelp {
        signatures,
        active_signature,
        active_parameter,
    })
}

/// Arguments that end strictly before `pos`.
fn arguments_before(ctx: &QueryContext<'_>, call: &IndexedNode, pos: Position) -> usize {
    let index = &ctx.snapshot.index;
    index
        .children(call.id)
        .find(|n| n.kind == NodeKind::ArgumentList)
        .map_or(0, |args| {
            index
                .children(args.id)
                .filter(|arg| arg.range.is_some_and(|r| r.end() < pos))
                .count()
        })
}
