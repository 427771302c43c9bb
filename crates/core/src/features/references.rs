//! Reference search by re-resolving every candidate node.
//!
//! Each query is a linear scan of the document: candidates are filtered by
//! name, resolved through the strategy chain and kept when they land on the
//! target declaration.

use super::QueryContext;
use crate::symbols::is_declared_variable;
use groovyscope_api::models::{
    Definition, DocumentHighlight, HighlightKind, Location, Position, Reference,
};
use groovyscope_api::{IndexError, IndexResult};
use indexmap::IndexMap;
use tracing::debug;

/// References of the symbol at `pos`.
pub fn find_references(
    ctx: &QueryContext<'_>,
    pos: Position,
    include_declaration: bool,
) -> IndexResult<Vec<Reference>> {
    let target = ctx.resolve_at(pos).map_err(|err| match err {
        IndexError::InvalidPosition => err,
        _ => IndexError::NodeNotFound,
    })?;
    Ok(references_to(ctx, &target, include_declaration))
}

/// Every occurrence in the queried document that resolves to `target`.
///
/// A target declared in an auxiliary document contributes its declaration
/// location as well.
pub fn references_to(
    ctx: &QueryContext<'_>,
    target: &Definition,
    include_declaration: bool,
) -> Vec<Reference> {
    let snapshot = ctx.snapshot;
    let uri = &snapshot.document.uri;
    let mut found: IndexMap<_, Reference> = IndexMap::new();

    if include_declaration && target.uri != *uri {
        let reference = Reference::declaration(target.location());
        found.insert(reference.key(), reference);
    }

    for node in snapshot.index.all_nodes() {
        let is_target = node.id == target.node && target.uri == *uri;
        if !is_target && node.name() != Some(&target.name) {
            continue;
        }
        let Some(range) = node.name_range() else {
            continue;
        };
        match ctx.resolve(node) {
            Ok(def) if def.same_symbol(target) => {}
            _ => continue,
        }

        let location = Location::new(uri.clone(), range);
        let reference = if node.kind.is_declaration() || is_declared_variable(&snapshot.index, node)
        {
            if !include_declaration {
                continue;
            }
            Reference::declaration(location)
        } else {
            Reference::usage(location)
        };
        found.entry(reference.key()).or_insert(reference);
    }

    debug!(symbol = %target.name, count = found.len(), "reference scan finished");
    found.into_values().collect()
}

/// Same-document occurrences of the symbol at `pos`.
pub fn highlights(ctx: &QueryContext<'_>, pos: Position) -> IndexResult<Vec<DocumentHighlight>> {
    let uri = &ctx.snapshot.document.uri;
    Ok(find_references(ctx, pos, true)?
        .into_iter()
        .filter(|r| r.location.uri == *uri)
        .map(|r| DocumentHighlight {
            range: r.location.range,
            kind: if r.is_declaration {
                HighlightKind::Write
            } else {
                HighlightKind::Read
            },
        })
        .collect())
}
