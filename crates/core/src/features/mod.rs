//! Editor features computed over one document snapshot.

pub mod references;
pub mod rename;
pub mod signature;
pub mod symbols;

pub use references::{find_references, highlights, references_to};
pub use rename::{prepare_rename, rename};
pub use signature::signature_help;
pub use symbols::document_symbols;

use crate::engine::DocumentSnapshot;
use crate::index::IndexedNode;
use crate::resolver::DefinitionResolver;
use groovyscope_api::models::{Definition, Position};
use groovyscope_api::{IndexError, IndexResult};
use std::sync::Arc;

/// One document snapshot plus the resolver and auxiliary documents used to
/// answer a query against it.
#[derive(Clone, Copy)]
pub struct QueryContext<'a> {
    pub snapshot: &'a DocumentSnapshot,
    pub resolver: &'a DefinitionResolver,
    pub auxiliary: &'a [Arc<DocumentSnapshot>],
}

impl<'a> QueryContext<'a> {
    pub fn new(
        snapshot: &'a DocumentSnapshot,
        resolver: &'a DefinitionResolver,
        auxiliary: &'a [Arc<DocumentSnapshot>],
    ) -> Self {
        Self {
            snapshot,
            resolver,
            auxiliary,
        }
    }

    pub fn node_at(&self, pos: Position) -> IndexResult<&'a IndexedNode> {
        self.snapshot
            .index
            .node_at(pos)
            .ok_or(IndexError::InvalidPosition)
    }

    pub fn resolve(&self, node: &IndexedNode) -> IndexResult<Definition> {
        self.resolver.resolve_node(self.snapshot, node, self.auxiliary)
    }

    pub fn resolve_at(&self, pos: Position) -> IndexResult<Definition> {
        self.resolve(self.node_at(pos)?)
    }

    /// The snapshot a definition was found in: this one or an auxiliary one.
    pub fn owning_snapshot(&self, def: &Definition) -> Option<&'a DocumentSnapshot> {
        if def.uri == self.snapshot.document.uri {
            return Some(self.snapshot);
        }
        self.auxiliary
            .iter()
            .find(|s| s.document.uri == def.uri)
            .map(Arc::as_ref)
    }
}
