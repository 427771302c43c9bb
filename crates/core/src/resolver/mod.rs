//! Definition resolution through an ordered strategy chain.

pub mod auxiliary;
pub mod lexical;

pub use auxiliary::AuxiliaryStrategy;
pub use lexical::LexicalStrategy;

use crate::ast::NodeKind;
use crate::engine::DocumentSnapshot;
use crate::index::IndexedNode;
use crate::symbols::is_declared_variable;
use groovyscope_api::models::{Definition, NodeId, Position, SymbolKind};
use groovyscope_api::{IndexError, IndexResult};
use smol_str::SmolStr;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::trace;

/// Outcome of a single strategy.
#[derive(Debug, Clone)]
pub enum Resolution {
    Found(Definition),
    /// The strategy does not handle this node; try the next one.
    NotApplicable,
    NotFound(IndexError),
}

/// Everything a strategy may consult for one lookup.
pub struct ResolutionContext<'a> {
    pub snapshot: &'a DocumentSnapshot,
    pub node: &'a IndexedNode,
    /// Extra documents that widen the visible declarations for this session.
    pub auxiliary: &'a [Arc<DocumentSnapshot>],
}

impl<'a> ResolutionContext<'a> {
    pub fn new(
        snapshot: &'a DocumentSnapshot,
        node: &'a IndexedNode,
        auxiliary: &'a [Arc<DocumentSnapshot>],
    ) -> Self {
        Self {
            snapshot,
            node,
            auxiliary,
        }
    }

    /// Start of the node, or the origin for unpositioned nodes.
    pub fn position(&self) -> Position {
        self.node.start().unwrap_or_default()
    }
}

pub trait ResolveStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, ctx: &ResolutionContext<'_>) -> Resolution;

    /// A terminal strategy's `NotFound` ends the chain.
    fn is_terminal(&self) -> bool {
        false
    }
}

#[derive(Clone)]
pub struct DefinitionResolver {
    strategies: Vec<Arc<dyn ResolveStrategy>>,
}

impl Default for DefinitionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionResolver {
    /// Auxiliary lookup followed by the lexical strategy.
    pub fn new() -> Self {
        Self {
            strategies: vec![Arc::new(AuxiliaryStrategy), Arc::new(LexicalStrategy)],
        }
    }

    pub fn with_strategies(strategies: Vec<Arc<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    /// Inserts `strategy` ahead of every existing one.
    pub fn prepend(&mut self, strategy: Arc<dyn ResolveStrategy>) {
        self.strategies.insert(0, strategy);
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn resolve_node(
        &self,
        snapshot: &DocumentSnapshot,
        node: &IndexedNode,
        auxiliary: &[Arc<DocumentSnapshot>],
    ) -> IndexResult<Definition> {
        let ctx = ResolutionContext::new(snapshot, node, auxiliary);

        let outcome = self.strategies.iter().try_fold(
            None,
            |pending: Option<IndexError>, strategy| match strategy.resolve(&ctx) {
                Resolution::Found(def) => ControlFlow::Break(Ok(def)),
                Resolution::NotFound(err) if strategy.is_terminal() => {
                    ControlFlow::Break(Err(err))
                }
                Resolution::NotFound(err) => {
                    trace!(strategy = strategy.name(), node = %node.id, %err, "falling through");
                    ControlFlow::Continue(Some(err))
                }
                Resolution::NotApplicable => ControlFlow::Continue(pending),
            },
        );

        match outcome {
            ControlFlow::Break(res) => res,
            ControlFlow::Continue(Some(err)) => Err(err),
            ControlFlow::Continue(None) => Err(IndexError::UnsupportedNodeKind),
        }
    }

    pub fn resolve_at(
        &self,
        snapshot: &DocumentSnapshot,
        pos: Position,
        auxiliary: &[Arc<DocumentSnapshot>],
    ) -> IndexResult<Definition> {
        let node = snapshot
            .index
            .node_at(pos)
            .ok_or(IndexError::InvalidPosition)?;
        self.resolve_node(snapshot, node, auxiliary)
    }
}

/// Builds the [`Definition`] for a declaring node of `snapshot`.
///
/// Accepts declaration-kind nodes and the left-hand reference of a
/// declaration statement; anything else yields `None`.
pub fn definition_for(snapshot: &DocumentSnapshot, id: NodeId) -> Option<Definition> {
    let index = &snapshot.index;
    let node = index.get(id)?;
    let range = node.range?;

    let (kind, type_name, full_range) = match &node.kind {
        NodeKind::ClassDecl { .. } => (SymbolKind::Class, None, range),
        NodeKind::MethodDecl {
            return_type,
            is_constructor,
            ..
        } => {
            let kind = if *is_constructor {
                SymbolKind::Constructor
            } else {
                SymbolKind::Method
            };
            (kind, return_type.clone(), range)
        }
        NodeKind::FieldDecl { type_name, .. } => (SymbolKind::Field, type_name.clone(), range),
        NodeKind::PropertyDecl { type_name, .. } => {
            (SymbolKind::Property, type_name.clone(), range)
        }
        NodeKind::Parameter { type_name, .. } => {
            (SymbolKind::Parameter, type_name.clone(), range)
        }
        NodeKind::Import { .. } => (SymbolKind::Import, None, range),
        NodeKind::VariableRef { .. } if is_declared_variable(index, node) => {
            let statement = index.parent(id)?;
            let type_name = match &statement.kind {
                NodeKind::Declaration { type_name } => type_name.clone(),
                _ => None,
            };
            (
                SymbolKind::Variable,
                type_name,
                statement.range.unwrap_or(range),
            )
        }
        _ => return None,
    };

    let owner = match kind {
        SymbolKind::Class | SymbolKind::Import | SymbolKind::Variable | SymbolKind::Parameter => {
            None
        }
        _ => index.enclosing_class(id).map(|c| c.id),
    };

    let name = match &node.kind {
        NodeKind::Import { path, alias, .. } => alias.clone().unwrap_or_else(|| {
            SmolStr::new(path.rsplit('.').next().unwrap_or(path.as_str()))
        }),
        _ => node.name()?.clone(),
    };

    Some(Definition {
        uri: snapshot.document.uri.clone(),
        node: id,
        name,
        kind,
        range: full_range,
        selection_range: node.name_range().unwrap_or(range),
        type_name,
        owner,
    })
}
