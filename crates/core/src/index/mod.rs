//! Position-addressable view over one parsed document.
//!
//! The tree is linearized in source (pre-order) order into an arena. Parent
//! links are kept in a side table so the syntax tree itself stays a plain
//! owned tree.

use crate::ast::{AstNode, NodeKind, ParsedModule};
use groovyscope_api::models::{NodeId, Position, Range};
use smol_str::SmolStr;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{trace, warn};

#[derive(Debug, Clone)]
pub struct IndexedNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub range: Option<Range>,
    pub children: Vec<NodeId>,
    pub depth: usize,
}

impl IndexedNode {
    pub fn name(&self) -> Option<&SmolStr> {
        self.kind.name()
    }

    /// Range of the identifier, falling back to the whole node.
    pub fn name_range(&self) -> Option<Range> {
        self.kind.name_range().or(self.range)
    }

    pub fn start(&self) -> Option<Position> {
        self.range.map(|r| r.start())
    }

    pub fn contains_position(&self, pos: Position) -> bool {
        self.range.is_some_and(|r| r.contains_position(pos))
    }
}

/// Immutable snapshot of one document's nodes.
#[derive(Debug, Clone, Default)]
pub struct AstIndex {
    nodes: Vec<IndexedNode>,
    slots: HashMap<NodeId, usize>,
    parents: HashMap<NodeId, NodeId>,
    root: Option<NodeId>,
    /// Outermost positioned nodes, sorted by start.
    top_level: Vec<NodeId>,
    max_depth: usize,
}

impl AstIndex {
    pub fn build(module: &ParsedModule) -> Self {
        let mut index = Self::default();
        index.linearize(&module.root);
        let mut top_level = index.positioned_children(module.root.id);
        top_level.sort_by_key(|id| index.get(*id).and_then(IndexedNode::start));
        index.top_level = top_level;
        index
    }

    fn linearize(&mut self, root: &AstNode) {
        let mut stack: Vec<(&AstNode, Option<NodeId>, usize)> = vec![(root, None, 0)];

        while let Some((node, parent, depth)) = stack.pop() {
            if self.slots.contains_key(&node.id) {
                warn!(node = %node.id, kind = node.kind.label(), "duplicate node id, skipping subtree");
                continue;
            }

            let range = match node.range {
                Some(r) if r.is_inverted() => {
                    trace!(node = %node.id, range = %r, "inverted range treated as unpositioned");
                    None
                }
                other => other,
            };

            let slot = self.nodes.len();
            self.nodes.push(IndexedNode {
                id: node.id,
                kind: node.kind.clone(),
                range,
                children: Vec::with_capacity(node.children.len()),
                depth,
            });
            self.slots.insert(node.id, slot);
            self.max_depth = self.max_depth.max(depth);

            match parent {
                Some(parent_id) => {
                    self.parents.insert(node.id, parent_id);
                    if let Some(&parent_slot) = self.slots.get(&parent_id) {
                        self.nodes[parent_slot].children.push(node.id);
                    }
                }
                None => self.root = Some(node.id),
            }

            for child in node.children.iter().rev() {
                stack.push((child, Some(node.id), depth + 1));
            }
        }
    }

    /// Children that carry a position. Unpositioned children are transparent:
    /// their own positioned descendants take their place.
    fn positioned_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(node) = self.get(id) else {
            return out;
        };
        for &child_id in &node.children {
            match self.get(child_id) {
                Some(child) if child.range.is_some() => out.push(child_id),
                Some(_) => out.extend(self.positioned_children(child_id)),
                None => {}
            }
        }
        out
    }

    pub fn get(&self, id: NodeId) -> Option<&IndexedNode> {
        self.slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn root(&self) -> Option<&IndexedNode> {
        self.root.and_then(|id| self.get(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<&IndexedNode> {
        self.parents.get(&id).and_then(|p| self.get(*p))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &IndexedNode> {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|c| self.get(*c))
    }

    /// Strict ancestors, innermost first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            index: self,
            current: self.parents.get(&id).copied(),
            remaining: self.max_depth + 1,
        }
    }

    /// Scope-opening ancestors of `id`, innermost first.
    pub fn enclosing_scopes(&self, id: NodeId) -> impl Iterator<Item = &IndexedNode> {
        self.ancestors(id).filter(|n| n.kind.is_scope())
    }

    /// Nearest enclosing class declaration.
    pub fn enclosing_class(&self, id: NodeId) -> Option<&IndexedNode> {
        self.ancestors(id)
            .find(|n| matches!(n.kind, NodeKind::ClassDecl { .. }))
    }

    /// Whether `ancestor` lies on the parent chain of `node`.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|n| n.id == ancestor)
    }

    /// Most specific node whose range contains `pos`.
    ///
    /// Top-level statements are binary searched by start, then the search
    /// descends into the tightest containing child at each level.
    pub fn node_at(&self, pos: Position) -> Option<&IndexedNode> {
        let split = self
            .top_level
            .partition_point(|id| self.get(*id).and_then(IndexedNode::start) <= Some(pos));
        let candidate = self.top_level.get(split.checked_sub(1)?)?;
        let mut current = self.get(*candidate)?;
        if !current.contains_position(pos) {
            return None;
        }

        loop {
            let next = self
                .positioned_children(current.id)
                .into_iter()
                .filter_map(|id| self.get(id))
                .filter(|n| n.contains_position(pos))
                .min_by_key(|n| {
                    let range = n.range.unwrap_or(Range::new(0, 0, 0, 0));
                    (range.extent(), Reverse(range.start()))
                });
            match next {
                Some(child) => current = child,
                None => return Some(current),
            }
        }
    }

    /// Every node in traversal order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &IndexedNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Kinds and ranges in traversal order, for structural comparison.
    pub fn shape(&self) -> Vec<(&'static str, Option<Range>)> {
        self.nodes.iter().map(|n| (n.kind.label(), n.range)).collect()
    }
}

pub struct Ancestors<'a> {
    index: &'a AstIndex,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a IndexedNode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = self.index.get(self.current?)?;
        self.current = self.index.parents.get(&node.id).copied();
        Some(node)
    }
}
