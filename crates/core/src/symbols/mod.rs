//! Per-document declaration tables.
//!
//! Built in a single pass over an [`AstIndex`]. Tables are strictly
//! document-scoped; nothing is merged across documents here.

mod decl;

pub use decl::{ClassDecl, FieldDecl, ImportDecl, MethodDecl, VariableDecl, VariableKind};

use crate::ast::NodeKind;
use crate::index::{AstIndex, IndexedNode};
use groovyscope_api::models::{NodeId, ParameterInfo, Position};
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
    variables: HashMap<SmolStr, Vec<VariableDecl>>,
    methods: Vec<MethodDecl>,
    methods_by_name: IndexMap<SmolStr, Vec<usize>>,
    classes: IndexMap<SmolStr, Vec<ClassDecl>>,
    imports: IndexMap<SmolStr, ImportDecl>,
    star_imports: Vec<ImportDecl>,
    fields: IndexMap<Option<NodeId>, Vec<FieldDecl>>,
}

impl SymbolRegistry {
    pub fn build(index: &AstIndex) -> Self {
        let mut registry = Self::default();
        for node in index.all_nodes() {
            registry.register(index, node);
        }
        registry
    }

    fn register(&mut self, index: &AstIndex, node: &IndexedNode) {
        let Some(range) = node.range else {
            if node.kind.is_declaration() {
                trace!(node = %node.id, kind = node.kind.label(), "unpositioned declaration skipped");
            }
            return;
        };
        let name_range = node.name_range().unwrap_or(range);

        match &node.kind {
            NodeKind::ClassDecl {
                name, synthetic, ..
            } => {
                self.classes.entry(name.clone()).or_default().push(ClassDecl {
                    name: name.clone(),
                    node: node.id,
                    synthetic: *synthetic,
                    range,
                    name_range,
                });
            }
            NodeKind::MethodDecl {
                name,
                return_type,
                is_constructor,
                ..
            } => {
                let parameters = index
                    .children(node.id)
                    .filter_map(|child| match &child.kind {
                        NodeKind::Parameter {
                            name,
                            type_name,
                            has_default,
                            ..
                        } => Some(ParameterInfo {
                            name: name.clone(),
                            type_name: type_name.clone(),
                            has_default: *has_default,
                        }),
                        _ => None,
                    })
                    .collect();
                let slot = self.methods.len();
                self.methods.push(MethodDecl {
                    name: name.clone(),
                    node: node.id,
                    owner: index.enclosing_class(node.id).map(|c| c.id),
                    parameters,
                    return_type: return_type.clone(),
                    is_constructor: *is_constructor,
                    range,
                    name_range,
                });
                self.methods_by_name
                    .entry(name.clone())
                    .or_default()
                    .push(slot);
            }
            NodeKind::FieldDecl {
                name, type_name, ..
            }
            | NodeKind::PropertyDecl {
                name, type_name, ..
            } => {
                let owner = index.enclosing_class(node.id).map(|c| c.id);
                self.fields.entry(owner).or_default().push(FieldDecl {
                    name: name.clone(),
                    node: node.id,
                    owner,
                    type_name: type_name.clone(),
                    is_property: matches!(node.kind, NodeKind::PropertyDecl { .. }),
                    range,
                    name_range,
                });
            }
            NodeKind::Parameter {
                name, type_name, ..
            } => {
                let Some(scope) = index.enclosing_scopes(node.id).next() else {
                    return;
                };
                self.push_variable(VariableDecl {
                    name: name.clone(),
                    node: node.id,
                    scope: scope.id,
                    name_range,
                    type_name: type_name.clone(),
                    kind: VariableKind::Parameter,
                });
            }
            NodeKind::Import {
                path,
                alias,
                is_static,
                is_star,
            } => {
                let simple_name = alias.clone().unwrap_or_else(|| {
                    SmolStr::new(path.rsplit('.').next().unwrap_or(path.as_str()))
                });
                let decl = ImportDecl {
                    path: path.clone(),
                    simple_name: simple_name.clone(),
                    node: node.id,
                    is_static: *is_static,
                    is_star: *is_star,
                    range,
                };
                if *is_star {
                    self.star_imports.push(decl);
                } else {
                    self.imports.entry(simple_name).or_insert(decl);
                }
            }
            NodeKind::Declaration { type_name } => {
                let Some(target) = declared_variable(index, node) else {
                    return;
                };
                let (Some(name), Some(target_range)) = (target.name(), target.range) else {
                    return;
                };
                let Some(scope) = index.enclosing_scopes(node.id).next() else {
                    return;
                };
                self.push_variable(VariableDecl {
                    name: name.clone(),
                    node: target.id,
                    scope: scope.id,
                    name_range: target_range,
                    type_name: type_name.clone(),
                    kind: VariableKind::Local,
                });
            }
            _ => {}
        }
    }

    fn push_variable(&mut self, decl: VariableDecl) {
        self.variables.entry(decl.name.clone()).or_default().push(decl);
    }

    /// Every method named `name`, across all classes, in declaration order.
    pub fn find_method_declarations(&self, name: &str) -> Vec<&MethodDecl> {
        self.methods_by_name
            .get(name)
            .map(|slots| slots.iter().map(|&s| &self.methods[s]).collect())
            .unwrap_or_default()
    }

    pub fn method(&self, node: NodeId) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.node == node)
    }

    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    /// Latest declaration of `name` in `scope` that starts at or before `at`.
    pub fn variable_in_scope(&self, scope: NodeId, name: &str, at: Position) -> Option<&VariableDecl> {
        self.variables
            .get(name)?
            .iter()
            .filter(|v| v.scope == scope && v.declared_at() <= at)
            .last()
    }

    /// Innermost local variable or parameter visible from `from` at `at`.
    ///
    /// Members are not considered; see [`SymbolRegistry::fields_of`].
    pub fn find_visible_variable(
        &self,
        index: &AstIndex,
        name: &str,
        from: NodeId,
        at: Position,
    ) -> Option<&VariableDecl> {
        index
            .enclosing_scopes(from)
            .find_map(|scope| self.variable_in_scope(scope.id, name, at))
    }

    pub fn variable(&self, node: NodeId) -> Option<&VariableDecl> {
        self.variables.values().flatten().find(|v| v.node == node)
    }

    pub fn find_classes(&self, name: &str) -> &[ClassDecl] {
        self.classes.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.classes.values().flatten()
    }

    pub fn find_import(&self, simple_name: &str) -> Option<&ImportDecl> {
        self.imports.get(simple_name)
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.imports.values().chain(self.star_imports.iter())
    }

    /// Fields and properties declared directly in `owner` (`None` for the script).
    pub fn fields_of(&self, owner: Option<NodeId>) -> &[FieldDecl] {
        self.fields.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find_field(&self, owner: Option<NodeId>, name: &str) -> Option<&FieldDecl> {
        self.fields_of(owner).iter().find(|f| f.name == name)
    }

    /// Fields named `name` in any class, in declaration order.
    pub fn find_fields(&self, name: &str) -> impl Iterator<Item = &FieldDecl> {
        self.fields.values().flatten().filter(move |f| f.name == name)
    }

    pub fn field(&self, node: NodeId) -> Option<&FieldDecl> {
        self.fields.values().flatten().find(|f| f.node == node)
    }
}

/// Left-hand variable reference of a declaration statement.
pub fn declared_variable<'a>(index: &'a AstIndex, declaration: &IndexedNode) -> Option<&'a IndexedNode> {
    index
        .children(declaration.id)
        .next()
        .filter(|n| matches!(n.kind, NodeKind::VariableRef { .. }))
}

/// Whether `node` is the declared identifier of a declaration statement.
pub fn is_declared_variable(index: &AstIndex, node: &IndexedNode) -> bool {
    index.parent(node.id).is_some_and(|parent| {
        matches!(parent.kind, NodeKind::Declaration { .. })
            && declared_variable(index, parent).is_some_and(|lhs| lhs.id == node.id)
    })
}
