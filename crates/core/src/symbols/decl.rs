//! Declaration records stored in the per-document tables.

use groovyscope_api::models::{NodeId, ParameterInfo, Position, Range, SignatureInfo};
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Local,
    Parameter,
}

#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub name: SmolStr,
    /// The declared identifier: the left-hand reference of a declaration
    /// statement, or the parameter node.
    pub node: NodeId,
    /// Scope-opening node the variable belongs to.
    pub scope: NodeId,
    pub name_range: Range,
    pub type_name: Option<SmolStr>,
    pub kind: VariableKind,
}

impl VariableDecl {
    pub fn declared_at(&self) -> Position {
        self.name_range.start()
    }
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: SmolStr,
    pub node: NodeId,
    /// Enclosing class; `None` for script-level methods.
    pub owner: Option<NodeId>,
    pub parameters: Vec<ParameterInfo>,
    pub return_type: Option<SmolStr>,
    pub is_constructor: bool,
    pub range: Range,
    pub name_range: Range,
}

impl MethodDecl {
    pub fn signature(&self) -> SignatureInfo {
        SignatureInfo {
            name: self.name.clone(),
            return_type: self.return_type.clone(),
            parameters: self.parameters.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: SmolStr,
    pub node: NodeId,
    pub synthetic: bool,
    pub range: Range,
    pub name_range: Range,
}

#[derive(Debug, Clone)]
pub struct ImportDecl {
    pub path: SmolStr,
    /// Alias when present, else the last path segment.
    pub simple_name: SmolStr,
    pub node: NodeId,
    pub is_static: bool,
    pub is_star: bool,
    pub range: Range,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: SmolStr,
    pub node: NodeId,
    pub owner: Option<NodeId>,
    pub type_name: Option<SmolStr>,
    /// Groovy property (implicit accessors) rather than a plain field.
    pub is_property: bool,
    pub range: Range,
    pub name_range: Range,
}
