//! Id-allocating constructor for syntax trees.
//!
//! Parse collaborators use it so every node of a document gets a distinct
//! [`NodeId`] without tracking counters themselves.

use super::{AstNode, LiteralKind, NodeKind};
use groovyscope_api::models::{NodeId, Range};
use smol_str::SmolStr;

#[derive(Debug, Default)]
pub struct AstBuilder {
    next_id: u32,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn leaf(&mut self, kind: NodeKind, range: Option<Range>) -> AstNode {
        AstNode::new(self.alloc(), kind, range)
    }

    pub fn branch(
        &mut self,
        kind: NodeKind,
        range: Option<Range>,
        children: Vec<AstNode>,
    ) -> AstNode {
        AstNode::new(self.alloc(), kind, range).with_children(children)
    }

    pub fn module(&mut self, range: Option<Range>, statements: Vec<AstNode>) -> AstNode {
        self.branch(NodeKind::Module, range, statements)
    }

    pub fn var_ref(&mut self, name: &str, range: Range) -> AstNode {
        self.leaf(
            NodeKind::VariableRef {
                name: SmolStr::new(name),
            },
            Some(range),
        )
    }

    pub fn class_ref(&mut self, name: &str, range: Range) -> AstNode {
        self.leaf(
            NodeKind::ClassRef {
                name: SmolStr::new(name),
            },
            Some(range),
        )
    }

    pub fn literal(&mut self, kind: LiteralKind, range: Range) -> AstNode {
        self.leaf(NodeKind::Literal { kind }, Some(range))
    }

    /// `def name = init` where `name_range` covers the identifier.
    pub fn declaration(
        &mut self,
        name: &str,
        name_range: Range,
        range: Range,
        type_name: Option<&str>,
        init: Option<AstNode>,
    ) -> AstNode {
        let lhs = self.var_ref(name, name_range);
        let mut children = vec![lhs];
        children.extend(init);
        self.branch(
            NodeKind::Declaration {
                type_name: type_name.map(SmolStr::new),
            },
            Some(range),
            children,
        )
    }

    pub fn parameter(&mut self, name: &str, range: Range, type_name: Option<&str>) -> AstNode {
        self.leaf(
            NodeKind::Parameter {
                name: SmolStr::new(name),
                name_range: Some(range),
                type_name: type_name.map(SmolStr::new),
                has_default: false,
            },
            Some(range),
        )
    }

    pub fn block(&mut self, range: Range, statements: Vec<AstNode>) -> AstNode {
        self.branch(NodeKind::Block, Some(range), statements)
    }

    pub fn method(
        &mut self,
        name: &str,
        name_range: Range,
        range: Range,
        return_type: Option<&str>,
        params: Vec<AstNode>,
        body: AstNode,
    ) -> AstNode {
        let mut children = params;
        children.push(body);
        self.branch(
            NodeKind::MethodDecl {
                name: SmolStr::new(name),
                name_range: Some(name_range),
                return_type: return_type.map(SmolStr::new),
                is_constructor: false,
            },
            Some(range),
            children,
        )
    }

    /// `Name(params) { body }` inside a class body.
    pub fn constructor(
        &mut self,
        name: &str,
        name_range: Range,
        range: Range,
        params: Vec<AstNode>,
        body: AstNode,
    ) -> AstNode {
        let mut children = params;
        children.push(body);
        self.branch(
            NodeKind::MethodDecl {
                name: SmolStr::new(name),
                name_range: Some(name_range),
                return_type: None,
                is_constructor: true,
            },
            Some(range),
            children,
        )
    }

    pub fn class(
        &mut self,
        name: &str,
        name_range: Range,
        range: Range,
        members: Vec<AstNode>,
    ) -> AstNode {
        self.branch(
            NodeKind::ClassDecl {
                name: SmolStr::new(name),
                name_range: Some(name_range),
                synthetic: false,
            },
            Some(range),
            members,
        )
    }

    pub fn field(
        &mut self,
        name: &str,
        name_range: Range,
        range: Range,
        type_name: Option<&str>,
        init: Option<AstNode>,
    ) -> AstNode {
        self.branch(
            NodeKind::FieldDecl {
                name: SmolStr::new(name),
                name_range: Some(name_range),
                type_name: type_name.map(SmolStr::new),
            },
            Some(range),
            init.into_iter().collect(),
        )
    }

    pub fn property(
        &mut self,
        name: &str,
        name_range: Range,
        range: Range,
        type_name: Option<&str>,
    ) -> AstNode {
        self.leaf(
            NodeKind::PropertyDecl {
                name: SmolStr::new(name),
                name_range: Some(name_range),
                type_name: type_name.map(SmolStr::new),
            },
            Some(range),
        )
    }

    /// `receiver.name(args)` or `name(args)`; `args_range` spans the parentheses.
    pub fn call(
        &mut self,
        name: &str,
        name_range: Range,
        range: Range,
        receiver: Option<AstNode>,
        args_range: Range,
        args: Vec<AstNode>,
    ) -> AstNode {
        let implicit_this = receiver.is_none();
        let arguments = self.branch(NodeKind::ArgumentList, Some(args_range), args);
        let mut children: Vec<AstNode> = receiver.into_iter().collect();
        children.push(arguments);
        self.branch(
            NodeKind::Call {
                name: SmolStr::new(name),
                name_range: Some(name_range),
                implicit_this,
            },
            Some(range),
            children,
        )
    }

    pub fn property_ref(
        &mut self,
        object: AstNode,
        name: &str,
        name_range: Range,
        range: Range,
    ) -> AstNode {
        self.branch(
            NodeKind::PropertyRef {
                name: SmolStr::new(name),
                name_range: Some(name_range),
            },
            Some(range),
            vec![object],
        )
    }

    pub fn statement(&mut self, expr: AstNode) -> AstNode {
        let range = expr.range;
        self.branch(NodeKind::ExpressionStatement, range, vec![expr])
    }
}
