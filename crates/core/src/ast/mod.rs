//! Syntax tree handed over by the parse collaborator.
//!
//! The tree is strictly owned: a node owns its children and nothing points
//! back up. Parent lookups live in [`crate::index::AstIndex`].

pub mod builder;

pub use builder::AstBuilder;

use groovyscope_api::models::{NodeId, Position, Range};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use url::Url;

/// Identity of a document generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceDocument {
    pub uri: Url,
    pub version: i32,
}

impl SourceDocument {
    pub fn new(uri: Url, version: i32) -> Self {
        Self { uri, version }
    }
}

/// Furthest compiler phase the collaborator reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompilePhase {
    Initialization,
    Parsing,
    Conversion,
    SemanticAnalysis,
    Canonicalization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Option<Range>,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    String,
    GString,
    Number,
    Boolean,
    Null,
}

/// Syntactic category of a node.
///
/// Declarations carry the range of their identifier separately from the node
/// range so edits can target the name alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Document root.
    Module,
    ClassDecl {
        name: SmolStr,
        name_range: Option<Range>,
        /// Compiler-generated (e.g. the script class); never renameable.
        synthetic: bool,
    },
    /// Children: parameters, then the body block.
    MethodDecl {
        name: SmolStr,
        name_range: Option<Range>,
        return_type: Option<SmolStr>,
        is_constructor: bool,
    },
    FieldDecl {
        name: SmolStr,
        name_range: Option<Range>,
        type_name: Option<SmolStr>,
    },
    PropertyDecl {
        name: SmolStr,
        name_range: Option<Range>,
        type_name: Option<SmolStr>,
    },
    Parameter {
        name: SmolStr,
        name_range: Option<Range>,
        type_name: Option<SmolStr>,
        has_default: bool,
    },
    Import {
        path: SmolStr,
        alias: Option<SmolStr>,
        is_static: bool,
        is_star: bool,
    },
    /// `def x = 1`. First child is the declared variable reference, the rest
    /// is the initializer.
    Declaration { type_name: Option<SmolStr> },
    Block,
    /// Children: parameters, then the body block.
    Closure,
    VariableRef { name: SmolStr },
    /// `obj.name`. Child is the object expression.
    PropertyRef {
        name: SmolStr,
        name_range: Option<Range>,
    },
    /// `foo(a)` or `obj.foo(a)`. Children: optional receiver, argument list.
    Call {
        name: SmolStr,
        name_range: Option<Range>,
        implicit_this: bool,
    },
    /// `new Foo(a)`. Child is the argument list.
    ConstructorCall {
        type_name: SmolStr,
        name_range: Option<Range>,
    },
    ArgumentList,
    ClassRef { name: SmolStr },
    Literal { kind: LiteralKind },
    Binary { op: SmolStr },
    ExpressionStatement,
    If,
    While,
    /// `for (x in xs)`. Children: loop parameter, collection, body.
    For,
    Return,
    /// Placeholder produced by error recovery.
    Error,
}

impl NodeKind {
    pub fn name(&self) -> Option<&SmolStr> {
        match self {
            NodeKind::ClassDecl { name, .. }
            | NodeKind::MethodDecl { name, .. }
            | NodeKind::FieldDecl { name, .. }
            | NodeKind::PropertyDecl { name, .. }
            | NodeKind::Parameter { name, .. }
            | NodeKind::VariableRef { name }
            | NodeKind::PropertyRef { name, .. }
            | NodeKind::Call { name, .. }
            | NodeKind::ClassRef { name } => Some(name),
            NodeKind::ConstructorCall { type_name, .. } => Some(type_name),
            NodeKind::Import { path, alias, .. } => Some(alias.as_ref().unwrap_or(path)),
            _ => None,
        }
    }

    /// Range of the identifier when it differs from the node range.
    pub fn name_range(&self) -> Option<Range> {
        match self {
            NodeKind::ClassDecl { name_range, .. }
            | NodeKind::MethodDecl { name_range, .. }
            | NodeKind::FieldDecl { name_range, .. }
            | NodeKind::PropertyDecl { name_range, .. }
            | NodeKind::Parameter { name_range, .. }
            | NodeKind::PropertyRef { name_range, .. }
            | NodeKind::Call { name_range, .. }
            | NodeKind::ConstructorCall { name_range, .. } => *name_range,
            _ => None,
        }
    }

    /// Whether the node itself introduces a named symbol.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            NodeKind::ClassDecl { .. }
                | NodeKind::MethodDecl { .. }
                | NodeKind::FieldDecl { .. }
                | NodeKind::PropertyDecl { .. }
                | NodeKind::Parameter { .. }
                | NodeKind::Import { .. }
        )
    }

    /// Whether the node opens a lexical scope.
    pub fn is_scope(&self) -> bool {
        matches!(
            self,
            NodeKind::Module
                | NodeKind::ClassDecl { .. }
                | NodeKind::MethodDecl { .. }
                | NodeKind::Block
                | NodeKind::Closure
                | NodeKind::For
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::ClassDecl { .. } => "class",
            NodeKind::MethodDecl { .. } => "method",
            NodeKind::FieldDecl { .. } => "field",
            NodeKind::PropertyDecl { .. } => "property",
            NodeKind::Parameter { .. } => "parameter",
            NodeKind::Import { .. } => "import",
            NodeKind::Declaration { .. } => "declaration",
            NodeKind::Block => "block",
            NodeKind::Closure => "closure",
            NodeKind::VariableRef { .. } => "variable",
            NodeKind::PropertyRef { .. } => "property-ref",
            NodeKind::Call { .. } => "call",
            NodeKind::ConstructorCall { .. } => "constructor-call",
            NodeKind::ArgumentList => "arguments",
            NodeKind::ClassRef { .. } => "class-ref",
            NodeKind::Literal { .. } => "literal",
            NodeKind::Binary { .. } => "binary",
            NodeKind::ExpressionStatement => "expression",
            NodeKind::If => "if",
            NodeKind::While => "while",
            NodeKind::For => "for",
            NodeKind::Return => "return",
            NodeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// `None` for synthetic nodes that have no source position.
    pub range: Option<Range>,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(id: NodeId, kind: NodeKind, range: Option<Range>) -> Self {
        Self {
            id,
            kind,
            range,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<AstNode>) -> Self {
        self.children = children;
        self
    }

    pub fn start(&self) -> Option<Position> {
        self.range.map(|r| r.start())
    }
}

/// Output of the parse collaborator for one document generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedModule {
    pub document: SourceDocument,
    pub root: AstNode,
    pub diagnostics: Vec<Diagnostic>,
    pub phase: CompilePhase,
}

impl ParsedModule {
    pub fn new(document: SourceDocument, root: AstNode) -> Self {
        Self {
            document,
            root,
            diagnostics: Vec::new(),
            phase: CompilePhase::Canonicalization,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>, phase: CompilePhase) -> Self {
        self.diagnostics = diagnostics;
        self.phase = phase;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
