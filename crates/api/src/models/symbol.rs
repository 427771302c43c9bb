use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;
use std::fmt;
use url::Url;

/// Zero-based line/column position inside a document.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.line, self.col).cmp(&(other.line, other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Range {
    pub const fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    pub fn from_positions(start: Position, end: Position) -> Self {
        Self::new(start.line, start.col, end.line, end.col)
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_col)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_col)
    }

    /// Inclusive on both ends so a cursor sitting right after an identifier
    /// still hits it.
    pub fn contains(&self, line: usize, col: usize) -> bool {
        if line < self.start_line || line > self.end_line {
            return false;
        }
        if line == self.start_line && col < self.start_col {
            return false;
        }
        if line == self.end_line && col > self.end_col {
            return false;
        }
        true
    }

    pub fn contains_position(&self, pos: Position) -> bool {
        self.contains(pos.line, pos.col)
    }

    pub fn contains_range(&self, other: &Range) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.start() == self.end()
    }

    /// A range whose end precedes its start. Error-recovered trees can carry these.
    pub fn is_inverted(&self) -> bool {
        self.end() < self.start()
    }

    /// Size key used to pick the tightest of several containing ranges.
    pub fn extent(&self) -> (usize, usize) {
        let lines = self.end_line.saturating_sub(self.start_line);
        let cols = if lines == 0 {
            self.end_col.saturating_sub(self.start_col)
        } else {
            self.end_col
        };
        (lines, cols)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start(), self.end())
    }
}

/// Stable per-document identity of a syntax node.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Method,
    Constructor,
    Field,
    Property,
    Variable,
    Parameter,
    Import,
}

impl SymbolKind {
    /// Kinds whose accessor methods follow the bean naming convention.
    pub fn has_accessors(&self) -> bool {
        matches!(self, SymbolKind::Field | SymbolKind::Property)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub uri: Url,
    pub range: Range,
}

impl Location {
    pub fn new(uri: Url, range: Range) -> Self {
        Self { uri, range }
    }
}

/// The declaration a reference resolves to.
///
/// Two definitions are the same symbol when they point at the same
/// declaring node of the same document; name and ranges are carried for
/// presentation only.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Definition {
    pub uri: Url,
    pub node: NodeId,
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Full range of the declaring node.
    pub range: Range,
    /// Range of the declared identifier.
    pub selection_range: Range,
    /// Declared type, when the source spells one out.
    pub type_name: Option<SmolStr>,
    /// Enclosing class declaration for members.
    pub owner: Option<NodeId>,
}

impl Definition {
    pub fn location(&self) -> Location {
        Location::new(self.uri.clone(), self.selection_range)
    }

    pub fn same_symbol(&self, other: &Definition) -> bool {
        self.node == other.node && self.uri == other.uri
    }
}

impl PartialEq for Definition {
    fn eq(&self, other: &Self) -> bool {
        self.same_symbol(other)
    }
}

impl Eq for Definition {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub location: Location,
    /// True for the declaring occurrence, false for a usage.
    pub is_declaration: bool,
}

impl Reference {
    pub fn declaration(location: Location) -> Self {
        Self {
            location,
            is_declaration: true,
        }
    }

    pub fn usage(location: Location) -> Self {
        Self {
            location,
            is_declaration: false,
        }
    }

    /// Deduplication key: one reference per identifier start.
    pub fn key(&self) -> (Url, usize, usize) {
        (
            self.location.uri.clone(),
            self.location.range.start_line,
            self.location.range.start_col,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSymbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub detail: Option<String>,
    pub range: Range,
    pub selection_range: Range,
    pub children: Vec<DocumentSymbol>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    Read,
    Write,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DocumentHighlight {
    pub range: Range,
    pub kind: HighlightKind,
}

#[derive(Debug, Clone)]
pub struct PositionContext {
    pub uri: Url,
    pub position: Position,
}

impl PositionContext {
    pub fn new(uri: Url, line: usize, col: usize) -> Self {
        Self {
            uri,
            position: Position::new(line, col),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceQuery {
    pub context: PositionContext,
    pub include_declaration: bool,
}
