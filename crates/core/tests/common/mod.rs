#![allow(dead_code)]

use async_trait::async_trait;
use groovyscope_api::models::{Position, Range, TextEdit};
use groovyscope_core::ast::{AstBuilder, AstNode, LiteralKind, NodeKind, ParsedModule, SourceDocument};
use groovyscope_core::engine::ParseCollaborator;
use groovyscope_core::error::{GroovyscopeError, Result};
use std::time::Duration;
use url::Url;

pub fn uri(name: &str) -> Url {
    Url::parse(&format!("file:///workspace/{name}.groovy")).unwrap()
}

/// Source text used to compute node ranges.
pub struct SourceText {
    pub text: String,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Range of the `nth` (zero-based) occurrence of `needle`.
    pub fn range_of(&self, needle: &str, nth: usize) -> Range {
        let offset = self
            .text
            .match_indices(needle)
            .nth(nth)
            .map(|(i, _)| i)
            .unwrap_or_else(|| panic!("`{needle}` #{nth} not in source"));
        let start = self.position_at(offset);
        let end = self.position_at(offset + needle.len());
        Range::from_positions(start, end)
    }

    pub fn pos_of(&self, needle: &str, nth: usize) -> Position {
        self.range_of(needle, nth).start()
    }

    /// Range of the line containing the `nth` occurrence of `needle`.
    pub fn line_of(&self, needle: &str, nth: usize) -> Range {
        let line = self.range_of(needle, nth).start_line;
        let len = self.text.lines().nth(line).map_or(0, str::len);
        Range::new(line, 0, line, len)
    }

    pub fn span(&self, from: &str, from_nth: usize, to: &str, to_nth: usize) -> Range {
        Range::from_positions(self.range_of(from, from_nth).start(), self.range_of(to, to_nth).end())
    }

    pub fn full(&self) -> Range {
        Range::from_positions(Position::new(0, 0), self.position_at(self.text.len()))
    }

    fn position_at(&self, offset: usize) -> Position {
        let before = &self.text[..offset];
        let line = before.matches('\n').count();
        let col = before.rfind('\n').map_or(offset, |nl| offset - nl - 1);
        Position::new(line, col)
    }

    fn offset_of(&self, pos: Position) -> usize {
        let mut offset = 0;
        for (i, line) in self.text.split('\n').enumerate() {
            if i == pos.line {
                return offset + pos.col;
            }
            offset += line.len() + 1;
        }
        self.text.len()
    }

    /// Applies non-overlapping single-line edits.
    pub fn apply(&self, edits: &[TextEdit]) -> String {
        let mut sorted: Vec<_> = edits.iter().collect();
        sorted.sort_by_key(|e| std::cmp::Reverse(e.range.start()));
        let mut out = self.text.clone();
        for edit in sorted {
            let start = self.offset_of(edit.range.start());
            let end = self.offset_of(edit.range.end());
            out.replace_range(start..end, &edit.new_text);
        }
        out
    }
}

pub fn module(uri: &Url, root: AstNode) -> ParsedModule {
    ParsedModule::new(SourceDocument::new(uri.clone(), 1), root)
}

/// `def {name} = 5\nprintln {name}`
pub fn declare_and_print(uri: &Url, name: &str) -> (SourceText, ParsedModule) {
    let src = SourceText::new(format!("def {name} = 5\nprintln {name}"));
    let mut b = AstBuilder::new();
    let five = b.literal(LiteralKind::Number, src.range_of("5", 0));
    let decl = b.declaration(
        name,
        src.range_of(name, 0),
        src.line_of("def", 0),
        None,
        Some(five),
    );
    let arg = b.var_ref(name, src.range_of(name, 1));
    let call = b.call(
        "println",
        src.range_of("println", 0),
        src.line_of("println", 0),
        None,
        src.range_of(name, 1),
        vec![arg],
    );
    let stmt = b.statement(call);
    let root = b.module(Some(src.full()), vec![decl, stmt]);
    (src, module(uri, root))
}

/// `def {name}(){}\n{name}()\n{name}()`
pub fn declare_and_call_twice(uri: &Url, name: &str) -> (SourceText, ParsedModule) {
    let src = SourceText::new(format!("def {name}(){{}}\n{name}()\n{name}()"));
    let mut b = AstBuilder::new();
    let body = b.block(src.range_of("{}", 0), vec![]);
    let method = b.method(name, src.range_of(name, 0), src.line_of("def", 0), None, vec![], body);
    let mut statements = vec![method];
    for nth in 1..=2 {
        let name_range = src.range_of(name, nth);
        let parens = src.range_of("()", nth);
        let call = b.call(
            name,
            name_range,
            Range::from_positions(name_range.start(), parens.end()),
            None,
            parens,
            vec![],
        );
        statements.push(b.statement(call));
    }
    let root = b.module(Some(src.full()), statements);
    (src, module(uri, root))
}

/// `println "hello"`
pub fn string_literal(uri: &Url) -> (SourceText, ParsedModule) {
    let src = SourceText::new("println \"hello\"");
    let mut b = AstBuilder::new();
    let lit = b.literal(LiteralKind::String, src.range_of("\"hello\"", 0));
    let call = b.call(
        "println",
        src.range_of("println", 0),
        src.full(),
        None,
        src.range_of("\"hello\"", 0),
        vec![lit],
    );
    let stmt = b.statement(call);
    let root = b.module(Some(src.full()), vec![stmt]);
    (src, module(uri, root))
}

pub fn empty(uri: &Url) -> ParsedModule {
    let mut b = AstBuilder::new();
    module(uri, b.module(None, vec![]))
}

/// A class with a `{prop}` property, its accessors and a script using them.
///
/// ```groovy
/// class Account {
///   boolean {prop}
///   boolean is{Prop}() { {prop} }
///   void set{Prop}(boolean v) { {prop} = v }
/// }
/// def acct = new Account()
/// acct.set{Prop}(true)
/// println acct.{prop}
/// ```
pub fn account(uri: &Url, prop: &str) -> (SourceText, ParsedModule) {
    let cap = {
        let mut chars = prop.chars();
        match chars.next() {
            Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        }
    };
    let getter = format!("is{cap}");
    let setter = format!("set{cap}");
    let src = SourceText::new(format!(
        "class Account {{\n  boolean {prop}\n  boolean {getter}() {{ {prop} }}\n  void {setter}(boolean v) {{ {prop} = v }}\n}}\ndef acct = new Account()\nacct.{setter}(true)\nprintln acct.{prop}"
    ));

    // Occurrences of `prop` as a whole word, in source order.
    let words = word_ranges(&src, prop);

    let mut b = AstBuilder::new();
    let property = b.property(prop, words[0], src.line_of("boolean", 0), Some("boolean"));

    let read = b.var_ref(prop, words[1]);
    let read_stmt = b.statement(read);
    let getter_body = b.block(src.span("{", 1, "}", 0), vec![read_stmt]);
    let getter_decl = b.method(
        &getter,
        src.range_of(&getter, 0),
        src.span("boolean", 1, "}", 0),
        Some("boolean"),
        vec![],
        getter_body,
    );

    let param = b.parameter("v", src.range_of("v)", 0).shrink_end(1), Some("boolean"));
    let lhs = b.var_ref(prop, words[2]);
    let rhs = b.var_ref("v", src.range_of("= v", 0).skip_start(2));
    let assign = b.branch(
        NodeKind::Binary { op: "=".into() },
        Some(Range::from_positions(words[2].start(), src.range_of("= v", 0).end())),
        vec![lhs, rhs],
    );
    let assign_stmt = b.statement(assign);
    let setter_body = b.block(src.span("{", 2, "}", 1), vec![assign_stmt]);
    let setter_decl = b.method(
        &setter,
        src.range_of(&setter, 0),
        src.span("void", 0, "}", 1),
        None,
        vec![param],
        setter_body,
    );

    let class = b.class(
        "Account",
        src.range_of("Account", 0),
        src.span("class", 0, "}", 2),
        vec![property, getter_decl, setter_decl],
    );

    let ctor = b.branch(
        NodeKind::ConstructorCall {
            type_name: "Account".into(),
            name_range: Some(src.range_of("Account", 1)),
        },
        Some(src.span("new", 0, "()", 1)),
        vec![],
    );
    let acct_decl = b.declaration("acct", src.range_of("acct", 0), src.line_of("def acct", 0), None, Some(ctor));

    let receiver = b.var_ref("acct", src.range_of("acct", 1));
    let flag = b.literal(LiteralKind::Boolean, src.range_of("true", 0));
    let setter_call = b.call(
        &setter,
        src.range_of(&setter, 1),
        src.line_of("acct.", 0),
        Some(receiver),
        src.range_of("(true)", 0),
        vec![flag],
    );
    let setter_stmt = b.statement(setter_call);

    let object = b.var_ref("acct", src.range_of("acct", 2));
    let prop_ref = b.property_ref(
        object,
        prop,
        words[3],
        Range::from_positions(src.range_of("acct", 2).start(), words[3].end()),
    );
    let print = b.call(
        "println",
        src.range_of("println", 0),
        src.line_of("println", 0),
        None,
        Range::from_positions(src.range_of("acct", 2).start(), words[3].end()),
        vec![prop_ref],
    );
    let print_stmt = b.statement(print);

    let root = b.module(
        Some(src.full()),
        vec![class, acct_decl, setter_stmt, print_stmt],
    );
    (src, module(uri, root))
}

/// A class declaring an explicit no-argument constructor, then one `new` call.
///
/// ```groovy
/// class {name} {
///   {name}() {}
/// }
/// new {name}()
/// ```
pub fn class_with_constructor(uri: &Url, name: &str) -> (SourceText, ParsedModule) {
    let src = SourceText::new(format!("class {name} {{\n  {name}() {{}}\n}}\nnew {name}()"));
    let mut b = AstBuilder::new();
    let body = b.block(src.range_of("{}", 0), vec![]);
    let ctor = b.constructor(
        name,
        src.range_of(name, 1),
        src.span(name, 1, "}", 0),
        vec![],
        body,
    );
    let class = b.class(name, src.range_of(name, 0), src.span("class", 0, "}", 1), vec![ctor]);
    let call = b.branch(
        NodeKind::ConstructorCall {
            type_name: name.into(),
            name_range: Some(src.range_of(name, 2)),
        },
        Some(src.span("new", 0, "()", 1)),
        vec![],
    );
    let stmt = b.statement(call);
    let root = b.module(Some(src.full()), vec![class, stmt]);
    (src, module(uri, root))
}

/// Whole-word occurrences of `word`.
pub fn word_ranges(src: &SourceText, word: &str) -> Vec<Range> {
    let is_part = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    src.text
        .match_indices(word)
        .enumerate()
        .filter(|(_, (i, _))| {
            let before = src.text[..*i].chars().next_back();
            let after = src.text[i + word.len()..].chars().next();
            !before.is_some_and(is_part) && !after.is_some_and(is_part)
        })
        .map(|(nth, _)| src.range_of(word, nth))
        .collect()
}

pub trait RangeExt {
    fn shrink_end(self, by: usize) -> Range;
    fn skip_start(self, by: usize) -> Range;
}

impl RangeExt for Range {
    fn shrink_end(self, by: usize) -> Range {
        Range::new(self.start_line, self.start_col, self.end_line, self.end_col - by)
    }

    fn skip_start(self, by: usize) -> Range {
        Range::new(self.start_line, self.start_col + by, self.end_line, self.end_col)
    }
}

/// Collaborator returning a prepared module after an optional delay.
pub struct FixtureParser {
    pub module: ParsedModule,
    pub delay: Option<Duration>,
}

#[async_trait]
impl ParseCollaborator for FixtureParser {
    async fn parse(&self, document: &SourceDocument) -> Result<ParsedModule> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut module = self.module.clone();
        module.document = document.clone();
        Ok(module)
    }
}

/// Collaborator that never finishes.
pub struct StalledParser;

#[async_trait]
impl ParseCollaborator for StalledParser {
    async fn parse(&self, _document: &SourceDocument) -> Result<ParsedModule> {
        std::future::pending::<()>().await;
        Err(GroovyscopeError::Parsing("parse never completes".into()))
    }
}

/// Collaborator that always fails.
pub struct BrokenParser;

#[async_trait]
impl ParseCollaborator for BrokenParser {
    async fn parse(&self, document: &SourceDocument) -> Result<ParsedModule> {
        Err(GroovyscopeError::Parsing(format!("cannot parse {}", document.uri)))
    }
}
