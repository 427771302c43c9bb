//! Groovy identifier grammar and bean accessor naming.

use groovyscope_api::{IndexError, IndexResult};

/// Reserved words that can never name a symbol.
pub const KEYWORDS: &[&str] = &[
    "abstract", "as", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "def", "default", "do", "double", "else", "enum", "extends", "false",
    "final", "finally", "float", "for", "goto", "if", "implements", "import", "in", "instanceof",
    "int", "interface", "long", "native", "new", "null", "package", "private", "protected",
    "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "threadsafe", "throw", "throws", "trait", "transient", "true", "try", "var", "void",
    "volatile", "while",
];

pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

pub fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => {
            chars.all(is_identifier_part) && !is_keyword(name)
        }
        _ => false,
    }
}

pub fn validate_identifier(name: &str) -> IndexResult<()> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(IndexError::InvalidIdentifier(name.to_string()))
    }
}

/// Upper-cases the first character: `name` -> `Name`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn is_boolean_type(type_name: Option<&str>) -> bool {
    matches!(type_name, Some("boolean" | "Boolean"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorPrefix {
    Get,
    Set,
    Is,
}

impl AccessorPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessorPrefix::Get => "get",
            AccessorPrefix::Set => "set",
            AccessorPrefix::Is => "is",
        }
    }

    pub fn apply(&self, property: &str) -> String {
        format!("{}{}", self.as_str(), capitalize(property))
    }
}

/// Accessor prefixes implied by a property's declared type.
pub fn accessor_prefixes(type_name: Option<&str>) -> Vec<AccessorPrefix> {
    let mut prefixes = vec![AccessorPrefix::Get, AccessorPrefix::Set];
    if is_boolean_type(type_name) {
        prefixes.push(AccessorPrefix::Is);
    }
    prefixes
}
