mod common;

use common::*;
use groovyscope_api::models::{SymbolKind, TextEdit};
use groovyscope_api::IndexError;
use groovyscope_core::{LanguageService, ServiceConfig};

/// Every edit replaces exactly the old name, and re-indexing the edited text
/// resolves each edited location back to one declaration.
fn assert_sound(
    old: &str,
    new: &str,
    build: impl Fn(&url::Url, &str) -> (SourceText, groovyscope_core::ast::ParsedModule),
) {
    let service = LanguageService::default();
    let uri = uri("soundness");
    let (src, parsed) = build(&uri, old);
    service.update(parsed);

    let session = service.session(&uri).unwrap();
    let edit = session.rename(src.pos_of(old, 0), new).unwrap();
    let edits: &[TextEdit] = edit.edits_for(&uri);
    assert!(!edits.is_empty());

    let (expected, reparsed) = build(&uri, new);
    assert_eq!(src.apply(edits), expected.text);

    service.update(reparsed);
    let session = service.session(&uri).unwrap();
    let declaration = session.resolve(expected.pos_of(new, 0)).unwrap();
    for nth in 0..edits.len() {
        let def = session.resolve(expected.pos_of(new, nth)).unwrap();
        assert_eq!(def.node, declaration.node);
    }
    assert!(word_ranges(&expected, old).is_empty());
}

#[test]
fn test_variable_rename_is_sound() {
    assert_sound("total", "sum", declare_and_print);
}

#[test]
fn test_method_rename_is_sound() {
    assert_sound("foo", "bar", declare_and_call_twice);
}

#[test]
fn test_property_rename_carries_accessors() {
    let service = LanguageService::default();
    let uri = uri("account");
    let (src, parsed) = account(&uri, "active");
    service.update(parsed);

    let session = service.session(&uri).unwrap();
    let def = session.resolve(src.pos_of("active", 0)).unwrap();
    assert_eq!(def.kind, SymbolKind::Property);

    let edit = session.rename(src.pos_of("active", 0), "enabled").unwrap();
    let edits = edit.edits_for(&uri);
    assert_eq!(edits.len(), 7);
    assert_eq!(edits.iter().filter(|e| e.new_text == "enabled").count(), 4);
    assert_eq!(edits.iter().filter(|e| e.new_text == "setEnabled").count(), 2);
    assert_eq!(edits.iter().filter(|e| e.new_text == "isEnabled").count(), 1);

    let (expected, _) = account(&uri, "enabled");
    assert_eq!(src.apply(edits), expected.text);
}

#[test]
fn test_property_rename_from_member_access() {
    let service = LanguageService::default();
    let uri = uri("account");
    let (src, parsed) = account(&uri, "active");
    service.update(parsed);

    let words = word_ranges(&src, "active");
    let session = service.session(&uri).unwrap();
    let from_access = session.rename(words[3].start(), "enabled").unwrap();
    let from_decl = session.rename(words[0].start(), "enabled").unwrap();
    assert_eq!(from_access, from_decl);
}

#[test]
fn test_accessor_synthesis_off_leaves_methods_alone() {
    let config = ServiceConfig {
        synthesize_accessors: false,
        ..ServiceConfig::default()
    };
    let service = LanguageService::new(config);
    let uri = uri("account");
    let (src, parsed) = account(&uri, "active");
    service.update(parsed);

    let edit = service
        .session(&uri)
        .unwrap()
        .rename(src.pos_of("active", 0), "enabled")
        .unwrap();
    assert_eq!(edit.edit_count(), 4);
}

#[test]
fn test_class_rename_covers_constructor_calls() {
    let service = LanguageService::default();
    let uri = uri("account");
    let (src, parsed) = account(&uri, "active");
    service.update(parsed);

    let session = service.session(&uri).unwrap();
    let edit = session.rename(src.pos_of("Account", 0), "Ledger").unwrap();
    let edits = edit.edits_for(&uri);
    assert_eq!(
        edits,
        &[
            TextEdit::new(src.range_of("Account", 0), "Ledger"),
            TextEdit::new(src.range_of("Account", 1), "Ledger"),
        ]
    );
}

#[test]
fn test_class_rename_covers_declared_constructors() {
    let service = LanguageService::default();
    let uri = uri("widget");
    let (src, parsed) = class_with_constructor(&uri, "Foo");
    service.update(parsed);

    let session = service.session(&uri).unwrap();
    let edit = session.rename(src.pos_of("Foo", 0), "Bar").unwrap();
    let edits = edit.edits_for(&uri);
    assert_eq!(edits.len(), 3);

    let (expected, _) = class_with_constructor(&uri, "Bar");
    let renamed = src.apply(edits);
    assert_eq!(renamed, expected.text);
    assert!(!renamed.contains("Foo"));

    // Starting from the constructor renames the whole class.
    let from_ctor = session.rename(src.pos_of("Foo", 1), "Bar").unwrap();
    assert_eq!(from_ctor, edit);
}

#[test]
fn test_failed_rename_yields_no_edits() {
    let service = LanguageService::default();
    let uri = uri("account");
    let (src, parsed) = account(&uri, "active");
    service.update(parsed);
    let session = service.session(&uri).unwrap();

    assert_eq!(
        session.rename(src.pos_of("active", 0), "while"),
        Err(IndexError::InvalidIdentifier("while".to_string()))
    );
    assert_eq!(
        session.rename(src.pos_of("true", 0), "no"),
        Err(IndexError::UnsupportedNodeKind)
    );
    // println has no declaration to rename
    assert_eq!(
        session.rename(src.pos_of("println", 0), "show"),
        Err(IndexError::NodeNotFound)
    );
}
