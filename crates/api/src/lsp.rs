//! Conversions from the service models into `lsp-types` values.
//!
//! The adapter layer owns transport and URIs; only position-level values
//! are converted here.

use crate::models::{
    DocumentHighlight, HighlightKind, Position, Range, SignatureHelp, SymbolKind, TextEdit,
};

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

impl From<Position> for lsp_types::Position {
    fn from(pos: Position) -> Self {
        lsp_types::Position::new(to_u32(pos.line), to_u32(pos.col))
    }
}

impl From<lsp_types::Position> for Position {
    fn from(pos: lsp_types::Position) -> Self {
        Position::new(pos.line as usize, pos.character as usize)
    }
}

impl From<Range> for lsp_types::Range {
    fn from(range: Range) -> Self {
        lsp_types::Range::new(range.start().into(), range.end().into())
    }
}

impl From<TextEdit> for lsp_types::TextEdit {
    fn from(edit: TextEdit) -> Self {
        lsp_types::TextEdit::new(edit.range.into(), edit.new_text)
    }
}

impl From<DocumentHighlight> for lsp_types::DocumentHighlight {
    fn from(h: DocumentHighlight) -> Self {
        let kind = match h.kind {
            HighlightKind::Read => lsp_types::DocumentHighlightKind::READ,
            HighlightKind::Write => lsp_types::DocumentHighlightKind::WRITE,
        };
        lsp_types::DocumentHighlight {
            range: h.range.into(),
            kind: Some(kind),
        }
    }
}

impl From<SymbolKind> for lsp_types::SymbolKind {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Class => lsp_types::SymbolKind::CLASS,
            SymbolKind::Method => lsp_types::SymbolKind::METHOD,
            SymbolKind::Constructor => lsp_types::SymbolKind::CONSTRUCTOR,
            SymbolKind::Field => lsp_types::SymbolKind::FIELD,
            SymbolKind::Property => lsp_types::SymbolKind::PROPERTY,
            SymbolKind::Variable | SymbolKind::Parameter => lsp_types::SymbolKind::VARIABLE,
            SymbolKind::Import => lsp_types::SymbolKind::MODULE,
        }
    }
}

impl From<SignatureHelp> for lsp_types::SignatureHelp {
    fn from(help: SignatureHelp) -> Self {
        let signatures = help
            .signatures
            .iter()
            .map(|sig| lsp_types::SignatureInformation {
                label: sig.label(),
                documentation: None,
                parameters: Some(
                    sig.parameters
                        .iter()
                        .map(|p| lsp_types::ParameterInformation {
                            label: lsp_types::ParameterLabel::Simple(p.label()),
                            documentation: None,
                        })
                        .collect(),
                ),
                active_parameter: None,
            })
            .collect();

        lsp_types::SignatureHelp {
            signatures,
            active_signature: Some(to_u32(help.active_signature)),
            active_parameter: Some(to_u32(help.active_parameter)),
        }
    }
}
