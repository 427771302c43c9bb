use crate::error::IndexResult;
use crate::models::{
    DocumentHighlight, DocumentSymbol, Location, PositionContext, Range, Reference,
    ReferenceQuery, SignatureHelp, WorkspaceEdit,
};
use async_trait::async_trait;
use url::Url;

// ============================================================================
// Core Semantic Traits
// ============================================================================
//
// "No symbol here" outcomes come back as `Ok(None)` or an empty list. Only
// `StaleIndex` and `InvalidIdentifier` surface as errors.

/// Symbol navigation: go-to-definition and same-document highlights.
#[async_trait]
pub trait SymbolNavigator: Send + Sync {
    /// Location of the declaration the symbol at `ctx` refers to.
    async fn find_definition(&self, ctx: &PositionContext) -> IndexResult<Option<Location>>;

    /// Occurrences of the symbol at `ctx`, declarations tagged as writes.
    async fn find_highlights(&self, ctx: &PositionContext) -> IndexResult<Vec<DocumentHighlight>>;
}

/// Reference analysis: find all usages of a symbol.
#[async_trait]
pub trait ReferenceAnalyzer: Send + Sync {
    /// Unordered set of references, optionally including the declaration.
    async fn find_references(&self, query: &ReferenceQuery) -> IndexResult<Vec<Reference>>;
}

#[async_trait]
pub trait RenameProvider: Send + Sync {
    /// Range of the renameable identifier at `ctx`.
    async fn prepare_rename(&self, ctx: &PositionContext) -> IndexResult<Option<Range>>;

    /// Complete edit batch for renaming the symbol at `ctx`, or nothing at all.
    async fn rename(&self, ctx: &PositionContext, new_name: &str)
    -> IndexResult<Option<WorkspaceEdit>>;
}

#[async_trait]
pub trait SignatureHelpProvider: Send + Sync {
    async fn signature_help(&self, ctx: &PositionContext) -> IndexResult<Option<SignatureHelp>>;
}

#[async_trait]
pub trait SymbolInfoProvider: Send + Sync {
    /// Outline of the declarations in one document.
    async fn document_symbols(&self, uri: &Url) -> IndexResult<Vec<DocumentSymbol>>;
}
