use super::{DocumentSnapshot, DocumentStore, ParseCollaborator};
use crate::ast::{ParsedModule, SourceDocument};
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::features::{self, QueryContext};
use crate::index::IndexedNode;
use crate::resolver::{DefinitionResolver, ResolveStrategy};
use crate::symbols::MethodDecl;
use async_trait::async_trait;
use groovyscope_api::models::{
    Definition, DocumentHighlight, DocumentSymbol, Location, NodeId, Position, PositionContext,
    Range, Reference, ReferenceQuery, SignatureHelp, WorkspaceEdit,
};
use groovyscope_api::semantic::{
    ReferenceAnalyzer, RenameProvider, SignatureHelpProvider, SymbolInfoProvider, SymbolNavigator,
};
use groovyscope_api::IndexResult;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Entry point for editor queries over the current document snapshots.
pub struct LanguageService {
    store: Arc<DocumentStore>,
    resolver: DefinitionResolver,
    config: ServiceConfig,
}

impl Default for LanguageService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl LanguageService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            store: Arc::new(DocumentStore::new()),
            resolver: DefinitionResolver::new(),
            config,
        }
    }

    /// Adds a domain-specific strategy ahead of the built-in ones.
    pub fn with_strategy(mut self, strategy: Arc<dyn ResolveStrategy>) -> Self {
        self.resolver.prepend(strategy);
        self
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn update(&self, parsed: ParsedModule) -> Arc<DocumentSnapshot> {
        self.store.update(parsed)
    }

    pub async fn refresh(
        &self,
        document: SourceDocument,
        collaborator: &dyn ParseCollaborator,
        cancel: &CancellationToken,
    ) -> Result<Option<Arc<DocumentSnapshot>>> {
        self.store.refresh(document, collaborator, cancel).await
    }

    pub fn close(&self, uri: &Url) -> bool {
        self.store.close(uri)
    }

    pub fn session(&self, uri: &Url) -> IndexResult<Session<'_>> {
        self.session_with(uri, Vec::new())
    }

    /// A query session that also sees the declarations of `auxiliary`.
    pub fn session_with(
        &self,
        uri: &Url,
        auxiliary: Vec<Arc<DocumentSnapshot>>,
    ) -> IndexResult<Session<'_>> {
        Ok(Session {
            snapshot: self.store.snapshot(uri)?,
            auxiliary,
            resolver: &self.resolver,
            config: &self.config,
        })
    }

    pub fn get_node_at(&self, uri: &Url, pos: Position) -> IndexResult<Option<IndexedNode>> {
        let snapshot = self.store.snapshot(uri)?;
        Ok(snapshot.index.node_at(pos).cloned())
    }

    pub fn contains(&self, uri: &Url, ancestor: NodeId, node: NodeId) -> IndexResult<bool> {
        Ok(self.store.snapshot(uri)?.index.contains(ancestor, node))
    }

    pub fn get_all_nodes(&self, uri: &Url) -> IndexResult<Vec<IndexedNode>> {
        Ok(self.store.snapshot(uri)?.index.all_nodes().cloned().collect())
    }

    pub fn find_method_declarations(&self, uri: &Url, name: &str) -> IndexResult<Vec<MethodDecl>> {
        let snapshot = self.store.snapshot(uri)?;
        Ok(snapshot
            .registry
            .find_method_declarations(name)
            .into_iter()
            .cloned()
            .collect())
    }
}

/// One snapshot held for the duration of a query.
pub struct Session<'a> {
    snapshot: Arc<DocumentSnapshot>,
    auxiliary: Vec<Arc<DocumentSnapshot>>,
    resolver: &'a DefinitionResolver,
    config: &'a ServiceConfig,
}

impl Session<'_> {
    fn ctx(&self) -> QueryContext<'_> {
        QueryContext::new(&self.snapshot, self.resolver, &self.auxiliary)
    }

    pub fn snapshot(&self) -> &Arc<DocumentSnapshot> {
        &self.snapshot
    }

    pub fn node_at(&self, pos: Position) -> Option<&IndexedNode> {
        self.snapshot.index.node_at(pos)
    }

    pub fn resolve(&self, pos: Position) -> IndexResult<Definition> {
        self.ctx().resolve_at(pos)
    }

    pub fn definition(&self, pos: Position) -> IndexResult<Location> {
        self.resolve(pos).map(|def| def.location())
    }

    pub fn references(&self, pos: Position, include_declaration: bool) -> IndexResult<Vec<Reference>> {
        features::find_references(&self.ctx(), pos, include_declaration)
    }

    pub fn highlights(&self, pos: Position) -> IndexResult<Vec<DocumentHighlight>> {
        features::highlights(&self.ctx(), pos)
    }

    pub fn prepare_rename(&self, pos: Position) -> IndexResult<Range> {
        features::prepare_rename(&self.ctx(), pos, self.config)
    }

    pub fn rename(&self, pos: Position, new_name: &str) -> IndexResult<WorkspaceEdit> {
        features::rename(&self.ctx(), pos, new_name, self.config)
    }

    pub fn signature_help(&self, pos: Position) -> IndexResult<SignatureHelp> {
        features::signature_help(&self.ctx(), pos)
    }

    pub fn document_symbols(&self) -> Vec<DocumentSymbol> {
        features::document_symbols(&self.snapshot)
    }
}

/// "Nothing here" outcomes become `None`; the rest stay errors.
fn settle<T>(result: IndexResult<T>) -> IndexResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_empty_result() => Ok(None),
        Err(err) => Err(err),
    }
}

#[async_trait]
impl SymbolNavigator for LanguageService {
    async fn find_definition(&self, ctx: &PositionContext) -> IndexResult<Option<Location>> {
        settle(self.session(&ctx.uri)?.definition(ctx.position))
    }

    async fn find_highlights(&self, ctx: &PositionContext) -> IndexResult<Vec<DocumentHighlight>> {
        settle(self.session(&ctx.uri)?.highlights(ctx.position)).map(Option::unwrap_or_default)
    }
}

#[async_trait]
impl ReferenceAnalyzer for LanguageService {
    async fn find_references(&self, query: &ReferenceQuery) -> IndexResult<Vec<Reference>> {
        let session = self.session(&query.context.uri)?;
        settle(session.references(query.context.position, query.include_declaration))
            .map(Option::unwrap_or_default)
    }
}

#[async_trait]
impl RenameProvider for LanguageService {
    async fn prepare_rename(&self, ctx: &PositionContext) -> IndexResult<Option<Range>> {
        settle(self.session(&ctx.uri)?.prepare_rename(ctx.position))
    }

    async fn rename(
        &self,
        ctx: &PositionContext,
        new_name: &str,
    ) -> IndexResult<Option<WorkspaceEdit>> {
        settle(self.session(&ctx.uri)?.rename(ctx.position, new_name))
    }
}

#[async_trait]
impl SignatureHelpProvider for LanguageService {
    async fn signature_help(&self, ctx: &PositionContext) -> IndexResult<Option<SignatureHelp>> {
        settle(self.session(&ctx.uri)?.signature_help(ctx.position))
    }
}

#[async_trait]
impl SymbolInfoProvider for LanguageService {
    async fn document_symbols(&self, uri: &Url) -> IndexResult<Vec<DocumentSymbol>> {
        Ok(self.session(uri)?.document_symbols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovyscope_api::{IndexError, LanguageEngine};

    fn assert_engine<T: LanguageEngine>() {}

    #[test]
    fn test_service_is_a_language_engine() {
        assert_engine::<LanguageService>();
    }

    #[test]
    fn test_settle_keeps_only_tagged_failures() {
        assert_eq!(settle::<u8>(Err(IndexError::NodeNotFound)), Ok(None));
        assert_eq!(settle::<u8>(Err(IndexError::InvalidPosition)), Ok(None));
        assert_eq!(settle::<u8>(Err(IndexError::UnsupportedNodeKind)), Ok(None));
        assert_eq!(
            settle::<u8>(Err(IndexError::StaleIndex("u".into()))),
            Err(IndexError::StaleIndex("u".into()))
        );
        assert_eq!(settle(Ok(3u8)), Ok(Some(3)));
    }
}
