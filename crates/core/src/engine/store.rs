use super::ParseCollaborator;
use crate::ast::{CompilePhase, Diagnostic, ParsedModule, SourceDocument};
use crate::error::Result;
use crate::index::AstIndex;
use crate::symbols::SymbolRegistry;
use dashmap::DashMap;
use groovyscope_api::{IndexError, IndexResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

/// Index and registry of one document generation.
#[derive(Debug)]
pub struct DocumentSnapshot {
    pub document: SourceDocument,
    pub index: AstIndex,
    pub registry: SymbolRegistry,
    pub diagnostics: Vec<Diagnostic>,
    pub phase: CompilePhase,
    /// Store-wide counter, taken when the build starts.
    pub generation: u64,
}

impl DocumentSnapshot {
    pub fn build(parsed: ParsedModule, generation: u64) -> Self {
        let index = AstIndex::build(&parsed);
        let registry = SymbolRegistry::build(&index);
        Self {
            document: parsed.document,
            index,
            registry,
            diagnostics: parsed.diagnostics,
            phase: parsed.phase,
            generation,
        }
    }

    pub fn uri(&self) -> &Url {
        &self.document.uri
    }
}

#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DocumentSnapshot>>,
    generation: AtomicU64,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Indexes `parsed` and makes it the current snapshot of its document.
    pub fn update(&self, parsed: ParsedModule) -> Arc<DocumentSnapshot> {
        let snapshot = Arc::new(DocumentSnapshot::build(parsed, self.next_generation()));
        self.install(snapshot.clone());
        snapshot
    }

    /// Makes `snapshot` current; whichever swap happens last wins.
    fn install(&self, snapshot: Arc<DocumentSnapshot>) {
        debug!(
            uri = %snapshot.uri(),
            version = snapshot.document.version,
            generation = snapshot.generation,
            nodes = snapshot.index.len(),
            "snapshot swapped in"
        );
        self.documents.insert(snapshot.uri().clone(), snapshot);
    }

    /// Parses and indexes `document`.
    ///
    /// Returns `Ok(None)` when `cancel` fires before the parse completes.
    /// Once indexing starts it runs to completion and the result is swapped
    /// in regardless of later cancellation.
    pub async fn refresh(
        &self,
        document: SourceDocument,
        collaborator: &dyn ParseCollaborator,
        cancel: &CancellationToken,
    ) -> Result<Option<Arc<DocumentSnapshot>>> {
        let generation = self.next_generation();
        let parsed = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(uri = %document.uri, "parse cancelled before indexing");
                return Ok(None);
            }
            parsed = collaborator.parse(&document) => parsed?,
        };

        let snapshot =
            tokio::task::spawn_blocking(move || DocumentSnapshot::build(parsed, generation))
                .await?;
        let snapshot = Arc::new(snapshot);
        self.install(snapshot.clone());
        Ok(Some(snapshot))
    }

    pub fn snapshot(&self, uri: &Url) -> IndexResult<Arc<DocumentSnapshot>> {
        self.documents
            .get(uri)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| IndexError::StaleIndex(uri.to_string()))
    }

    /// Drops the document's snapshot; returns whether one existed.
    pub fn close(&self, uri: &Url) -> bool {
        self.documents.remove(uri).is_some()
    }

    pub fn uris(&self) -> Vec<Url> {
        self.documents.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstBuilder;
    use groovyscope_api::models::Range;

    fn parsed(uri: &Url, version: i32, names: &[&str]) -> ParsedModule {
        let mut b = AstBuilder::new();
        let refs = names
            .iter()
            .enumerate()
            .map(|(line, name)| b.var_ref(name, Range::new(line, 0, line, name.len())))
            .collect();
        let root = b.module(None, refs);
        ParsedModule::new(SourceDocument::new(uri.clone(), version), root)
    }

    #[test]
    fn test_missing_document_is_stale() {
        let store = DocumentStore::new();
        let uri = Url::parse("file:///missing.groovy").unwrap();
        assert_eq!(
            store.snapshot(&uri).unwrap_err(),
            IndexError::StaleIndex("file:///missing.groovy".to_string())
        );
    }

    #[test]
    fn test_update_replaces_without_touching_old_snapshot() {
        let store = DocumentStore::new();
        let uri = Url::parse("file:///doc.groovy").unwrap();

        let first = store.update(parsed(&uri, 1, &["a"]));
        let held = store.snapshot(&uri).unwrap();
        let second = store.update(parsed(&uri, 2, &["a", "b"]));

        assert!(second.generation > first.generation);
        assert_eq!(held.index.len(), 2);
        assert_eq!(store.snapshot(&uri).unwrap().document.version, 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_close_drops_snapshot() {
        let store = DocumentStore::new();
        let uri = Url::parse("file:///doc.groovy").unwrap();
        store.update(parsed(&uri, 1, &["a"]));
        assert!(store.close(&uri));
        assert!(!store.close(&uri));
        assert!(store.snapshot(&uri).is_err());
        assert!(store.is_empty());
    }
}
