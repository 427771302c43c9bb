use crate::ast::{ParsedModule, SourceDocument};
use crate::error::Result;
use async_trait::async_trait;

/// External parser producing the syntax tree of one document generation.
#[async_trait]
pub trait ParseCollaborator: Send + Sync {
    async fn parse(&self, document: &SourceDocument) -> Result<ParsedModule>;
}
