pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod index;
pub mod logging;
pub mod naming;
pub mod resolver;
pub mod symbols;

pub use config::ServiceConfig;
pub use engine::{DocumentSnapshot, DocumentStore, LanguageService, ParseCollaborator, Session};
pub use error::{GroovyscopeError, Result};
pub use index::AstIndex;
pub use resolver::DefinitionResolver;
pub use symbols::SymbolRegistry;
