pub mod error;
pub mod lsp;
pub mod models;
pub mod semantic;

// Re-export commonly used types
pub use error::{IndexError, IndexResult};
pub use models::*;
pub use semantic::{
    ReferenceAnalyzer, RenameProvider, SignatureHelpProvider, SymbolInfoProvider, SymbolNavigator,
};

/// Composite trait representing the full language-service API.
/// This allows clients to depend on a single trait instead of multiple individual ones.
pub trait LanguageEngine:
    SymbolNavigator + ReferenceAnalyzer + RenameProvider + SignatureHelpProvider + SymbolInfoProvider
{
}

impl<T> LanguageEngine for T where
    T: SymbolNavigator
        + ReferenceAnalyzer
        + RenameProvider
        + SignatureHelpProvider
        + SymbolInfoProvider
{
}
