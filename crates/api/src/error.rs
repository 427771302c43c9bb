/// Recoverable outcomes of a language-service query.
///
/// None of these are fatal. Callers usually treat them as "nothing to show".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("No declaration found for the symbol")]
    NodeNotFound,
    #[error("Position is outside every indexed node")]
    InvalidPosition,
    #[error("Node kind is not handled by any resolution strategy")]
    UnsupportedNodeKind,
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("No completed index for {0}")]
    StaleIndex(String),
}

impl IndexError {
    /// Outcomes that simply mean "no symbol here".
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            IndexError::NodeNotFound | IndexError::InvalidPosition | IndexError::UnsupportedNodeKind
        )
    }
}

pub type IndexResult<T> = std::result::Result<T, IndexError>;
