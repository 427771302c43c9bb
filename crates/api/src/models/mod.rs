pub mod edit;
pub mod signature;
pub mod symbol;

pub use edit::*;
pub use signature::*;
pub use symbol::*;
