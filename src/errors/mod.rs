//! Error handling module
//!
//! Construction of models, patterns, conditions and rules reports failures
//! through these types; matching and rule application never fail.
//! - Categorized error codes for filtering and documentation
//! - The offending fragment and optional range inside it
//! - Hints for common mistakes

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{ModelError, ParseError, ParseErrorBuilder};

/// Result alias for construction-time operations
pub type ParseResult<T> = Result<T, ParseError>;
