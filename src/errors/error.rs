//! Construction-time error types
//!
//! Every malformed rule, condition, pattern, bracket spec or backreference is
//! reported as a [`ParseError`] carrying:
//! - Categorized error code
//! - The offending fragment of source text
//! - Optional range of the problem inside that fragment
//! - Optional hint for fixing

use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::codes::ErrorCode;

/// A construction error with the text that caused it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message} in '{fragment}'")]
pub struct ParseError {
    /// Categorized error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// The rule, condition or token that failed to parse
    pub fragment: String,
    /// Location of the problem inside `fragment`, if known
    pub range: Option<TextRange>,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
}

impl ParseError {
    /// Create a new error with the default message for `code`
    pub fn new(code: ErrorCode, fragment: impl Into<String>) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            fragment: fragment.into(),
            range: None,
            hint: None,
        }
    }

    /// Create a builder for more complex error construction
    pub fn builder(code: ErrorCode) -> ParseErrorBuilder {
        ParseErrorBuilder::new(code)
    }

    /// Add a hint to this error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Re-anchor the error on a larger piece of text, keeping the inner fragment in the message
    pub fn within(mut self, outer: &str) -> Self {
        if self.fragment != outer {
            self.message = format!("{} ('{}')", self.message, self.fragment);
            self.fragment = outer.to_string();
            self.range = None;
        }
        self
    }

    /// Check if this error has a hint
    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    /// The offending slice of the fragment, if a range was recorded
    pub fn offending_text(&self) -> Option<&str> {
        let range = self.range?;
        self.fragment.get(usize::from(range.start())..usize::from(range.end()))
    }

    /// Format the error for display, including the hint
    pub fn format(&self) -> String {
        let mut result = self.to_string();
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

/// Builder for creating complex parse errors
pub struct ParseErrorBuilder {
    code: ErrorCode,
    message: Option<String>,
    fragment: String,
    range: Option<TextRange>,
    hint: Option<String>,
}

impl ParseErrorBuilder {
    /// Create a new builder with an error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            fragment: String::new(),
            range: None,
            hint: None,
        }
    }

    /// Set the error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the offending fragment
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = fragment.into();
        self
    }

    /// Set the range inside the fragment
    pub fn range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Set the range from byte offsets
    pub fn span(mut self, start: usize, end: usize) -> Self {
        self.range = Some(TextRange::new(
            TextSize::new(start as u32),
            TextSize::new(end as u32),
        ));
        self
    }

    /// Add a hint
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Build the parse error
    pub fn build(self) -> ParseError {
        ParseError {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            code: self.code,
            fragment: self.fragment,
            range: self.range,
            hint: self.hint,
        }
    }
}

/// Errors raised while loading a feature model
#[derive(Debug, Error)]
pub enum ModelError {
    /// A FEATURES line did not match `name [alias] type`
    #[error("malformed feature definition on line {line}: {text}")]
    FeatureDefinition { line: usize, text: String },

    /// A symbol or modifier row has the wrong number of cells
    #[error("row for '{symbol}' has {found} values, expected {expected}")]
    RowWidth {
        symbol: String,
        found: usize,
        expected: usize,
    },

    /// A FEATURES line after symbol or modifier rows were read
    #[error("feature defined after symbol rows on line {line}: {text}")]
    LateFeature { line: usize, text: String },

    /// A cell could not be read as a feature value
    #[error("invalid feature value '{value}' for '{symbol}'")]
    Value { symbol: String, value: String },

    /// IO error during read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
