//! Error code definitions for construction-time diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid characters, malformed tokens)
//! - E02xx: Structural errors (groups, sets, quantifiers)
//! - E03xx: Feature errors (bracket specs, feature values)
//! - E04xx: Variable and backreference errors
//! - E05xx: Rule and condition errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for construction-time diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling filtering and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in a pattern
    E0101,
    /// Unterminated feature bracket `[`
    E0102,
    /// Malformed backreference token
    E0103,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Unclosed parenthesis `(`
    E0201,
    /// Unclosed brace `{`
    E0202,
    /// Unexpected closing delimiter
    E0203,
    /// Quantifier with nothing to apply to
    E0204,
    /// Negation with nothing to apply to
    E0205,
    /// Empty group or set
    E0206,

    // =========================================================================
    // E03xx: Feature errors
    // =========================================================================
    /// Unknown feature name
    E0301,
    /// Feature value outside the declared range
    E0302,
    /// Malformed feature specification
    E0303,
    /// Feature specification used with a model that has no features
    E0304,
    /// Relational constraint where a value is required
    E0305,

    // =========================================================================
    // E04xx: Variable and backreference errors
    // =========================================================================
    /// Unknown variable class
    E0401,
    /// Backreference index out of range
    E0402,
    /// Illegal backreference label
    E0403,
    /// Target variable not bound by the source
    E0404,
    /// Malformed variable declaration
    E0405,

    // =========================================================================
    // E05xx: Rule and condition errors
    // =========================================================================
    /// Missing `>` in rule transform
    E0501,
    /// Empty source or target side
    E0502,
    /// Source/target count mismatch
    E0503,
    /// Missing `_` in condition
    E0504,
    /// Multiple `_` in condition
    E0505,
    /// Empty condition clause
    E0506,
    /// Illegal `NOT` clause
    E0507,
    /// Feature transform without a matching source position
    E0508,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            // Structural
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            // Feature
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            // Variable
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0405 => "E0405",
            // Rule
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0504 => "E0504",
            Self::E0505 => "E0505",
            Self::E0506 => "E0506",
            Self::E0507 => "E0507",
            Self::E0508 => "E0508",
            // Generic
            Self::E0901 => "E0901",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 | Self::E0206 => {
                "structural error"
            }
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 => "feature error",
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 | Self::E0405 => "variable error",
            Self::E0501
            | Self::E0502
            | Self::E0503
            | Self::E0504
            | Self::E0505
            | Self::E0506
            | Self::E0507
            | Self::E0508 => "rule error",
            Self::E0901 | Self::E0999 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated feature bracket",
            Self::E0103 => "malformed backreference",
            // Structural
            Self::E0201 => "unclosed parenthesis",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unexpected closing delimiter",
            Self::E0204 => "quantifier without an atom",
            Self::E0205 => "negation without an atom",
            Self::E0206 => "empty group or set",
            // Feature
            Self::E0301 => "unknown feature",
            Self::E0302 => "feature value out of range",
            Self::E0303 => "malformed feature specification",
            Self::E0304 => "feature model has no features",
            Self::E0305 => "relational constraint not allowed here",
            // Variable
            Self::E0401 => "unknown variable class",
            Self::E0402 => "backreference index out of range",
            Self::E0403 => "illegal backreference label",
            Self::E0404 => "target variable not bound by the source",
            Self::E0405 => "malformed variable declaration",
            // Rule
            Self::E0501 => "rule missing '>'",
            Self::E0502 => "empty transform side",
            Self::E0503 => "source/target count mismatch",
            Self::E0504 => "condition missing '_'",
            Self::E0505 => "condition has multiple '_'",
            Self::E0506 => "empty condition",
            Self::E0507 => "illegal NOT clause",
            Self::E0508 => "feature transform has no source position",
            // Generic
            Self::E0901 => "unexpected token",
            Self::E0999 => "internal parser error",
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 | Self::E0206
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
