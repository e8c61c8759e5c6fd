//! Pattern parsing
//!
//! ```text
//! Pattern Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind
//!     ↓
//! Parser → Expression tree, literals resolved through a SequenceFactory
//! ```
//!
//! Grammar:
//!
//! ```text
//! Pattern    = (Quantified | ws)*
//! Quantified = '!'? Atom ('?' | '*' | '+')?
//! Atom       = '(' Pattern ')' | '{' Alt (ws Alt)* '}' | '#' | '[' spec ']' | text
//! ```

mod expression;
mod lexer;
mod pattern;

pub use expression::{Atom, Expression, Literal, Quantifier, min_width};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use pattern::Pattern;
