//! # soundchange-base
//!
//! Core library for rule-based sound change: feature models, pattern automata
//! and rewrite rules.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! rule       → Condition, Rule, CompoundRule, Lexicon
//!   ↓
//! automaton  → State-machine arena, builder, matcher, GML export
//!   ↓
//! parser     → Logos lexer, pattern parser, Expression tree
//!   ↓
//! phonetic   → FeatureModel, Segment, Sequence, VariableStore, SequenceFactory
//!   ↓
//! errors     → ParseError, ErrorCode, ModelError
//!   ↓
//! base       → Constants, FormatterMode, TextRange
//! ```
//!
//! ## Example
//!
//! ```
//! use soundchange::{Rule, SequenceFactory, VariableStore, FeatureModel, FormatterMode};
//!
//! let mut variables = VariableStore::new();
//! variables.add("V = a e i o u").unwrap();
//! let factory = SequenceFactory::new(FeatureModel::empty(), variables, FormatterMode::Intelligent);
//!
//! let rule = Rule::new("p t k > b d g / V_V", &factory).unwrap();
//! let word = rule.apply(&factory.sequence("apata"));
//! assert_eq!(word.to_string(), "abada");
//! ```

// ============================================================================
// MODULES (dependency order: base → errors → phonetic → parser → automaton → rule)
// ============================================================================

/// Foundation types: constants, formatter modes, TextRange
pub mod base;

/// Construction-time errors and their codes
pub mod errors;

/// Feature models, segments, sequences and the factory that builds them
pub mod phonetic;

/// Pattern lexer and parser
pub mod parser;

/// Compiled pattern automata
pub mod automaton;

/// Conditions, rules and lexicon application
pub mod rule;

// Re-export the main entry points
pub use automaton::{ParseDirection, StateMachine};
pub use base::{FormatterMode, SegmentationMode, TextRange, TextSize};
pub use errors::{ErrorCode, ModelError, ParseError, ParseResult};
pub use phonetic::{FeatureModel, FeatureSpec, Segment, Sequence, SequenceFactory, VariableStore};
pub use rule::{CompoundRule, Condition, Lexicon, Rule, SoundChange};
