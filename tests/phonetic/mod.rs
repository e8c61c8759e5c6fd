//! Phonetic layer tests
//!
//! - Feature model loading and best-symbol search
//! - Bracket feature specs
//! - Segments and sequences built through a factory

pub mod tests_feature_model;
pub mod tests_sequence_factory;
