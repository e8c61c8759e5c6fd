//! Rule tests
//!
//! - Literal, variable and backreference rewrites
//! - Conditions with OR and NOT
//! - Feature-based rules over a small model
//! - Compound rules and lexicons

pub mod tests_compound_lexicon;
