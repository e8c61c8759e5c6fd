//! Automaton and condition tests
//!
//! - Quantifiers, groups, sets and negation in post-conditions
//! - Backward matching of pre-conditions
//! - Variables with single and multi-segment alternatives

pub mod tests_condition;
pub mod tests_state_machine;
