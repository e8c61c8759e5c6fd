//! Pattern automata
//!
//! Patterns compile into a [`StateMachine`]: an arena of flat machines whose
//! transitions consume literals, bracket specs, variable classes, boundaries,
//! or whole runs accepted by a sub-machine (groups, sets, negations).

mod builder;
mod graph;
mod machine;
mod matcher;

pub use machine::{Label, Machine, MachineId, State, StateId, StateMachine, Transition};

/// Traversal direction a machine was compiled for.
///
/// Backward machines read the reversed word: expressions are compiled in
/// reverse order and class alternatives are reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseDirection {
    #[default]
    Forward,
    Backward,
}
