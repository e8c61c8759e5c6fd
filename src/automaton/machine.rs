//! Arena representation of compiled patterns.
//!
//! A [`StateMachine`] owns every sub-machine it needs. Groups and sets refer to
//! sub-machines by [`MachineId`], so nested structure never needs shared
//! ownership or back-pointers.

use smol_str::SmolStr;

use super::ParseDirection;
use crate::phonetic::{FeatureSpec, Segment, Sequence};

pub type StateId = usize;
pub type MachineId = usize;

/// What a transition consumes
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// Nothing
    Epsilon,
    /// One segment matching this pattern segment
    Segment(Segment),
    /// One segment satisfying a bracket spec
    Features(FeatureSpec),
    /// The first alternative that matches at the current position
    Class {
        name: SmolStr,
        alternatives: Vec<Sequence>,
    },
    /// Nothing, but only at the end of the traversed sequence
    Boundary,
    /// Any run accepted by a sub-machine
    Group(MachineId),
    /// Any run accepted by one of several sub-machines
    Parallel(Vec<MachineId>),
    /// Exactly `width` segments, provided the sub-machine does not match here
    Negated { machine: MachineId, width: usize },
}

impl Label {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Self::Epsilon)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub label: Label,
    pub target: StateId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    pub accepting: bool,
    pub transitions: Vec<Transition>,
}

/// One flat automaton: a start state and its outgoing graph
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Machine {
    pub start: StateId,
    pub states: Vec<State>,
}

impl Machine {
    pub(crate) fn add_state(&mut self) -> StateId {
        self.states.push(State::default());
        self.states.len() - 1
    }

    pub(crate) fn connect(&mut self, from: StateId, label: Label, target: StateId) {
        self.states[from].transitions.push(Transition { label, target });
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }
}

/// A compiled pattern with all of its sub-machines
#[derive(Debug, Clone, PartialEq)]
pub struct StateMachine {
    pub(crate) name: SmolStr,
    pub(crate) direction: ParseDirection,
    pub(crate) machines: Vec<Machine>,
    pub(crate) root: MachineId,
}

impl StateMachine {
    /// A machine accepting the empty prefix at every position
    pub fn empty(name: &str, direction: ParseDirection) -> Self {
        let mut machine = Machine::default();
        let start = machine.add_state();
        machine.states[start].accepting = true;
        Self {
            name: SmolStr::new(name),
            direction,
            machines: vec![machine],
            root: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> ParseDirection {
        self.direction
    }

    pub fn root(&self) -> MachineId {
        self.root
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn machine(&self, id: MachineId) -> &Machine {
        &self.machines[id]
    }

    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    pub fn state_count(&self) -> usize {
        self.machines.iter().map(|m| m.states.len()).sum()
    }

    /// True if the root machine accepts without consuming anything unconditionally
    pub fn is_trivial(&self) -> bool {
        let root = &self.machines[self.root];
        root.states.len() == 1 && root.states[root.start].accepting
    }
}
