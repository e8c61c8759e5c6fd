//! Running compiled machines over segment sequences.
//!
//! Matching is a reachability search over `(state, position)` pairs. The result
//! of a sub-machine at a given position is memoised for the duration of one
//! call, so groups under quantifiers are evaluated once per position.

use std::collections::BTreeSet;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::machine::{Label, MachineId, StateMachine};
use crate::phonetic::{Segment, Sequence, slice_matches_at};

impl StateMachine {
    /// Every end position of a match starting at `start`, ascending
    pub fn match_ends(&self, input: &Sequence, start: usize) -> Vec<usize> {
        if start > input.len() {
            return Vec::new();
        }
        let mut matcher = Matcher::new(self, input.segments());
        matcher.ends(self.root, start).to_vec()
    }

    /// True if any path through the machine accepts from `start`
    pub fn is_match(&self, input: &Sequence, start: usize) -> bool {
        !self.match_ends(input, start).is_empty()
    }
}

struct Matcher<'a> {
    automaton: &'a StateMachine,
    input: &'a [Segment],
    cache: FxHashMap<(MachineId, usize), Rc<Vec<usize>>>,
}

impl<'a> Matcher<'a> {
    fn new(automaton: &'a StateMachine, input: &'a [Segment]) -> Self {
        Self {
            automaton,
            input,
            cache: FxHashMap::default(),
        }
    }

    fn ends(&mut self, id: MachineId, start: usize) -> Rc<Vec<usize>> {
        if let Some(hit) = self.cache.get(&(id, start)) {
            return Rc::clone(hit);
        }

        let automaton = self.automaton;
        let machine = &automaton.machines[id];
        let mut ends = BTreeSet::new();
        let mut visited = FxHashSet::default();
        let mut stack = vec![(machine.start, start)];

        while let Some((state, position)) = stack.pop() {
            if !visited.insert((state, position)) {
                continue;
            }
            let node = &machine.states[state];
            if node.accepting {
                ends.insert(position);
            }
            for transition in &node.transitions {
                for next in self.advance(&transition.label, position) {
                    if !visited.contains(&(transition.target, next)) {
                        stack.push((transition.target, next));
                    }
                }
            }
        }

        let ends = Rc::new(ends.into_iter().collect::<Vec<_>>());
        self.cache.insert((id, start), Rc::clone(&ends));
        ends
    }

    /// Positions reachable by consuming `label` at `position`
    fn advance(&mut self, label: &Label, position: usize) -> Vec<usize> {
        let input = self.input;
        let current = input.get(position);
        match label {
            Label::Epsilon => vec![position],
            Label::Segment(pattern) => current
                .filter(|segment| segment.matches(pattern))
                .map(|_| position + 1)
                .into_iter()
                .collect(),
            Label::Features(spec) => current
                .filter(|segment| spec.matches(segment))
                .map(|_| position + 1)
                .into_iter()
                .collect(),
            Label::Class { alternatives, .. } => {
                let mut out: Vec<usize> = alternatives
                    .iter()
                    .filter(|alt| slice_matches_at(input, position, alt.segments()))
                    .map(|alt| position + alt.len())
                    .collect();
                out.sort_unstable();
                out.dedup();
                out
            }
            Label::Boundary => {
                if position == input.len() {
                    vec![position]
                } else {
                    Vec::new()
                }
            }
            Label::Group(id) => self.ends(*id, position).to_vec(),
            Label::Parallel(ids) => {
                let mut out = BTreeSet::new();
                for id in ids {
                    out.extend(self.ends(*id, position).iter().copied());
                }
                out.into_iter().collect()
            }
            Label::Negated { machine, width } => {
                let end = position + width;
                if end <= input.len() && self.ends(*machine, position).is_empty() {
                    vec![end]
                } else {
                    Vec::new()
                }
            }
        }
    }
}
