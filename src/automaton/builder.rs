//! Compiling expression trees into state machines.

use tracing::debug;

use super::ParseDirection;
use super::machine::{Label, Machine, MachineId, StateId, StateMachine};
use crate::errors::ParseResult;
use crate::parser::{Atom, Expression, Literal, Pattern, Quantifier};
use crate::phonetic::{Sequence, SequenceFactory};

impl StateMachine {
    /// Parse `text` and compile it for the given traversal direction
    pub fn parse(
        name: &str,
        text: &str,
        factory: &SequenceFactory,
        direction: ParseDirection,
    ) -> ParseResult<Self> {
        let pattern = Pattern::parse(text, factory)?;
        Ok(Self::compile(name, &pattern, direction))
    }

    pub fn compile(name: &str, pattern: &Pattern, direction: ParseDirection) -> Self {
        let mut session = BuildSession {
            machines: Vec::new(),
            direction,
        };
        let root = session.build(pattern.expressions());
        let machine = Self {
            name: name.into(),
            direction,
            machines: session.machines,
            root,
        };
        debug!(
            name,
            pattern = pattern.text(),
            ?direction,
            machines = machine.machine_count(),
            states = machine.state_count(),
            "compiled pattern"
        );
        machine
    }
}

/// State allocation for one compilation. Ids are local to the session.
struct BuildSession {
    machines: Vec<Machine>,
    direction: ParseDirection,
}

impl BuildSession {
    fn build(&mut self, expressions: &[Expression]) -> MachineId {
        let id = self.machines.len();
        self.machines.push(Machine::default());

        let mut machine = Machine::default();
        machine.start = machine.add_state();
        let mut current = machine.start;
        match self.direction {
            ParseDirection::Forward => {
                for expression in expressions {
                    current = self.compile(&mut machine, current, expression);
                }
            }
            ParseDirection::Backward => {
                for expression in expressions.iter().rev() {
                    current = self.compile(&mut machine, current, expression);
                }
            }
        }
        machine.states[current].accepting = true;

        self.machines[id] = machine;
        id
    }

    fn compile(&mut self, machine: &mut Machine, current: StateId, expression: &Expression) -> StateId {
        let label = self.label(expression);
        let next = machine.add_state();
        match expression.quantifier {
            Quantifier::One => machine.connect(current, label, next),
            Quantifier::Optional => {
                machine.connect(current, label, next);
                machine.connect(current, Label::Epsilon, next);
            }
            Quantifier::Star => {
                let again = machine.add_state();
                machine.connect(current, label, again);
                machine.connect(again, Label::Epsilon, current);
                machine.connect(current, Label::Epsilon, next);
            }
            Quantifier::Plus => {
                let again = machine.add_state();
                machine.connect(current, label, again);
                machine.connect(again, Label::Epsilon, current);
                machine.connect(again, Label::Epsilon, next);
            }
        }
        next
    }

    fn label(&mut self, expression: &Expression) -> Label {
        if expression.negated {
            let inner = Expression::new(expression.atom.clone());
            let machine = self.build(std::slice::from_ref(&inner));
            return Label::Negated {
                machine,
                width: expression.atom.min_width().max(1),
            };
        }
        match &expression.atom {
            Atom::Literal(Literal::Segment(segment)) => Label::Segment(segment.clone()),
            Atom::Literal(Literal::Features(spec)) => Label::Features(spec.clone()),
            Atom::Variable { name, alternatives } => Label::Class {
                name: name.clone(),
                alternatives: match self.direction {
                    ParseDirection::Forward => alternatives.clone(),
                    ParseDirection::Backward => alternatives.iter().map(Sequence::reversed).collect(),
                },
            },
            Atom::Boundary => Label::Boundary,
            Atom::Group(children) => Label::Group(self.build(children)),
            Atom::Set(alternatives) => {
                Label::Parallel(alternatives.iter().map(|alt| self.build(alt)).collect())
            }
        }
    }
}
