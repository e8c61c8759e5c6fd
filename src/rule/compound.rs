//! Several rules interleaved position by position.

use std::fmt;

use super::SoundChange;
use super::rule::Rule;
use crate::errors::ParseResult;
use crate::phonetic::{Sequence, SequenceFactory};

/// Rules applied together in one left-to-right pass.
///
/// At each position every rule gets one chance, in order, before the pass moves on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundRule {
    rules: Vec<Rule>,
}

impl CompoundRule {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Compile one rule per non-empty line
    pub fn parse(text: &str, factory: &SequenceFactory) -> ParseResult<Self> {
        let rules = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Rule::new(line, factory))
            .collect::<ParseResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl SoundChange for CompoundRule {
    fn apply(&self, input: &Sequence) -> Sequence {
        let mut output = input.clone();
        let mut index = 0;
        while index < output.len() {
            self.apply_at(&mut output, index);
            index += 1;
        }
        output
    }

    fn apply_at(&self, output: &mut Sequence, index: usize) -> Option<usize> {
        let mut next = None;
        for rule in &self.rules {
            if index >= output.len() {
                break;
            }
            if let Some(n) = rule.apply_at(output, index) {
                next = Some(n);
            }
        }
        next
    }
}

impl fmt::Display for CompoundRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
