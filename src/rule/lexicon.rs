//! Word lists rewritten by rules.

use std::fmt;

use rayon::prelude::*;
use smol_str::SmolStr;
use tracing::debug;

use super::SoundChange;
use crate::phonetic::{Sequence, SequenceFactory};

/// A named table of words.
///
/// Each line of the source text is a row; tab-separated cells are columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lexicon {
    name: SmolStr,
    rows: Vec<Vec<Sequence>>,
}

impl Lexicon {
    pub fn new(name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            rows: Vec::new(),
        }
    }

    pub fn parse(name: &str, text: &str, factory: &SequenceFactory) -> Self {
        let rows = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split('\t').map(|cell| factory.sequence(cell.trim())).collect())
            .collect();
        Self {
            name: SmolStr::new(name),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<Sequence>] {
        &self.rows
    }

    pub fn push_row(&mut self, row: Vec<Sequence>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every word, row by row
    pub fn words(&self) -> impl Iterator<Item = &Sequence> {
        self.rows.iter().flatten()
    }

    /// Rewrite every word with `rule`. Words are independent, so rows run in parallel.
    pub fn apply<R: SoundChange + ?Sized>(&mut self, rule: &R) {
        self.rows.par_iter_mut().for_each(|row| {
            for word in row.iter_mut() {
                *word = rule.apply(word);
            }
        });
    }

    /// Apply rules one after another, each over the whole lexicon
    pub fn apply_all<R: SoundChange>(&mut self, rules: &[R]) {
        for rule in rules {
            self.apply(rule);
        }
        debug!(lexicon = self.name.as_str(), rules = rules.len(), "applied rules");
    }
}

impl fmt::Display for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, word) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str("\t")?;
                }
                write!(f, "{word}")?;
            }
        }
        Ok(())
    }
}
