//! Pattern expression tree.

use std::fmt;

use smol_str::SmolStr;

use crate::base::constants::BOUNDARY;
use crate::phonetic::{FeatureSpec, Segment, Sequence};

/// Repetition applied to an atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quantifier {
    /// exactly once
    #[default]
    One,
    /// `?`
    Optional,
    /// `*`
    Star,
    /// `+`
    Plus,
}

impl Quantifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "",
            Self::Optional => "?",
            Self::Star => "*",
            Self::Plus => "+",
        }
    }

    /// True if the quantified atom may match nothing
    pub fn allows_zero(&self) -> bool {
        matches!(self, Self::Optional | Self::Star)
    }
}

/// A single-segment literal
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Segment(Segment),
    Features(FeatureSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Literal(Literal),
    /// A variable class, resolved to its alternatives
    Variable {
        name: SmolStr,
        alternatives: Vec<Sequence>,
    },
    /// `#`
    Boundary,
    /// `( ... )`
    Group(Vec<Expression>),
    /// `{ alt alt ... }`
    Set(Vec<Vec<Expression>>),
}

impl Atom {
    /// Fewest segments this atom can consume
    pub fn min_width(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Variable { alternatives, .. } => {
                alternatives.iter().map(Sequence::len).min().unwrap_or(0)
            }
            Self::Boundary => 0,
            Self::Group(children) => min_width(children),
            Self::Set(alternatives) => alternatives
                .iter()
                .map(|alt| min_width(alt))
                .min()
                .unwrap_or(0),
        }
    }
}

/// An atom with its quantifier and negation flag
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub atom: Atom,
    pub quantifier: Quantifier,
    pub negated: bool,
}

impl Expression {
    pub fn new(atom: Atom) -> Self {
        Self {
            atom,
            quantifier: Quantifier::One,
            negated: false,
        }
    }

    pub fn min_width(&self) -> usize {
        if self.quantifier.allows_zero() {
            0
        } else {
            self.atom.min_width()
        }
    }
}

/// Fewest segments a sequence of expressions can consume
pub fn min_width(expressions: &[Expression]) -> usize {
    expressions.iter().map(Expression::min_width).sum()
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Segment(segment) => write!(f, "{segment}"),
            Self::Features(spec) => write!(f, "{spec}"),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Variable { name, .. } => f.write_str(name),
            Self::Boundary => f.write_str(BOUNDARY),
            Self::Group(children) => {
                f.write_str("(")?;
                children.iter().try_for_each(|c| write!(f, "{c}"))?;
                f.write_str(")")
            }
            Self::Set(alternatives) => {
                f.write_str("{")?;
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    alt.iter().try_for_each(|c| write!(f, "{c}"))?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        write!(f, "{}{}", self.atom, self.quantifier.as_str())
    }
}
