//! Feature definitions and bracket feature specifications.
//!
//! A bracket spec such as `[+con, -son, hgt:1]` describes an underspecified
//! segment: every feature it names is constrained, every other feature is free.

use std::fmt;

use smol_str::SmolStr;

use super::model::FeatureModel;
use super::segment::Segment;
use crate::base::constants::{UNDEFINED_VALUE, is_undefined, values_equal};
use crate::errors::{ErrorCode, ParseError, ParseResult};

/// The value domain of a feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureType {
    /// `+` / `-`
    Binary,
    /// `+` / `0` / `-`
    Ternary,
    /// present (`+`) or unspecified
    Unary,
    /// Any value in `min..=max`
    Numeric { min: f64, max: f64 },
}

impl FeatureType {
    /// Check whether `value` lies in this feature's domain
    pub fn accepts(&self, value: f64) -> bool {
        match *self {
            Self::Binary => value == 1.0 || value == -1.0,
            Self::Ternary => value == 1.0 || value == 0.0 || value == -1.0,
            Self::Unary => value == 1.0,
            Self::Numeric { min, max } => (min..=max).contains(&value),
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => f.write_str("binary"),
            Self::Ternary => f.write_str("ternary"),
            Self::Unary => f.write_str("unary"),
            Self::Numeric { min, max } => write!(f, "numeric({min},{max})"),
        }
    }
}

/// A named feature with an optional short alias
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDefinition {
    pub name: SmolStr,
    pub alias: Option<SmolStr>,
    pub kind: FeatureType,
}

/// How a bracket spec constrains one feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `+f`, `-f`, `f:v`, `f=v`
    Equal,
    /// `f>v`
    Greater,
    /// `f<v`
    Less,
}

impl Relation {
    fn symbol(&self) -> char {
        match self {
            Self::Equal => ':',
            Self::Greater => '>',
            Self::Less => '<',
        }
    }
}

/// A single constraint inside a bracket spec
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureConstraint {
    pub index: usize,
    pub relation: Relation,
    pub value: f64,
}

impl FeatureConstraint {
    /// Check a segment's feature value against this constraint
    pub fn accepts(&self, value: f64) -> bool {
        if is_undefined(value) {
            return false;
        }
        match self.relation {
            Relation::Equal => values_equal(value, self.value),
            Relation::Greater => value > self.value,
            Relation::Less => value < self.value,
        }
    }
}

/// A parsed `[...]` feature specification
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSpec {
    text: SmolStr,
    constraints: Vec<FeatureConstraint>,
}

impl FeatureSpec {
    /// Parse a bracket spec against a model's feature table.
    ///
    /// Items are comma separated: `+name`, `-name`, a bare `name` (same as `+name`),
    /// or `name` followed by `:`, `=`, `>` or `<` and a number.
    pub fn parse(model: &FeatureModel, text: &str) -> ParseResult<Self> {
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .ok_or_else(|| ParseError::new(ErrorCode::E0303, trimmed))?;

        if model.feature_count() == 0 {
            return Err(ParseError::new(ErrorCode::E0304, trimmed)
                .with_hint("load a feature model before using bracket specs"));
        }

        let mut constraints = Vec::new();
        for item in inner.split(',') {
            let item = item.trim();
            if item.is_empty() {
                return Err(ParseError::builder(ErrorCode::E0303)
                    .message("empty item in feature specification")
                    .fragment(trimmed)
                    .build());
            }
            constraints.push(parse_item(model, item, trimmed)?);
        }

        Ok(Self {
            text: SmolStr::new(trimmed),
            constraints,
        })
    }

    /// The source text of this spec
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn constraints(&self) -> &[FeatureConstraint] {
        &self.constraints
    }

    /// True if any constraint is `<` or `>`
    pub fn is_relational(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| c.relation != Relation::Equal)
    }

    /// Check whether a concrete segment satisfies every constraint
    pub fn matches(&self, segment: &Segment) -> bool {
        let features = segment.features();
        self.constraints.iter().all(|c| {
            features
                .get(c.index)
                .is_some_and(|&value| c.accepts(value))
        })
    }

    /// The underspecified feature vector: constrained values set, everything else wildcard
    pub fn to_features(&self, size: usize) -> Vec<f64> {
        let mut features = vec![UNDEFINED_VALUE; size];
        self.overlay(&mut features);
        features
    }

    /// Write every equality constraint into `features`
    pub fn overlay(&self, features: &mut [f64]) {
        for c in &self.constraints {
            if c.relation == Relation::Equal {
                if let Some(slot) = features.get_mut(c.index) {
                    *slot = c.value;
                }
            }
        }
    }
}

impl fmt::Display for FeatureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn parse_item(model: &FeatureModel, item: &str, spec: &str) -> ParseResult<FeatureConstraint> {
    let (name, relation, value) = if let Some(name) = item.strip_prefix('+') {
        (name.trim(), Relation::Equal, 1.0)
    } else if let Some(name) = item.strip_prefix('-') {
        (name.trim(), Relation::Equal, -1.0)
    } else if let Some(pos) = item.find([':', '=', '>', '<']) {
        let relation = match &item[pos..pos + 1] {
            ">" => Relation::Greater,
            "<" => Relation::Less,
            _ => Relation::Equal,
        };
        let raw = item[pos + 1..].trim();
        let value = raw.parse::<f64>().map_err(|_| {
            ParseError::builder(ErrorCode::E0303)
                .message(format!("'{raw}' is not a feature value"))
                .fragment(spec)
                .build()
        })?;
        (item[..pos].trim(), relation, value)
    } else {
        (item, Relation::Equal, 1.0)
    };

    let index = model.feature_index(name).ok_or_else(|| {
        ParseError::builder(ErrorCode::E0301)
            .message(format!("unknown feature '{name}'"))
            .fragment(spec)
            .build()
    })?;

    if relation == Relation::Equal {
        let kind = model.features()[index].kind;
        if !kind.accepts(value) {
            return Err(ParseError::builder(ErrorCode::E0302)
                .message(format!("value {value} is out of range for {kind} feature '{name}'"))
                .fragment(spec)
                .build());
        }
    }

    Ok(FeatureConstraint {
        index,
        relation,
        value,
    })
}

impl fmt::Display for FeatureConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.index, self.relation.symbol(), self.value)
    }
}
