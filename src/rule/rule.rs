//! Rewrite rules: `sources > targets / condition`.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::SoundChange;
use super::condition::Condition;
use super::syntax::{split_keyword, split_once_top, split_whitespace_top};
use super::transform::Transform;
use crate::errors::{ErrorCode, ParseError, ParseResult};
use crate::phonetic::{FeatureModel, Sequence, SequenceFactory};

/// A compiled sound-change rule.
///
/// ```text
/// a e > æ ɛ / C_ OR _# NOT x_
/// ```
///
/// Source and target lists pair up by position; a single target is used for
/// every source. The rule applies where any positive condition holds (or
/// there are none) and no `NOT` condition holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    text: String,
    model: Arc<FeatureModel>,
    transforms: Vec<Transform>,
    conditions: Vec<Condition>,
    exceptions: Vec<Condition>,
}

impl Rule {
    pub fn new(text: &str, factory: &SequenceFactory) -> ParseResult<Self> {
        Self::parse(text, factory).map_err(|e| e.within(text))
    }

    fn parse(text: &str, factory: &SequenceFactory) -> ParseResult<Self> {
        let (transform_text, condition_text) = match split_once_top(text, '/') {
            Some((transform, condition)) => {
                if condition.trim().is_empty() {
                    return Err(ParseError::new(ErrorCode::E0506, text)
                        .with_hint("remove the '/' or add a condition such as '_#'"));
                }
                (transform, Some(condition))
            }
            None => (text, None),
        };

        let transforms = parse_transforms(transform_text, factory)?;
        let (conditions, exceptions) = match condition_text {
            Some(condition_text) => parse_conditions(condition_text, factory)?,
            None => (Vec::new(), Vec::new()),
        };

        debug!(
            rule = text,
            transforms = transforms.len(),
            conditions = conditions.len(),
            exceptions = exceptions.len(),
            "compiled rule"
        );

        Ok(Self {
            text: text.trim().to_string(),
            model: Arc::clone(factory.model()),
            transforms,
            conditions,
            exceptions,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn model(&self) -> &Arc<FeatureModel> {
        &self.model
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn exceptions(&self) -> &[Condition] {
        &self.exceptions
    }

    /// Source/target pairs as written, after broadcasting a single target
    pub fn transforms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.transforms
            .iter()
            .map(|t| (t.source_text.as_str(), t.target_text.as_str()))
    }

    /// Apply the rule left to right over a copy of `input`
    pub fn apply(&self, input: &Sequence) -> Sequence {
        let mut output = input.clone();
        let mut index = 0;
        while index < output.len() {
            index = match self.apply_at(&mut output, index) {
                Some(next) => next,
                None => index + 1,
            };
        }
        output
    }

    /// Try every transform at `index`; on the first success rewrite `output`
    /// and return the index just past the inserted replacement.
    pub fn apply_at(&self, output: &mut Sequence, index: usize) -> Option<usize> {
        for transform in &self.transforms {
            let Some(found) = transform.match_at(output, index) else {
                continue;
            };
            if !self.conditions_match(output, index, found.end) {
                continue;
            }
            let replacement = transform.replacement(output, &found);
            let removed = output.remove(index, found.end);
            output.insert(&replacement, index);
            trace!(
                rule = self.text.as_str(),
                index,
                removed = %removed,
                inserted = %replacement,
                "applied"
            );
            return Some(index + replacement.len());
        }
        None
    }

    /// Positive conditions (any, or none given) and no exception
    pub fn conditions_match(&self, word: &Sequence, start: usize, end: usize) -> bool {
        let positive = self.conditions.is_empty()
            || self.conditions.iter().any(|c| c.is_match(word, start, end));
        positive && !self.exceptions.iter().any(|c| c.is_match(word, start, end))
    }
}

impl SoundChange for Rule {
    fn apply(&self, input: &Sequence) -> Sequence {
        Rule::apply(self, input)
    }

    fn apply_at(&self, output: &mut Sequence, index: usize) -> Option<usize> {
        Rule::apply_at(self, output, index)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn parse_transforms(text: &str, factory: &SequenceFactory) -> ParseResult<Vec<Transform>> {
    let (source, target) = split_once_top(text, '>').ok_or_else(|| {
        ParseError::new(ErrorCode::E0501, text).with_hint("write the change as 'source > target'")
    })?;
    let sources = split_whitespace_top(source);
    let targets = split_whitespace_top(target);
    if sources.is_empty() || targets.is_empty() {
        let side = if sources.is_empty() { "source" } else { "target" };
        return Err(ParseError::builder(ErrorCode::E0502)
            .message(format!("empty {side} side"))
            .fragment(text.trim())
            .build());
    }

    if targets.len() > sources.len() || (targets.len() < sources.len() && targets.len() != 1) {
        return Err(ParseError::builder(ErrorCode::E0503)
            .message(format!(
                "{} sources but {} targets",
                sources.len(),
                targets.len()
            ))
            .fragment(text.trim())
            .hint("use one target per source, or a single target for all of them")
            .build());
    }

    sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let target = targets.get(i).unwrap_or(&targets[0]);
            Transform::new(source, target, factory)
        })
        .collect()
}

fn parse_conditions(
    text: &str,
    factory: &SequenceFactory,
) -> ParseResult<(Vec<Condition>, Vec<Condition>)> {
    let clauses = split_keyword(text, "NOT");
    if clauses.len() > 2 {
        return Err(ParseError::builder(ErrorCode::E0507)
            .message("a condition may contain at most one NOT")
            .fragment(text.trim())
            .build());
    }

    let conditions = match clauses[0] {
        "" if clauses.len() == 2 => Vec::new(),
        clause => parse_alternatives(clause, factory)?,
    };
    let exceptions = match clauses.get(1) {
        Some(clause) => parse_alternatives(clause, factory)?,
        None => Vec::new(),
    };
    Ok((conditions, exceptions))
}

fn parse_alternatives(text: &str, factory: &SequenceFactory) -> ParseResult<Vec<Condition>> {
    split_keyword(text, "OR")
        .into_iter()
        .map(|clause| {
            if clause.is_empty() {
                Err(ParseError::new(ErrorCode::E0506, text))
            } else {
                Condition::new(clause, factory)
            }
        })
        .collect()
}
