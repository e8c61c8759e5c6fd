//! One source/target pair of a rule and its matching logic.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::constants::DELETION;
use crate::errors::{ErrorCode, ParseError, ParseResult};
use crate::phonetic::{
    FeatureModel, FeatureSpec, Segment, Sequence, SequenceFactory, backreference_len, slice_matches_at,
};

/// A segment-level element of a source token
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SourceToken {
    Literal(Segment),
    Features(FeatureSpec),
    Class {
        name: SmolStr,
        alternatives: Vec<Sequence>,
    },
}

/// A segment-level element of a target token
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TargetToken {
    Literal(Segment),
    /// `0`
    Deletion,
    /// Overlay onto the segment matched at source position `position`
    Features { spec: FeatureSpec, position: usize },
    /// `$N`, `$LabelN`, or a variable name bound by the source.
    /// `alternatives` is the class to draw from; `None` for a captured segment.
    Capture {
        index: usize,
        alternatives: Option<Vec<Sequence>>,
    },
}

/// What a capturing source token recorded during a match
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Capture {
    /// Index of the class alternative that matched
    Alternative(usize),
    /// The segment a bracket spec matched
    Segment(Segment),
}

/// Result of matching a source at one position
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SourceMatch {
    pub end: usize,
    pub captures: Vec<Capture>,
    /// Matched span of each source token
    pub spans: Vec<(usize, usize)>,
}

/// Capture slot declared by the source, used to resolve the target
struct CaptureSlot {
    name: Option<SmolStr>,
    alternatives: Option<Vec<Sequence>>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transform {
    pub source_text: String,
    pub target_text: String,
    source: Vec<SourceToken>,
    target: Vec<TargetToken>,
    model: Arc<FeatureModel>,
}

impl Transform {
    pub(crate) fn new(source_text: &str, target_text: &str, factory: &SequenceFactory) -> ParseResult<Self> {
        let source = parse_source(source_text, factory)?;
        let slots: Vec<CaptureSlot> = source
            .iter()
            .filter_map(|token| match token {
                SourceToken::Literal(_) => None,
                SourceToken::Features(_) => Some(CaptureSlot {
                    name: None,
                    alternatives: None,
                }),
                SourceToken::Class { name, alternatives } => Some(CaptureSlot {
                    name: Some(name.clone()),
                    alternatives: Some(alternatives.clone()),
                }),
            })
            .collect();
        let target = parse_target(target_text, source.len(), &slots, factory)?;

        Ok(Self {
            source_text: source_text.to_string(),
            target_text: target_text.to_string(),
            source,
            target,
            model: Arc::clone(factory.model()),
        })
    }

    /// Match the source at `index`, taking the first class alternative that fits
    pub(crate) fn match_at(&self, word: &Sequence, index: usize) -> Option<SourceMatch> {
        let segments = word.segments();
        let mut position = index;
        let mut captures = Vec::new();
        let mut spans = Vec::with_capacity(self.source.len());

        for token in &self.source {
            let start = position;
            match token {
                SourceToken::Literal(pattern) => {
                    let segment = segments.get(position)?;
                    if !segment.matches(pattern) {
                        return None;
                    }
                    position += 1;
                }
                SourceToken::Features(spec) => {
                    let segment = segments.get(position)?;
                    if !spec.matches(segment) {
                        return None;
                    }
                    captures.push(Capture::Segment(segment.clone()));
                    position += 1;
                }
                SourceToken::Class { alternatives, .. } => {
                    let (k, alternative) = alternatives
                        .iter()
                        .enumerate()
                        .find(|(_, alt)| slice_matches_at(segments, position, alt.segments()))?;
                    captures.push(Capture::Alternative(k));
                    position += alternative.len();
                }
            }
            spans.push((start, position));
        }

        Some(SourceMatch {
            end: position,
            captures,
            spans,
        })
    }

    /// Build the replacement for a match found in `word`
    pub(crate) fn replacement(&self, word: &Sequence, found: &SourceMatch) -> Sequence {
        let mut out = Sequence::new(Arc::clone(&self.model));
        for token in &self.target {
            match token {
                TargetToken::Literal(segment) => out.push(segment.clone()),
                TargetToken::Deletion => {}
                TargetToken::Features { spec, position } => {
                    let (start, end) = found.spans[*position];
                    if start < end {
                        let mut features = word[start].features().to_vec();
                        spec.overlay(&mut features);
                        out.push(resymbolize(&self.model, features));
                    }
                }
                TargetToken::Capture {
                    index,
                    alternatives,
                } => match (&found.captures[*index], alternatives) {
                    (Capture::Alternative(k), Some(class)) => {
                        if let Some(alternative) = class.get(*k) {
                            out.extend(alternative);
                        }
                    }
                    (Capture::Segment(segment), _) => out.push(segment.clone()),
                    (Capture::Alternative(_), None) => {}
                },
            }
        }
        out
    }
}

/// The registered symbol closest to `features`, rebuilt as a model segment
fn resymbolize(model: &Arc<FeatureModel>, features: Vec<f64>) -> Segment {
    match model.best_parts(&features) {
        Some((base, modifiers)) => FeatureModel::segment(model, &base, &modifiers),
        None => Segment::new("", features, Arc::clone(model)),
    }
}

fn is_bracket(text: &str) -> bool {
    text.starts_with('[') && text.ends_with(']')
}

fn parse_source(text: &str, factory: &SequenceFactory) -> ParseResult<Vec<SourceToken>> {
    let mut tokens = Vec::new();
    for parts in factory.parts(text) {
        let symbol = parts.text();
        if symbol.starts_with('$') {
            return Err(ParseError::builder(ErrorCode::E0103)
                .message("backreferences are only allowed in the target")
                .fragment(text)
                .build());
        }
        let token = if let Some(alternatives) = factory.variable(&symbol) {
            SourceToken::Class {
                name: SmolStr::new(&symbol),
                alternatives: alternatives.to_vec(),
            }
        } else if is_bracket(&symbol) {
            SourceToken::Features(FeatureSpec::parse(factory.model(), &symbol)?)
        } else {
            SourceToken::Literal(factory.segment_of(&parts))
        };
        tokens.push(token);
    }
    Ok(tokens)
}

fn parse_target(
    text: &str,
    source_len: usize,
    slots: &[CaptureSlot],
    factory: &SequenceFactory,
) -> ParseResult<Vec<TargetToken>> {
    let mut tokens = Vec::new();
    let mut seen: Vec<SmolStr> = Vec::new();

    for (position, parts) in factory.parts(text).iter().enumerate() {
        let symbol = parts.text();
        let token = if symbol.starts_with('$') {
            parse_backreference(&symbol, slots, factory)?
        } else if factory.has_variable(&symbol) {
            let name = SmolStr::new(&symbol);
            let occurrence = seen.iter().filter(|n| **n == name).count();
            seen.push(name.clone());
            let index = slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.name.as_ref() == Some(&name))
                .nth(occurrence)
                .map(|(i, _)| i)
                .ok_or_else(|| {
                    ParseError::builder(ErrorCode::E0404)
                        .message(format!("variable '{name}' in the target has no counterpart in the source"))
                        .fragment(text)
                        .build()
                })?;
            TargetToken::Capture {
                index,
                alternatives: slots[index].alternatives.clone(),
            }
        } else if symbol == DELETION {
            TargetToken::Deletion
        } else if is_bracket(&symbol) {
            let spec = FeatureSpec::parse(factory.model(), &symbol)?;
            if spec.is_relational() {
                return Err(ParseError::new(ErrorCode::E0305, symbol)
                    .with_hint("a target spec must assign values with ':' '=' '+' or '-'"));
            }
            if position >= source_len {
                return Err(ParseError::builder(ErrorCode::E0508)
                    .message(format!("'{symbol}' at position {} has no source segment to modify", position + 1))
                    .fragment(text)
                    .build());
            }
            TargetToken::Features { spec, position }
        } else {
            TargetToken::Literal(factory.segment_of(parts))
        };
        tokens.push(token);
    }
    Ok(tokens)
}

fn parse_backreference(symbol: &str, slots: &[CaptureSlot], factory: &SequenceFactory) -> ParseResult<TargetToken> {
    if backreference_len(symbol) != Some(symbol.len()) {
        return Err(ParseError::new(ErrorCode::E0103, symbol));
    }
    let body = &symbol[1..];
    let digits = body.find(|c: char| c.is_ascii_digit()).unwrap_or(body.len());
    let (label, number) = body.split_at(digits);
    let number: usize = number
        .parse()
        .map_err(|_| ParseError::new(ErrorCode::E0103, symbol))?;

    if number == 0 || number > slots.len() {
        return Err(ParseError::builder(ErrorCode::E0402)
            .message(format!("${number} refers to capture {number} but the source has {}", slots.len()))
            .fragment(symbol)
            .build());
    }
    let index = number - 1;
    let slot = &slots[index];

    if label.is_empty() {
        return Ok(TargetToken::Capture {
            index,
            alternatives: slot.alternatives.clone(),
        });
    }

    let Some(class) = factory.variable(label) else {
        return Err(ParseError::builder(ErrorCode::E0403)
            .message(format!("'{label}' is not a variable"))
            .fragment(symbol)
            .build());
    };
    match &slot.alternatives {
        None => Err(ParseError::builder(ErrorCode::E0403)
            .message(format!("capture {number} is a feature match and cannot be redirected to '{label}'"))
            .fragment(symbol)
            .build()),
        Some(source) if class.len() < source.len() => Err(ParseError::builder(ErrorCode::E0403)
            .message(format!(
                "'{label}' has {} alternatives, fewer than the {} of capture {number}",
                class.len(),
                source.len()
            ))
            .fragment(symbol)
            .build()),
        Some(_) => Ok(TargetToken::Capture {
            index,
            alternatives: Some(class.to_vec()),
        }),
    }
}
