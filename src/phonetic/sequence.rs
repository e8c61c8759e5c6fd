//! Ordered segment lists.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::sync::Arc;

use super::model::FeatureModel;
use super::segment::Segment;

/// An ordered list of segments sharing one feature model
#[derive(Debug, Clone)]
pub struct Sequence {
    segments: Vec<Segment>,
    model: Arc<FeatureModel>,
}

impl Sequence {
    pub fn new(model: Arc<FeatureModel>) -> Self {
        Self {
            segments: Vec::new(),
            model,
        }
    }

    pub fn from_segments(model: Arc<FeatureModel>, segments: Vec<Segment>) -> Self {
        for segment in &segments {
            check_model(&model, segment);
        }
        Self { segments, model }
    }

    pub fn model(&self) -> &Arc<FeatureModel> {
        &self.model
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn push(&mut self, segment: Segment) {
        check_model(&self.model, &segment);
        self.segments.push(segment);
    }

    pub fn extend(&mut self, other: &Sequence) {
        self.check_sequence(other);
        self.segments.extend(other.segments.iter().cloned());
    }

    /// Insert all of `other` before `index`
    pub fn insert(&mut self, other: &Sequence, index: usize) {
        self.check_sequence(other);
        self.segments
            .splice(index..index, other.segments.iter().cloned());
    }

    /// Remove `start..end` and return the removed segments
    pub fn remove(&mut self, start: usize, end: usize) -> Sequence {
        let removed = self.segments.drain(start..end).collect();
        Sequence {
            segments: removed,
            model: Arc::clone(&self.model),
        }
    }

    pub fn subsequence(&self, start: usize, end: usize) -> Sequence {
        Sequence {
            segments: self.segments[start..end].to_vec(),
            model: Arc::clone(&self.model),
        }
    }

    pub fn reversed(&self) -> Sequence {
        Sequence {
            segments: self.segments.iter().rev().cloned().collect(),
            model: Arc::clone(&self.model),
        }
    }

    /// Same length and every segment matches the corresponding pattern segment
    pub fn matches(&self, pattern: &Sequence) -> bool {
        self.len() == pattern.len() && self.matches_at(0, pattern)
    }

    pub fn starts_with(&self, prefix: &Sequence) -> bool {
        self.matches_at(0, prefix)
    }

    /// True if `pattern` matches the segments starting at `index`
    pub fn matches_at(&self, index: usize, pattern: &Sequence) -> bool {
        self.check_sequence(pattern);
        slice_matches_at(&self.segments, index, &pattern.segments)
    }

    pub fn index_of_segment(&self, segment: &Segment) -> Option<usize> {
        self.segments.iter().position(|s| s.matches(segment))
    }

    /// Leftmost position where `pattern` matches, if any
    pub fn index_of(&self, pattern: &Sequence) -> Option<usize> {
        self.index_of_from(pattern, 0)
    }

    pub fn index_of_from(&self, pattern: &Sequence, start: usize) -> Option<usize> {
        if pattern.is_empty() {
            return (start <= self.len()).then_some(start);
        }
        (start..self.len()).find(|&i| self.matches_at(i, pattern))
    }

    /// Every position where `pattern` matches, overlapping occurrences included
    pub fn indices_of(&self, pattern: &Sequence) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }
        (0..self.len())
            .filter(|&i| self.matches_at(i, pattern))
            .collect()
    }

    pub fn contains(&self, pattern: &Sequence) -> bool {
        self.index_of(pattern).is_some()
    }

    /// Replace every non-overlapping occurrence of `pattern`, scanning left to right
    pub fn replace_all(&mut self, pattern: &Sequence, replacement: &Sequence) {
        if pattern.is_empty() {
            return;
        }
        let mut index = 0;
        while let Some(found) = self.index_of_from(pattern, index) {
            self.remove(found, found + pattern.len());
            self.insert(replacement, found);
            index = found + replacement.len();
        }
    }

    fn check_sequence(&self, other: &Sequence) {
        assert!(
            FeatureModel::same(&self.model, &other.model),
            "sequences '{self}' and '{other}' come from different feature models"
        );
    }
}

/// Pattern-prefix test on raw segment slices
pub(crate) fn slice_matches_at(segments: &[Segment], index: usize, pattern: &[Segment]) -> bool {
    segments
        .get(index..index + pattern.len())
        .is_some_and(|window| window.iter().zip(pattern).all(|(s, p)| s.matches(p)))
}

fn check_model(model: &Arc<FeatureModel>, segment: &Segment) {
    assert!(
        FeatureModel::same(model, segment.model()),
        "segment '{segment}' comes from a different feature model"
    );
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.check_sequence(other);
        self.segments == other.segments
    }
}

impl Eq for Sequence {}

impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl Index<usize> for Sequence {
    type Output = Segment;

    fn index(&self, index: usize) -> &Segment {
        &self.segments[index]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.segments.iter().try_for_each(|s| f.write_str(s.symbol()))
    }
}
