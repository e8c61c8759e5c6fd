//! A single phonetic unit: symbol text plus a feature vector.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smol_str::SmolStr;

use super::model::FeatureModel;
use crate::base::constants::{is_undefined, values_equal};

/// One segment of a [`Sequence`](super::Sequence).
///
/// Segments belong to the model that produced them. Comparing segments from
/// two different models is a programming error and panics.
#[derive(Debug, Clone)]
pub struct Segment {
    symbol: SmolStr,
    features: Vec<f64>,
    model: Arc<FeatureModel>,
}

impl Segment {
    pub fn new(symbol: impl Into<SmolStr>, features: Vec<f64>, model: Arc<FeatureModel>) -> Self {
        Self {
            symbol: symbol.into(),
            features,
            model,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn model(&self) -> &Arc<FeatureModel> {
        &self.model
    }

    /// Asymmetric match: `other` is the pattern.
    ///
    /// Every feature must be equal unless the pattern leaves it undefined.
    /// Under a model with no features the symbols must be equal.
    pub fn matches(&self, other: &Segment) -> bool {
        self.check_model(other);
        if self.model.feature_count() == 0 {
            return self.symbol == other.symbol;
        }
        self.features
            .iter()
            .zip(&other.features)
            .all(|(&value, &pattern)| values_equal(value, pattern) || is_undefined(pattern))
    }

    fn check_model(&self, other: &Segment) {
        assert!(
            FeatureModel::same(&self.model, &other.model),
            "segments '{}' and '{}' come from different feature models",
            self.symbol,
            other.symbol
        );
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.check_model(other);
        self.symbol == other.symbol
            && self.features.len() == other.features.len()
            && self
                .features
                .iter()
                .zip(&other.features)
                .all(|(&a, &b)| values_equal(a, b))
    }
}

// Wildcards compare equal to each other, so equality stays reflexive.
impl Eq for Segment {}

impl Hash for Segment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
        for &value in &self.features {
            // one bit pattern per equality class: all wildcards, and both zeros
            let canonical = if is_undefined(value) {
                f64::NAN
            } else if value == 0.0 {
                0.0
            } else {
                value
            };
            canonical.to_bits().hash(state);
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}
