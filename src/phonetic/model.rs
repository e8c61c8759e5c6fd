//! Feature models: the table of features, symbols and diacritics a sound
//! inventory is described with.

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::warn;

use super::features::{FeatureDefinition, FeatureSpec, FeatureType};
use super::segment::Segment;
use crate::base::constants::{UNDEFINED_VALUE, is_masking, is_undefined, values_equal};
use crate::errors::{ModelError, ParseResult};

static EMPTY: Lazy<Arc<FeatureModel>> = Lazy::new(|| Arc::new(FeatureModel::default()));

/// An immutable feature model.
///
/// Symbols map to full feature vectors. Diacritics map to overlay vectors whose
/// masking cells leave the base value untouched. The empty model has no features
/// at all and segments built from it are compared by symbol.
#[derive(Debug, Clone, Default)]
pub struct FeatureModel {
    features: Vec<FeatureDefinition>,
    indices: FxHashMap<SmolStr, usize>,
    symbols: IndexMap<SmolStr, Vec<f64>>,
    diacritics: IndexMap<SmolStr, Vec<f64>>,
}

impl FeatureModel {
    /// The shared model with zero features
    pub fn empty() -> Arc<FeatureModel> {
        Arc::clone(&EMPTY)
    }

    pub fn builder() -> FeatureModelBuilder {
        FeatureModelBuilder::default()
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn features(&self) -> &[FeatureDefinition] {
        &self.features
    }

    /// Look up a feature by name or alias
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn symbols(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.symbols.iter().map(|(s, v)| (s.as_str(), v.as_slice()))
    }

    pub fn diacritics(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.diacritics.iter().map(|(s, v)| (s.as_str(), v.as_slice()))
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    pub fn contains_diacritic(&self, diacritic: &str) -> bool {
        self.diacritics.contains_key(diacritic)
    }

    /// Feature vector of a registered symbol
    pub fn value(&self, symbol: &str) -> Option<&[f64]> {
        self.symbols.get(symbol).map(Vec::as_slice)
    }

    /// An all-wildcard vector of the model's width
    pub fn blank(&self) -> Vec<f64> {
        vec![UNDEFINED_VALUE; self.features.len()]
    }

    /// Build a segment from a head symbol and its attached diacritics.
    ///
    /// An unknown head yields an all-wildcard vector. Diacritics the model does
    /// not know are kept in the symbol text but contribute no features.
    pub fn segment<S: AsRef<str>>(model: &Arc<FeatureModel>, head: &str, modifiers: &[S]) -> Segment {
        let mut symbol = String::from(head);
        let mut features = match model.symbols.get(head) {
            Some(values) => values.clone(),
            None => {
                if model.feature_count() > 0 {
                    warn!(symbol = head, "unknown symbol, using wildcard features");
                }
                model.blank()
            }
        };

        for modifier in modifiers {
            let modifier = modifier.as_ref();
            symbol.push_str(modifier);
            match model.diacritics.get(modifier) {
                Some(overlay) => apply_overlay(&mut features, overlay),
                None if model.feature_count() > 0 => {
                    warn!(diacritic = modifier, "unknown diacritic, ignoring features")
                }
                None => {}
            }
        }

        Segment::new(symbol, features, Arc::clone(model))
    }

    /// A segment whose features come from a bracket spec
    pub fn underspecified(model: &Arc<FeatureModel>, spec: &FeatureSpec) -> Segment {
        Segment::new(
            spec.text(),
            spec.to_features(model.feature_count()),
            Arc::clone(model),
        )
    }

    /// Parse a bracket spec against this model
    pub fn parse_spec(&self, text: &str) -> ParseResult<FeatureSpec> {
        FeatureSpec::parse(self, text)
    }

    /// The symbol (base plus diacritics) whose features are closest to `features`
    pub fn best_symbol(&self, features: &[f64]) -> String {
        match self.best_parts(features) {
            Some((base, modifiers)) => {
                let mut out = base.to_string();
                modifiers.iter().for_each(|m| out.push_str(m));
                out
            }
            None => String::new(),
        }
    }

    /// Base symbol and diacritics, in pick order, approximating `features`.
    ///
    /// The base is the registered symbol with the smallest summed difference,
    /// earliest on ties. While the difference stays above zero, diacritics are
    /// added greedily whenever one strictly lowers it.
    pub fn best_parts(&self, features: &[f64]) -> Option<(SmolStr, Vec<SmolStr>)> {
        let mut best: Option<(&SmolStr, &Vec<f64>, f64)> = None;
        for (symbol, values) in &self.symbols {
            let sum = difference_sum(features, values);
            if best.is_none_or(|(_, _, min)| sum < min) {
                best = Some((symbol, values, sum));
            }
        }
        let (base, values, mut minimum) = best?;

        let mut current = values.clone();
        let mut modifiers = Vec::new();
        while minimum > 0.0 {
            let mut choice: Option<(&SmolStr, Vec<f64>, f64)> = None;
            for (diacritic, overlay) in &self.diacritics {
                let mut candidate = current.clone();
                apply_overlay(&mut candidate, overlay);
                if vectors_equal(&candidate, &current) {
                    continue;
                }
                let sum = difference_sum(features, &candidate);
                let bound = choice.as_ref().map_or(minimum, |(_, _, s)| *s);
                if sum < bound {
                    choice = Some((diacritic, candidate, sum));
                }
            }
            match choice {
                Some((diacritic, candidate, sum)) => {
                    modifiers.push(diacritic.clone());
                    current = candidate;
                    minimum = sum;
                }
                None => break,
            }
        }
        Some((base.clone(), modifiers))
    }

    /// Every registered symbol whose segment matches the given pattern segment
    pub fn matching_symbols(&self, pattern: &Segment) -> Vec<&str> {
        self.symbols
            .iter()
            .filter(|(_, values)| {
                values
                    .iter()
                    .zip(pattern.features())
                    .all(|(&v, &p)| values_equal(v, p) || is_undefined(p))
            })
            .map(|(symbol, _)| symbol.as_str())
            .collect()
    }

    /// Identity check used before comparing segments
    pub fn same(a: &Arc<FeatureModel>, b: &Arc<FeatureModel>) -> bool {
        Arc::ptr_eq(a, b) || **a == **b
    }
}

impl PartialEq for FeatureModel {
    fn eq(&self, other: &Self) -> bool {
        self.features == other.features
            && table_equal(&self.symbols, &other.symbols)
            && table_equal(&self.diacritics, &other.diacritics)
    }
}

/// Distance between one pair of feature values.
///
/// Equal values (two wildcards included) are 0. A wildcard on one side
/// contributes the other side's value.
pub fn difference(a: f64, b: f64) -> f64 {
    if values_equal(a, b) {
        0.0
    } else if is_undefined(a) {
        b
    } else if is_undefined(b) {
        a
    } else {
        (a - b).abs()
    }
}

/// Sum of absolute per-feature differences
pub fn difference_sum(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| difference(x, y).abs())
        .sum()
}

fn apply_overlay(features: &mut [f64], overlay: &[f64]) {
    for (slot, &value) in features.iter_mut().zip(overlay) {
        if !is_masking(value) {
            *slot = value;
        }
    }
}

fn vectors_equal(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| values_equal(x, y))
}

fn table_equal(a: &IndexMap<SmolStr, Vec<f64>>, b: &IndexMap<SmolStr, Vec<f64>>) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|((ka, va), (kb, vb))| ka == kb && vectors_equal(va, vb))
}

// ============================================================================
// Builder
// ============================================================================

/// Incremental construction of a [`FeatureModel`]
#[derive(Debug, Default)]
pub struct FeatureModelBuilder {
    model: FeatureModel,
}

impl FeatureModelBuilder {
    /// Panics once a symbol or diacritic has been added.
    pub fn feature(mut self, name: &str, alias: Option<&str>, kind: FeatureType) -> Self {
        assert!(
            !self.has_rows(),
            "feature '{name}' added after symbols or diacritics"
        );
        self.add_feature(name, alias, kind);
        self
    }

    /// Panics unless `values` has one entry per feature.
    pub fn symbol(mut self, symbol: &str, values: Vec<f64>) -> Self {
        if let Err(err) = self.add_symbol(symbol, values) {
            panic!("{err}");
        }
        self
    }

    /// Panics unless `values` has one entry per feature.
    pub fn diacritic(mut self, diacritic: &str, values: Vec<f64>) -> Self {
        if let Err(err) = self.add_diacritic(diacritic, values) {
            panic!("{err}");
        }
        self
    }

    pub(crate) fn add_feature(&mut self, name: &str, alias: Option<&str>, kind: FeatureType) {
        let index = self.model.features.len();
        self.model.indices.insert(SmolStr::new(name), index);
        if let Some(alias) = alias {
            self.model.indices.insert(SmolStr::new(alias), index);
        }
        self.model.features.push(FeatureDefinition {
            name: SmolStr::new(name),
            alias: alias.map(SmolStr::new),
            kind,
        });
    }

    pub(crate) fn add_symbol(&mut self, symbol: &str, values: Vec<f64>) -> Result<(), ModelError> {
        self.check_width(symbol, &values)?;
        if self.model.symbols.insert(SmolStr::new(symbol), values).is_some() {
            warn!(symbol, "symbol defined twice, keeping the later row");
        }
        Ok(())
    }

    pub(crate) fn add_diacritic(&mut self, diacritic: &str, values: Vec<f64>) -> Result<(), ModelError> {
        self.check_width(diacritic, &values)?;
        if self
            .model
            .diacritics
            .insert(SmolStr::new(diacritic), values)
            .is_some()
        {
            warn!(diacritic, "diacritic defined twice, keeping the later row");
        }
        Ok(())
    }

    /// True once any symbol or diacritic row is present
    pub(crate) fn has_rows(&self) -> bool {
        !self.model.symbols.is_empty() || !self.model.diacritics.is_empty()
    }

    fn check_width(&self, symbol: &str, values: &[f64]) -> Result<(), ModelError> {
        if values.len() == self.feature_count() {
            Ok(())
        } else {
            Err(ModelError::RowWidth {
                symbol: symbol.to_string(),
                found: values.len(),
                expected: self.feature_count(),
            })
        }
    }

    pub(crate) fn feature_count(&self) -> usize {
        self.model.features.len()
    }

    pub fn build(self) -> Arc<FeatureModel> {
        Arc::new(self.model)
    }
}
