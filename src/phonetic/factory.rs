//! Building sequences from text with a fixed model, variable set and formatter.

use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::model::FeatureModel;
use super::segment::Segment;
use super::segmenter::{Segmenter, SymbolParts};
use super::sequence::Sequence;
use super::variables::VariableStore;
use crate::base::FormatterMode;

/// Turns text into [`Sequence`]s.
///
/// Every rule and condition is compiled through a factory, which fixes the
/// feature model, the variable classes and the normalisation in effect.
#[derive(Debug, Clone)]
pub struct SequenceFactory {
    model: Arc<FeatureModel>,
    variables: VariableStore,
    classes: IndexMap<SmolStr, Vec<Sequence>>,
    reserved: Vec<SmolStr>,
    mode: FormatterMode,
    segmenter: Segmenter,
}

impl SequenceFactory {
    pub fn new(model: Arc<FeatureModel>, variables: VariableStore, mode: FormatterMode) -> Self {
        Self::with_reserved(model, variables, Vec::<&str>::new(), mode)
    }

    /// A factory over the empty model with no variables
    pub fn empty() -> Self {
        Self::new(FeatureModel::empty(), VariableStore::new(), FormatterMode::Intelligent)
    }

    /// Like [`new`](Self::new), with extra strings the segmenter must keep whole
    pub fn with_reserved<I, S>(
        model: Arc<FeatureModel>,
        variables: VariableStore,
        reserved: I,
        mode: FormatterMode,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reserved: Vec<SmolStr> = reserved
            .into_iter()
            .map(|r| SmolStr::new(mode.normalize(r.as_ref())))
            .collect();

        let keys: Vec<SmolStr> = model
            .symbols()
            .map(|(symbol, _)| SmolStr::new(symbol))
            .chain(variables.names().map(|n| SmolStr::new(mode.normalize(n))))
            .chain(reserved.iter().cloned())
            .collect();
        let segmenter = Segmenter::new(keys, mode.segmentation());

        let mut factory = Self {
            model,
            variables: VariableStore::new(),
            classes: IndexMap::new(),
            reserved,
            mode,
            segmenter,
        };
        for (name, alternatives) in variables.iter() {
            let sequences = alternatives.iter().map(|alt| factory.sequence(alt)).collect();
            factory.classes.insert(SmolStr::new(mode.normalize(name)), sequences);
        }
        factory.variables = variables;
        factory
    }

    pub fn model(&self) -> &Arc<FeatureModel> {
        &self.model
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn reserved(&self) -> &[SmolStr] {
        &self.reserved
    }

    pub fn mode(&self) -> FormatterMode {
        self.mode
    }

    pub fn normalize(&self, text: &str) -> String {
        self.mode.normalize(text)
    }

    /// Alternatives of a variable class, as sequences
    pub fn variable(&self, name: &str) -> Option<&[Sequence]> {
        self.classes.get(name).map(Vec::as_slice)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Normalise and split `text` into head/tail parts
    pub fn parts(&self, text: &str) -> Vec<SymbolParts> {
        self.segmenter.segment(&self.normalize(text))
    }

    /// Normalise and split `text` into token strings
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.segmenter.tokens(&self.normalize(text))
    }

    pub fn segment_of(&self, parts: &SymbolParts) -> Segment {
        FeatureModel::segment(&self.model, &parts.head, &parts.tail)
    }

    /// The first segment of `text`, if it has one
    pub fn segment(&self, text: &str) -> Option<Segment> {
        self.parts(text).first().map(|p| self.segment_of(p))
    }

    pub fn sequence(&self, text: &str) -> Sequence {
        let segments = self.parts(text).iter().map(|p| self.segment_of(p)).collect();
        Sequence::from_segments(Arc::clone(&self.model), segments)
    }
}

impl Default for SequenceFactory {
    fn default() -> Self {
        Self::empty()
    }
}
