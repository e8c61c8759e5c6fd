//! Phonetic data model
//!
//! Feature models, segments and sequences, plus the tooling that turns text
//! into sequences: the segmenter, variable classes and the sequence factory.

mod factory;
mod features;
mod loader;
mod model;
mod segment;
mod segmenter;
mod sequence;
mod variables;

pub use factory::SequenceFactory;
pub use features::{FeatureConstraint, FeatureDefinition, FeatureSpec, FeatureType, Relation};
pub use model::{FeatureModel, FeatureModelBuilder, difference, difference_sum};
pub use segment::Segment;
pub use segmenter::{Segmenter, SymbolParts, is_attachable, is_binder};
pub use sequence::Sequence;
pub use variables::VariableStore;

pub(crate) use segmenter::backreference_len;
pub(crate) use sequence::slice_matches_at;
