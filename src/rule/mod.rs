//! Sound-change rules
//!
//! [`Condition`]s describe environments, [`Rule`]s rewrite sequences where
//! their conditions hold, [`CompoundRule`]s interleave several rules in one
//! pass, and a [`Lexicon`] applies rules to whole word lists.

mod compound;
mod condition;
mod lexicon;
#[allow(clippy::module_inception)]
mod rule;
mod syntax;
mod transform;

pub use compound::CompoundRule;
pub use condition::Condition;
pub use lexicon::Lexicon;
pub use rule::Rule;

use crate::phonetic::Sequence;

/// Anything that rewrites sequences
pub trait SoundChange: Send + Sync {
    /// Rewrite a copy of `input`
    fn apply(&self, input: &Sequence) -> Sequence;

    /// Try to rewrite `output` at `index`, returning where scanning should continue
    fn apply_at(&self, output: &mut Sequence, index: usize) -> Option<usize>;
}
