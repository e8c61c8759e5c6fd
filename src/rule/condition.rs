//! Environments of the form `pre_post`.

use std::fmt;

use tracing::debug;

use super::syntax::cleanup;
use crate::automaton::{ParseDirection, StateMachine};
use crate::base::constants::TARGET_MARKER;
use crate::errors::{ErrorCode, ParseError, ParseResult};
use crate::phonetic::{Sequence, SequenceFactory};

/// A left and right context around a target span.
///
/// The left side is compiled backward and run over the reversed word, so both
/// sides are matched by reading away from the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    text: String,
    pre: StateMachine,
    post: StateMachine,
}

impl Condition {
    pub fn new(text: &str, factory: &SequenceFactory) -> ParseResult<Self> {
        let cleaned = cleanup(text);
        let mut sides = cleaned.split(TARGET_MARKER);
        let (pre, post) = match (sides.next(), sides.next(), sides.next()) {
            (Some(pre), Some(post), None) => (pre, post),
            (_, None, _) => {
                return Err(ParseError::new(ErrorCode::E0504, text)
                    .with_hint("mark the target position with '_', as in 'a_b'"));
            }
            _ => return Err(ParseError::new(ErrorCode::E0505, text)),
        };

        let pre = StateMachine::parse("pre", pre, factory, ParseDirection::Backward)
            .map_err(|e| e.within(text))?;
        let post = StateMachine::parse("post", post, factory, ParseDirection::Forward)
            .map_err(|e| e.within(text))?;
        debug!(condition = cleaned.as_str(), "compiled condition");

        Ok(Self {
            text: cleaned,
            pre,
            post,
        })
    }

    /// The condition that always holds
    pub fn unconditional() -> Self {
        Self {
            text: TARGET_MARKER.to_string(),
            pre: StateMachine::empty("pre", ParseDirection::Backward),
            post: StateMachine::empty("post", ParseDirection::Forward),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pre(&self) -> &StateMachine {
        &self.pre
    }

    pub fn post(&self) -> &StateMachine {
        &self.post
    }

    /// Check the context around the span `start..end` of `word`.
    ///
    /// The left side is read from `start` leftward, the right side from `end`
    /// rightward.
    pub fn is_match(&self, word: &Sequence, start: usize, end: usize) -> bool {
        if end > word.len() || start > end {
            return false;
        }
        let post_ok = self.post.is_trivial() || self.post.is_match(word, end);
        if !post_ok {
            return false;
        }
        if self.pre.is_trivial() {
            return true;
        }
        let reversed = word.reversed();
        self.pre.is_match(&reversed, word.len() - start)
    }

    /// Check the context around the single segment at `index`
    pub fn is_match_at(&self, word: &Sequence, index: usize) -> bool {
        self.is_match(word, index, index + 1)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
