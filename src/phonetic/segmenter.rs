//! Splitting normalised text into symbol tokens.
//!
//! A token is a head (a known key or a single character) followed by any
//! attached marks. Backreferences (`$1`, `$G2`) and `[...]` bracket blocks are
//! always single tokens.

use smol_str::SmolStr;

use crate::base::SegmentationMode;

/// One token: the head symbol and the diacritics attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolParts {
    pub head: String,
    pub tail: Vec<String>,
}

impl SymbolParts {
    fn head(head: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            tail: Vec::new(),
        }
    }

    /// Head and tail joined back together
    pub fn text(&self) -> String {
        let mut text = self.head.clone();
        self.tail.iter().for_each(|t| text.push_str(t));
        text
    }
}

/// Longest-match tokenizer over a fixed set of keys
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    keys: Vec<SmolStr>,
    mode: SegmentationMode,
}

impl Segmenter {
    pub fn new<I, S>(keys: I, mode: SegmentationMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys: Vec<SmolStr> = keys
            .into_iter()
            .filter(|k| !k.as_ref().is_empty())
            .map(|k| SmolStr::new(k.as_ref()))
            .collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keys.dedup();
        Self { keys, mode }
    }

    pub fn mode(&self) -> SegmentationMode {
        self.mode
    }

    pub fn segment(&self, text: &str) -> Vec<SymbolParts> {
        let mut out = Vec::new();
        let mut current: Option<SymbolParts> = None;
        let mut rest = text;

        while let Some(ch) = rest.chars().next() {
            if let Some(len) = backreference_len(rest) {
                out.extend(current.take());
                out.push(SymbolParts::head(&rest[..len]));
                rest = &rest[len..];
                continue;
            }
            if let Some(key) = self.longest_key(rest) {
                out.extend(current.take());
                current = Some(SymbolParts::head(key));
                rest = &rest[key.len()..];
                continue;
            }
            if ch == '[' {
                if let Some(close) = rest.find(']') {
                    out.extend(current.take());
                    out.push(SymbolParts::head(&rest[..=close]));
                    rest = &rest[close + 1..];
                    continue;
                }
            }

            let width = ch.len_utf8();
            if self.mode == SegmentationMode::Default {
                if let Some(parts) = current.as_mut().filter(|_| is_attachable(ch)) {
                    if is_binder(ch) {
                        // a tie bar pulls the following character into the head
                        let next = rest[width..].chars().next().map_or(0, char::len_utf8);
                        parts.head.push_str(&rest[..width + next]);
                        rest = &rest[width + next..];
                    } else {
                        parts.tail.push(ch.to_string());
                        rest = &rest[width..];
                    }
                    continue;
                }
            }

            out.extend(current.take());
            current = Some(SymbolParts::head(&rest[..width]));
            rest = &rest[width..];
        }
        out.extend(current);
        out
    }

    /// Segment and join each token back into a string
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.segment(text).iter().map(SymbolParts::text).collect()
    }

    fn longest_key<'k>(&'k self, text: &str) -> Option<&'k str> {
        self.keys
            .iter()
            .find(|key| text.starts_with(key.as_str()))
            .map(SmolStr::as_str)
    }
}

/// Length in bytes of a `$label digits` token at the start of `text`
pub(crate) fn backreference_len(text: &str) -> Option<usize> {
    let body = text.strip_prefix('$')?;
    let label = body
        .find(|c: char| c.is_ascii_digit() || c == '$' || c.is_whitespace())
        .unwrap_or(body.len());
    let digits = body[label..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len() - label);
    (digits > 0).then_some(1 + label + digits)
}

/// Double-width binding diacritics (tie bars)
pub fn is_binder(ch: char) -> bool {
    ('\u{035C}'..='\u{0362}').contains(&ch)
}

/// Characters that never start a segment in diacritic-aware mode
pub fn is_attachable(ch: char) -> bool {
    matches!(ch,
        '\u{0300}'..='\u{036F}'     // combining diacritical marks
        | '\u{02B0}'..='\u{02FF}'   // spacing modifier letters
        | '\u{1AB0}'..='\u{1AFF}'   // combining marks extended
        | '\u{1D2C}'..='\u{1D6A}'   // phonetic modifier letters
        | '\u{1D9B}'..='\u{1DBF}'
        | '\u{1DC0}'..='\u{1DFF}'   // combining marks supplement
        | '\u{2070}'..='\u{209F}'   // super- and subscripts
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE20}'..='\u{FE2F}'   // half marks
        | '\u{00B2}' | '\u{00B3}' | '\u{00B9}'
    )
}
