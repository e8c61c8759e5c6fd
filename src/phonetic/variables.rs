//! Named classes of alternatives (`C = p t k`).

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::errors::{ErrorCode, ParseError, ParseResult};

/// Ordered variable definitions.
///
/// Alternatives that name an already defined variable are expanded in place
/// when the new variable is added, so later redefinitions of the inner class
/// do not affect it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    variables: IndexMap<SmolStr, Vec<SmolStr>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration of the form `NAME = alt1 alt2 ...`
    pub fn add(&mut self, declaration: &str) -> ParseResult<()> {
        let (name, body) = declaration
            .split_once('=')
            .ok_or_else(|| ParseError::new(ErrorCode::E0405, declaration).with_hint("expected 'NAME = a b c'"))?;
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(ParseError::builder(ErrorCode::E0405)
                .message(format!("'{name}' is not a valid variable name"))
                .fragment(declaration)
                .build());
        }
        let alternatives: Vec<&str> = body.split_whitespace().collect();
        if alternatives.is_empty() {
            return Err(ParseError::builder(ErrorCode::E0405)
                .message(format!("variable '{name}' has no alternatives"))
                .fragment(declaration)
                .build());
        }
        self.insert(name, alternatives);
        Ok(())
    }

    /// Define or redefine a variable, expanding references to existing classes
    pub fn insert<I, S>(&mut self, name: &str, alternatives: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut expanded = Vec::new();
        for alternative in alternatives {
            let alternative = alternative.as_ref();
            match self.variables.get(alternative) {
                Some(inner) => expanded.extend(inner.iter().cloned()),
                None => expanded.push(SmolStr::new(alternative)),
            }
        }
        self.variables.insert(SmolStr::new(name), expanded);
    }

    pub fn get(&self, name: &str) -> Option<&[SmolStr]> {
        self.variables.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(SmolStr::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SmolStr])> {
        self.variables
            .iter()
            .map(|(name, alts)| (name.as_str(), alts.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
