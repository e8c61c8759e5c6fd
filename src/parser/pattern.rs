//! Recursive-descent parser from pattern text to an [`Expression`] list.

use std::fmt;

use text_size::TextRange;

use super::expression::{Atom, Expression, Literal, Quantifier};
use super::lexer::{Token, TokenKind, tokenize};
use crate::errors::{ErrorCode, ParseError, ParseResult};
use crate::phonetic::{FeatureSpec, SequenceFactory};

/// A parsed pattern: the left or right side of a condition
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    text: String,
    expressions: Vec<Expression>,
}

impl Pattern {
    pub fn parse(text: &str, factory: &SequenceFactory) -> ParseResult<Self> {
        let text = factory.normalize(text);
        let tokens = tokenize(&text);
        let mut parser = Parser::new(&text, &tokens, factory);
        let expressions = parser.parse_pattern()?;
        Ok(Self { text, expressions })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expressions.iter().try_for_each(|e| write!(f, "{e}"))
    }
}

/// Where a sequence of expressions ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// End of input
    Top,
    /// `)`
    Group,
    /// whitespace or `}`
    Alternative,
}

/// The parser state
struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token<'a>],
    pos: usize,
    factory: &'a SequenceFactory,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: &'a [Token<'a>], factory: &'a SequenceFactory) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            factory,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.eat(TokenKind::Whitespace) {}
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&self, code: ErrorCode) -> ParseError {
        self.error_at(code, self.current())
    }

    fn error_at(&self, code: ErrorCode, token: Option<&Token<'a>>) -> ParseError {
        let mut builder = ParseError::builder(code).fragment(self.source);
        if let Some(token) = token {
            builder = builder.range(TextRange::at(token.offset, text_size::TextSize::of(token.text)));
        }
        builder.build()
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// Pattern = Sequence EOF
    fn parse_pattern(&mut self) -> ParseResult<Vec<Expression>> {
        let expressions = self.parse_sequence(Context::Top)?;
        if self.current().is_some() {
            return Err(self.error(ErrorCode::E0203));
        }
        Ok(expressions)
    }

    /// Sequence = (Quantified | Whitespace)*
    fn parse_sequence(&mut self, context: Context) -> ParseResult<Vec<Expression>> {
        let mut out: Vec<Expression> = Vec::new();
        while let Some(kind) = self.current_kind() {
            match kind {
                TokenKind::Whitespace if context == Context::Alternative => break,
                TokenKind::Whitespace => self.bump(),
                TokenKind::RParen if context == Context::Group => break,
                TokenKind::RBrace if context == Context::Alternative => break,
                TokenKind::RParen | TokenKind::RBrace => return Err(self.error(ErrorCode::E0203)),
                TokenKind::Question | TokenKind::Star | TokenKind::Plus => {
                    let quantifier = match kind {
                        TokenKind::Question => Quantifier::Optional,
                        TokenKind::Star => Quantifier::Star,
                        _ => Quantifier::Plus,
                    };
                    match out.last_mut() {
                        Some(last) if last.quantifier == Quantifier::One => last.quantifier = quantifier,
                        _ => return Err(self.error(ErrorCode::E0204)),
                    }
                    self.bump();
                }
                TokenKind::Bang => {
                    let bang = self.pos;
                    self.bump();
                    let mut atoms = self.parse_atom()?;
                    match atoms.first_mut() {
                        Some(first) => first.negated = true,
                        None => return Err(self.error_at(ErrorCode::E0205, self.tokens.get(bang))),
                    }
                    out.extend(atoms);
                }
                _ => out.extend(self.parse_atom()?),
            }
        }
        Ok(out)
    }

    /// Atom = Group | Set | '#' | Bracket | Text
    ///
    /// A text run can yield several expressions, one per segment.
    fn parse_atom(&mut self) -> ParseResult<Vec<Expression>> {
        let Some(token) = self.current().cloned() else {
            return Ok(Vec::new());
        };
        match token.kind {
            TokenKind::LParen => {
                self.bump();
                let children = self.parse_sequence(Context::Group)?;
                if !self.eat(TokenKind::RParen) {
                    return Err(self.error_at(ErrorCode::E0201, Some(&token)));
                }
                if children.is_empty() {
                    return Err(self.error_at(ErrorCode::E0206, Some(&token)));
                }
                Ok(vec![Expression::new(Atom::Group(children))])
            }
            TokenKind::LBrace => {
                self.bump();
                let mut alternatives = Vec::new();
                loop {
                    self.skip_whitespace();
                    match self.current_kind() {
                        Some(TokenKind::RBrace) => {
                            self.bump();
                            break;
                        }
                        None => return Err(self.error_at(ErrorCode::E0202, Some(&token))),
                        Some(_) => {
                            let alternative = self.parse_sequence(Context::Alternative)?;
                            if alternative.is_empty() {
                                return Err(self.error(ErrorCode::E0203));
                            }
                            alternatives.push(alternative);
                        }
                    }
                }
                if alternatives.is_empty() {
                    return Err(self.error_at(ErrorCode::E0206, Some(&token)));
                }
                Ok(vec![Expression::new(Atom::Set(alternatives))])
            }
            TokenKind::Boundary => {
                self.bump();
                Ok(vec![Expression::new(Atom::Boundary)])
            }
            TokenKind::Bracket => {
                self.bump();
                Ok(vec![self.bracket(&token)?])
            }
            TokenKind::Text => {
                self.bump();
                Ok(self.text(token.text))
            }
            TokenKind::Error => {
                let code = if token.text.starts_with('[') {
                    ErrorCode::E0102
                } else {
                    ErrorCode::E0101
                };
                Err(self.error_at(code, Some(&token)))
            }
            _ => Ok(Vec::new()),
        }
    }

    fn bracket(&self, token: &Token<'a>) -> ParseResult<Expression> {
        if let Some(alternatives) = self.factory.variable(token.text) {
            return Ok(Expression::new(Atom::Variable {
                name: token.text.into(),
                alternatives: alternatives.to_vec(),
            }));
        }
        let spec = FeatureSpec::parse(self.factory.model(), token.text)
            .map_err(|e| e.within(self.source))?;
        Ok(Expression::new(Atom::Literal(Literal::Features(spec))))
    }

    fn text(&self, text: &str) -> Vec<Expression> {
        self.factory
            .parts(text)
            .iter()
            .map(|parts| {
                let symbol = parts.text();
                let atom = match self.factory.variable(&symbol) {
                    Some(alternatives) => Atom::Variable {
                        name: symbol.into(),
                        alternatives: alternatives.to_vec(),
                    },
                    None => Atom::Literal(Literal::Segment(self.factory.segment_of(parts))),
                };
                Expression::new(atom)
            })
            .collect()
    }
}
