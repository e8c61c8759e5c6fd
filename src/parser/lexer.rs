//! Logos-based lexer for patterns
//!
//! Splits pattern text into structural punctuation, bracket specs and runs of
//! symbol text. Symbol runs are segmented later, against the factory's keys.

use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };
        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Pattern token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Bang,
    Question,
    Star,
    Plus,
    Boundary,
    Bracket,
    Text,
    /// Anything the lexer could not match, such as a stray `[` or `]`
    Error,
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    // =========================================================================
    // DELIMITERS
    // =========================================================================
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    #[token("!")]
    Bang,

    #[token("?")]
    Question,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("#")]
    Boundary,

    // =========================================================================
    // CONTENT
    // =========================================================================
    #[regex(r"\[[^\[\]]*\]")]
    Bracket,

    #[regex(r"[^ \t\r\n(){}\[\]!?*+#]+")]
    Text,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => Self::Whitespace,
            LogosToken::LParen => Self::LParen,
            LogosToken::RParen => Self::RParen,
            LogosToken::LBrace => Self::LBrace,
            LogosToken::RBrace => Self::RBrace,
            LogosToken::Bang => Self::Bang,
            LogosToken::Question => Self::Question,
            LogosToken::Star => Self::Star,
            LogosToken::Plus => Self::Plus,
            LogosToken::Boundary => Self::Boundary,
            LogosToken::Bracket => Self::Bracket,
            LogosToken::Text => Self::Text,
        }
    }
}

impl TokenKind {
    pub fn is_quantifier(self) -> bool {
        matches!(self, Self::Question | Self::Star | Self::Plus)
    }
}
