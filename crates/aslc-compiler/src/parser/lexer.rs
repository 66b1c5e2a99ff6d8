//! Lexer for the tree notation.
//!
//! Produces span-based tokens without storing text; text is sliced from source
//! only when needed. Consecutive unrecognized characters are coalesced into a
//! single `Garbage` token.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
pub enum TokenKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    /// Marks the following operand as an assignment target: `=Local0`.
    #[token("=")]
    Equals,

    #[regex(r"0[xX][0-9a-fA-F]+|[0-9]+")]
    Integer,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    String,

    /// Operator keywords, registers and name paths (`\_SB.PCI0`, `^FOO`).
    #[regex(r"[A-Za-z_\\^][A-Za-z0-9_.\\^]*")]
    Ident,

    /// Unrecognized input, coalesced.
    Garbage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    // Whitespace is skipped, so garbage ends where its last bad character does.
    let mut error: Option<Range<usize>> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(range) = error.take() {
                    tokens.push(Token::new(TokenKind::Garbage, range_to_text_range(range)));
                }
                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(())) => {
                let span = lexer.span();
                error = Some(match error {
                    Some(range) if range.end == span.start => range.start..span.end,
                    Some(range) => {
                        tokens.push(Token::new(TokenKind::Garbage, range_to_text_range(range)));
                        span
                    }
                    None => span,
                });
            }
            None => {
                if let Some(range) = error.take() {
                    tokens.push(Token::new(TokenKind::Garbage, range_to_text_range(range)));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// Decode a string literal token, quotes included, into its value.
pub fn unescape_string(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Parse a decimal or `0x` hexadecimal integer literal.
pub fn parse_integer(text: &str) -> Option<u64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}
