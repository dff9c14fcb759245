//! Lexical analysis: turns the raw source string into a flat vector of [Token]s. The main
//! function here is [tokenize].
//!
//! Whitespace is skipped, parenthesis are single character tokens and numbers and names are the
//! longest run of ASCII digits or ASCII letters. Anything else stops the lexer right away.

use std::{fmt, ops::Range};

use miette::SourceSpan;
use thiserror::Error;

use crate::location::{self, Loc};

use self::tracker::Tracker;

mod tracker;

/// Kinds of tokens recognised by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    Number,
    Name,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LeftParen => write!(f, "left parenthesis"),
            TokenKind::RightParen => write!(f, "right parenthesis"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Name => write!(f, "name"),
        }
    }
}

/// A token is a slice of the source code with the kind that the lexer assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub loc: Range<Loc>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, loc: Range<Loc>) -> Self {
        Self { kind, text, loc }
    }

    pub fn span(&self) -> SourceSpan {
        location::span(&self.loc)
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at {}", self.kind, self.text, usize::from(self.loc.start))
    }
}

/// The source contains a character that starts no token.
#[derive(Error, miette::Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("unexpected character '{character}' at offset {offset}")]
#[diagnostic(code(tiny::lexer))]
pub struct LexError {
    pub character: char,
    pub offset: usize,

    #[label("this character starts no token")]
    pub span: SourceSpan,
}

pub type Result<T, E = LexError> = std::result::Result<T, E>;

/// Unicode white space plus the information separators U+001C..U+001F, which also separate
/// tokens.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Lexes the whole input into tokens, failing on the first character that matches no rule.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    let mut tracker = Tracker::new(source);
    let mut tokens = Vec::new();

    while let Some(c) = tracker.peek() {
        let kind = match c {
            c if is_space(c) => {
                tracker.skip_while(is_space);
                continue;
            }
            '(' => {
                tracker.save_jump();
                TokenKind::LeftParen
            }
            ')' => {
                tracker.save_jump();
                TokenKind::RightParen
            }
            c if c.is_ascii_digit() => {
                tracker.save();
                tracker.skip_while(|c| c.is_ascii_digit());
                TokenKind::Number
            }
            c if c.is_ascii_alphabetic() => {
                tracker.save();
                tracker.skip_while(|c| c.is_ascii_alphabetic());
                TokenKind::Name
            }
            character => {
                let start = tracker.current();
                tracker.jump();

                return Err(LexError {
                    character,
                    offset: usize::from(start),
                    span: location::span(&(start..tracker.current())),
                });
            }
        };

        let range = tracker.pop_range();
        tokens.push(Token::new(kind, tracker.substring(range.clone()), range));
    }

    Ok(tokens)
}
