//! Recursive-descent parser for the grammar
//!
//! ```text
//! expr := NUMBER | '(' NAME expr* ')'
//! ```
//!
//! The main function here is [parse], it reads exactly one expression out of a token sequence.
//! Calls that are still waiting for their closing parenthesis are kept in an explicit stack, like
//! a reader does, so the depth of the input is only bounded by the heap.

use miette::SourceSpan;
use thiserror::Error;

use crate::lexer::{Token, TokenKind};
use crate::location;
use crate::syntax::Node;

#[derive(Error, miette::Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input")]
    #[diagnostic(code(tiny::parser::eof))]
    UnexpectedEof {
        #[label("expected more input after this")]
        span: Option<SourceSpan>,
    },

    #[error("unexpected token '{token}' at position {position}")]
    #[diagnostic(code(tiny::parser::token))]
    UnexpectedToken {
        token: String,
        kind: TokenKind,
        position: usize,

        #[label("this token cannot start an expression")]
        span: SourceSpan,
    },
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// A call whose parameters are still being read.
struct PendingCall<'a> {
    name: &'a str,
    params: Vec<Node<'a>>,
}

impl<'a> PendingCall<'a> {
    fn finish(self) -> Node<'a> {
        Node::call(self.name, self.params)
    }
}

/// Cursor over the token sequence. The position is the index of the next token to be read.
pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    position: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.position)
    }

    fn bump(&mut self) -> Result<&'t Token<'a>> {
        let token = self.peek().ok_or_else(|| self.eof())?;
        self.position += 1;
        Ok(token)
    }

    fn eof(&self) -> ParseError {
        ParseError::UnexpectedEof {
            span: self
                .tokens
                .last()
                .map(|token| SourceSpan::from((usize::from(token.loc.end), 0))),
        }
    }

    fn unexpected(token: &Token<'a>, position: usize) -> ParseError {
        ParseError::UnexpectedToken {
            token: token.text.to_string(),
            kind: token.kind,
            position,
            span: location::span(&token.loc),
        }
    }

    /// Reads the name of the function right after an opening parenthesis.
    fn callee(&mut self) -> Result<&'a str> {
        let position = self.position;
        let token = self.bump()?;

        match token.kind {
            TokenKind::Name => Ok(token.text),
            _ => Err(Self::unexpected(token, position)),
        }
    }

    /// Reads one expression starting at the cursor.
    pub fn walk(&mut self) -> Result<Node<'a>> {
        let mut pending: Vec<PendingCall<'a>> = Vec::new();

        loop {
            let position = self.position;
            let token = self.bump()?;

            let mut finished = match token.kind {
                TokenKind::Number => Some(Node::number(token.text)),
                TokenKind::LeftParen => {
                    let name = self.callee()?;
                    pending.push(PendingCall {
                        name,
                        params: Vec::new(),
                    });
                    None
                }
                _ => return Err(Self::unexpected(token, position)),
            };

            // Hands finished nodes to their parents and closes every call that ends here.
            loop {
                if let Some(node) = finished.take() {
                    match pending.last_mut() {
                        Some(parent) => parent.params.push(node),
                        None => return Ok(node),
                    }
                }

                match self.peek() {
                    None => return Err(self.eof()),
                    Some(token) if token.kind == TokenKind::RightParen => {
                        self.position += 1;
                        finished = pending.pop().map(PendingCall::finish);
                    }
                    Some(_) => break,
                }
            }
        }
    }
}

/// Parses one expression and returns it along with the position of the first token that was not
/// consumed. Trailing tokens are left alone.
pub fn parse<'a>(tokens: &[Token<'a>]) -> Result<(Node<'a>, usize)> {
    let mut parser = Parser::new(tokens);
    let node = parser.walk()?;

    Ok((node, parser.position()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_str(source: &str) -> Result<(Node<'_>, usize)> {
        parse(&tokenize(source).unwrap())
    }

    #[test]
    fn parses_single_literal() {
        let (node, end) = parse_str("1").unwrap();

        assert_eq!(node, Node::number("1"));
        assert_eq!(end, 1);
    }

    #[test]
    fn parses_single_call() {
        let (node, _) = parse_str("(print 1)").unwrap();

        assert_eq!(node, Node::call("print", vec![Node::number("1")]));
    }

    #[test]
    fn parses_call_without_arguments() {
        let (node, end) = parse_str("(nop)").unwrap();

        assert_eq!(node, Node::call("nop", vec![]));
        assert_eq!(end, 3);
    }

    #[test]
    fn parses_nested_calls() {
        let (node, _) = parse_str("(print (add 1 2) (subtract 3 4))").unwrap();

        assert_eq!(
            node,
            Node::call(
                "print",
                vec![
                    Node::call("add", vec![Node::number("1"), Node::number("2")]),
                    Node::call("subtract", vec![Node::number("3"), Node::number("4")]),
                ]
            )
        );
    }

    #[test]
    fn ignores_trailing_tokens() {
        let (node, end) = parse_str("(f 1) 2 )").unwrap();

        assert_eq!(node, Node::call("f", vec![Node::number("1")]));
        assert_eq!(end, 4);
    }

    #[test]
    fn empty_code_is_unexpected_eof() {
        assert_eq!(
            parse_str("").unwrap_err(),
            ParseError::UnexpectedEof { span: None }
        );
    }

    #[test]
    fn missing_closing_paren_is_unexpected_eof() {
        assert!(matches!(
            parse_str("(print 1").unwrap_err(),
            ParseError::UnexpectedEof { span: Some(_) }
        ));
        assert!(matches!(
            parse_str("(print (add 1 2)").unwrap_err(),
            ParseError::UnexpectedEof { .. }
        ));
        assert!(matches!(
            parse_str("(").unwrap_err(),
            ParseError::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn rejects_tokens_that_start_no_expression() {
        let err = parse_str(")").unwrap_err();
        assert_eq!(err.to_string(), "unexpected token ')' at position 0");

        let err = parse_str("(print foo)").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                kind: TokenKind::Name,
                position: 2,
                ..
            }
        ));
    }

    #[test]
    fn callee_must_be_a_name() {
        let err = parse_str("(1 2)").unwrap_err();
        assert_eq!(err.to_string(), "unexpected token '1' at position 1");

        let err = parse_str("((add 1 2))").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                kind: TokenKind::LeftParen,
                position: 1,
                ..
            }
        ));

        let err = parse_str("()").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                kind: TokenKind::RightParen,
                ..
            }
        ));
    }

    #[test]
    fn parses_deep_nesting_without_recursion() {
        let depth = 100_000;
        let source = format!("{}1{}", "(f ".repeat(depth), ")".repeat(depth));
        let tokens = tokenize(&source).unwrap();

        let (node, end) = parse(&tokens).unwrap();

        assert_eq!(node.calls(), depth);
        assert_eq!(end, tokens.len());
    }
}
