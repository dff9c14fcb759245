//! This module describes the abstract syntax tree of the language. The main structure of this
//! module is the [Node] that describes a parsed expression.

use core::fmt;

/// A node of the abstract syntax tree. Every call owns its parameters, so a parsed expression is
/// always a tree. E.g.:
///
/// ```lisp
/// (print (add 1 2))
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    /// An integer literal, kept as the digits that were written in the source.
    NumberLiteral { value: &'a str },

    /// A call of the function `name` with a list of arguments.
    CallExpression { name: &'a str, params: Vec<Node<'a>> },
}

impl<'a> Node<'a> {
    pub fn number(value: &'a str) -> Self {
        Self::NumberLiteral { value }
    }

    pub fn call(name: &'a str, params: Vec<Node<'a>>) -> Self {
        Self::CallExpression { name, params }
    }

    /// Number of call expressions in the tree, including this node.
    pub fn calls(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if let Node::CallExpression { params, .. } = node {
                count += 1;
                stack.extend(params);
            }
        }

        count
    }
}

impl<'a> Drop for Node<'a> {
    // Parameters are moved to a heap stack first, so dropping deep trees doesn't recurse.
    fn drop(&mut self) {
        let Node::CallExpression { params, .. } = self else {
            return;
        };

        let mut stack = std::mem::take(params);
        while let Some(mut node) = stack.pop() {
            if let Node::CallExpression { params, .. } = &mut node {
                stack.append(params);
            }
        }
    }
}

enum Piece<'n, 'a> {
    Open(&'n Node<'a>),
    Close,
}

impl<'a> fmt::Display for Node<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = vec![Piece::Open(self)];
        let mut first = true;

        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Open(node) => {
                    if !first {
                        write!(f, " ")?;
                    }
                    first = false;

                    match node {
                        Node::NumberLiteral { value } => write!(f, "{value}")?,
                        Node::CallExpression { name, params } => {
                            write!(f, "({name}")?;
                            pieces.push(Piece::Close);
                            pieces.extend(params.iter().rev().map(Piece::Open));
                        }
                    }
                }
                Piece::Close => write!(f, ")")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_as_s_expression() {
        let node = Node::call(
            "print",
            vec![Node::call("add", vec![Node::number("1"), Node::number("2")])],
        );

        assert_eq!(node.to_string(), "(print (add 1 2))");
        assert_eq!(Node::call("nop", vec![]).to_string(), "(nop)");
        assert_eq!(Node::number("12").to_string(), "12");
    }

    #[test]
    fn prints_deep_trees() {
        let depth = 50_000;
        let mut node = Node::number("1");
        for _ in 0..depth {
            node = Node::call("f", vec![node]);
        }

        let printed = node.to_string();

        assert!(printed.starts_with("(f (f (f "));
        assert!(printed.ends_with(" 1)))"));
        assert_eq!(printed.len(), depth * 4 + 1);
    }

    #[test]
    fn counts_calls() {
        let node = Node::call(
            "print",
            vec![
                Node::call("add", vec![Node::number("1")]),
                Node::number("3"),
                Node::call("zero", vec![]),
            ],
        );

        assert_eq!(node.calls(), 3);
        assert_eq!(Node::number("7").calls(), 0);
    }
}
