//! A tiny compiler from nested function calls written as s-expressions to three-address
//! statements in C notation:
//!
//! ```text
//! (print (add (subtract 1 2) 3))
//! ```
//!
//! compiles to
//!
//! ```c
//! int v0, v1, v2;
//! v0 = subtract(1, 2);
//! v1 = add(v0, 3);
//! v2 = print(v1);
//! ```
//!
//! The stages run one after the other, each one consuming the whole output of the last one:
//! - [lexer] turns the source into tokens.
//! - [parser] reads one expression out of the tokens into a [syntax::Node] tree.
//! - [codegen] flattens the tree into statements over freshly allocated temporaries.

pub mod cli;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod repl;
pub mod syntax;

pub use codegen::{compile, generate, Program, Temporaries};
pub use error::{CompileError, Result};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::parse;
pub use syntax::Node;

/// Runs the whole pipeline over a source string.
pub fn compile_source(source: &str) -> Result<Program> {
    compile_source_with(source, false)
}

/// Runs the whole pipeline, dumping the tokens and the tree to stderr when `debug` is set.
pub fn compile_source_with(source: &str, debug: bool) -> Result<Program> {
    let tokens = tokenize(source)?;
    if debug {
        eprintln!("tokens:");
        for token in &tokens {
            eprintln!("  {token}");
        }
    }

    let (root, end) = parse(&tokens)?;
    if debug {
        eprintln!("tree: {root}");
        if end < tokens.len() {
            eprintln!("ignored {} trailing tokens", tokens.len() - end);
        }
    }

    Ok(generate(&root)?)
}
