//! The error of the whole pipeline. Every stage has its own error type, this one only wraps them
//! so a caller gets the first failure whatever stage it came from.

use thiserror::Error;

use crate::codegen::CodegenError;
use crate::lexer::LexError;
use crate::parser::ParseError;

#[derive(Error, miette::Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codegen(#[from] CodegenError),
}

pub type Result<T, E = CompileError> = std::result::Result<T, E>;
