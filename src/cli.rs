use std::path::PathBuf;

use clap::Parser;
use miette::NamedSource;
use thiserror::Error;

use crate::Program;

/// Compiles nested calls written as s-expressions into three-address C statements.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Source code to compile, e.g. "(print (add 1 2))".
    #[arg(conflicts_with = "load")]
    pub expr: Option<String>,

    /// Loads a file to use as input.
    #[arg(short, long)]
    pub load: Option<PathBuf>,

    /// Starts a repl session.
    #[arg(short, long)]
    pub repl: bool,

    /// Dumps the tokens and the syntax tree to stderr.
    #[arg(short, long)]
    pub debug: bool,
}

#[derive(Error, miette::Diagnostic, Debug)]
pub enum InputError {
    #[error("cannot read '{path}'")]
    #[diagnostic(code(tiny::input::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("nothing to compile")]
    #[diagnostic(
        code(tiny::input::missing),
        help("pass an expression, a file with --load or start a session with --repl")
    )]
    Missing,
}

impl Options {
    /// The name and the contents of the source to compile.
    pub fn input(&self) -> Result<(String, String), InputError> {
        if let Some(expr) = &self.expr {
            return Ok(("<expr>".to_string(), expr.clone()));
        }

        let path = self.load.as_ref().ok_or(InputError::Missing)?;
        let name = path.display().to_string();

        match std::fs::read_to_string(path) {
            Ok(source) => Ok((name, source)),
            Err(source) => Err(InputError::Read { path: name, source }),
        }
    }
}

/// Compiles a source, attaching it to the error report so the labels point into it.
pub fn compile_named(name: &str, source: &str, debug: bool) -> miette::Result<Program> {
    crate::compile_source_with(source, debug).map_err(|err| {
        miette::Report::new(err).with_source_code(NamedSource::new(name, source.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inline_expressions() {
        let options = Options::try_parse_from(["tiny-compiler", "-d", "(print 1)"]).unwrap();

        assert!(options.debug);
        assert_eq!(
            options.input().unwrap(),
            ("<expr>".to_string(), "(print 1)".to_string())
        );
    }

    #[test]
    fn expressions_and_files_conflict() {
        let result = Options::try_parse_from(["tiny-compiler", "(print 1)", "--load", "a.lisp"]);

        assert!(result.is_err());
    }

    #[test]
    fn loads_files() {
        let path = std::env::temp_dir().join("tiny-compiler-cli-load.lisp");
        std::fs::write(&path, "(print (add 1 2))").unwrap();

        let options = Options {
            load: Some(path.clone()),
            ..Default::default()
        };
        let (name, source) = options.input().unwrap();

        assert_eq!(name, path.display().to_string());
        assert_eq!(source, "(print (add 1 2))");
    }

    #[test]
    fn missing_input_is_an_error() {
        let options = Options::default();

        assert!(matches!(options.input(), Err(InputError::Missing)));
    }

    #[test]
    fn unreadable_files_are_errors() {
        let options = Options {
            load: Some(PathBuf::from("/definitely/not/here.lisp")),
            ..Default::default()
        };

        assert!(matches!(options.input(), Err(InputError::Read { .. })));
    }

    #[test]
    fn reports_keep_the_stage_message() {
        let report = compile_named("<expr>", "(print 1", false).unwrap_err();

        assert_eq!(report.to_string(), "unexpected end of input");
    }

    #[test]
    fn compiles_named_sources() {
        let program = compile_named("<expr>", "(print 1)", false).unwrap();

        assert_eq!(program.to_string(), "int v0;\nv0 = print(1);");
    }
}
