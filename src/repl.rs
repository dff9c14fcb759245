//! Interactive session: every line is compiled on its own and the generated code is printed
//! right away. Errors are reported and the session goes on.

use std::path::{Path, PathBuf};

use miette::IntoDiagnostic;
use rustyline::{
    error::ReadlineError, history::History, validate::MatchingBracketValidator, Completer,
    Editor, Helper, Highlighter, Hinter, Validator,
};

use crate::cli::{compile_named, Options};

#[derive(Completer, Helper, Highlighter, Hinter, Validator)]
struct InputValidator {
    #[rustyline(Validator)]
    brackets: MatchingBracketValidator,
}

fn get_history_path() -> Option<PathBuf> {
    let home_env = std::env::var("HOME").ok()?;
    let path = format!("{home_env}/.tiny-compiler.history");
    Some(PathBuf::from(path))
}

/// Appends the entries of this session to the history file. A failure is reported on stderr
/// and doesn't stop the session from ending normally.
fn save_history(history: &mut impl History, path: &Path) -> bool {
    match history.append(path) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("cannot save history to {}: {err}", path.display());
            false
        }
    }
}

/// Compiles one line of the session into the text that gets printed back.
pub fn eval(line: &str, debug: bool) -> miette::Result<Option<String>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let program = compile_named("repl", line, debug)?;
    Ok(Some(program.to_string()))
}

pub fn run(options: &Options) -> miette::Result<()> {
    let mut rl = Editor::new().into_diagnostic()?;
    let path = get_history_path();
    let h = InputValidator {
        brackets: MatchingBracketValidator::new(),
    };

    rl.set_helper(Some(h));

    if let Some(path) = path.clone() {
        if rl.load_history(&path).is_err() {
            println!("No previous history.");
        }
    }

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                rl.add_history_entry(line.as_str()).into_diagnostic()?;

                match eval(&line, options.debug) {
                    Ok(Some(code)) => println!("{code}"),
                    Ok(None) => {}
                    Err(report) => eprintln!("{report:?}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }

    if let Some(path) = path {
        save_history(rl.history_mut(), &path);
    }

    Ok(())
}
