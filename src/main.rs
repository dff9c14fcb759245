use clap::Parser;
use miette::IntoDiagnostic;
use tiny_compiler::cli::{self, Options};
use tiny_compiler::repl;

fn main() -> miette::Result<()> {
    // Install the panic handler.
    bupropion::install(bupropion::BupropionHandlerOpts::new).into_diagnostic()?;

    // Parse the command line arguments.
    let options = Options::parse();

    if options.repl {
        return repl::run(&options);
    }

    let (name, source) = options.input()?;
    let program = cli::compile_named(&name, &source, options.debug)?;
    println!("{program}");

    Ok(())
}
