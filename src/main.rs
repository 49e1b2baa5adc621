//! mini-C compiler CLI entry point.
//!
//! Usage: minicc <source-file>
//!
//! On success the AST tree goes to stdout, the serialized IR goes to both
//! stderr and `output.ll` in the current directory, and any implicit
//! conversion warnings follow on stderr.

use std::{env, fs, process};

use minicc::errors::{CompileError, SyntaxReport};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: minicc <source-file>");
        process::exit(64);
    }
    let filename = &args[1];

    let source = match fs::read_to_string(filename) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading '{}': {}", filename, e);
            process::exit(74);
        }
    };

    let program = match minicc::parse(&source) {
        Ok(program) => program,
        Err(err) => {
            report(&err, &source);
            process::exit(65);
        }
    };

    print!("{}", program);
    eprintln!("Parsing Finished");

    let lowered = match minicc::codegen::lower(&program) {
        Ok(lowered) => lowered,
        Err(err) => {
            report(&err, &source);
            process::exit(65);
        }
    };

    eprint!("{}", lowered.module);
    if let Err(e) = fs::write("output.ll", lowered.module.to_string()) {
        eprintln!("Error writing output.ll: {}", e);
        process::exit(74);
    }

    for warning in &lowered.warnings {
        eprintln!("warning: {}", warning);
    }
}

/// Render a compile error. Syntax errors carry a span and get the full
/// miette treatment with the offending source underlined; semantic errors
/// print as plain one-liners.
fn report(err: &CompileError, source: &str) {
    match err {
        CompileError::Syntax { message, span, .. } => {
            let report = SyntaxReport::new(message.clone(), source, *span);
            eprintln!("{:?}", miette::Report::new(report));
        }
        other => eprintln!("error: {}", other),
    }
}
