use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use newtype_core::{CoreError, compile};

#[derive(Parser, Debug)]
#[command(version, about = "Compile Newtype source to conditional-type syntax")]
struct Cli {
    /// Input file; reads stdin when absent.
    input: Option<PathBuf>,

    /// Output file; writes stdout when absent.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse and report errors without writing any output.
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<ExitCode> {
    let (source, name) = read_source(cli.input.as_deref())?;

    let rendered = match compile(&source) {
        Ok(rendered) => rendered,
        Err(err) => {
            report(&name, &err);
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.check {
        return Ok(ExitCode::SUCCESS);
    }

    match cli.output {
        Some(path) => fs::write(&path, rendered)
            .with_context(|| format!("failed to write output file {}", path.display()))?,
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .context("failed to write to stdout")?,
    }
    Ok(ExitCode::SUCCESS)
}

fn read_source(input: Option<&std::path::Path>) -> Result<(String, String)> {
    match input {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {}", path.display()))?;
            Ok((source, path.display().to_string()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read from stdin")?;
            Ok((buffer, "<stdin>".to_string()))
        }
    }
}

/// Print every diagnostic as `name:line:column: error: message`.
fn report(name: &str, err: &CoreError) {
    for (line, column, message) in err.triples() {
        eprintln!("{name}:{line}:{column}: error: {message}");
    }
}
