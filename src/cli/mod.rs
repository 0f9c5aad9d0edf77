//! The Tantu command-line interface.
//!
//! A thin consumer of the library: it reads input, hands it to a bundled
//! grammar, and prints the result. All parsing behavior lives in the
//! library.

use std::io::Read;
use std::path::Path;
use std::{fs, io, process};

use clap::Parser;

use crate::cli::args::{Command, TantuArgs};
use crate::grammars::json::JSON;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = TantuArgs::parse();

    let result = match args.command {
        Command::Json {
            file,
            json,
            partial,
        } => handle_json(&file, json, partial),
    };

    if let Err(report) = result {
        output::print_error(&report);
        process::exit(1);
    }
}

/// Handles the `json` subcommand.
fn handle_json(path: &Path, as_json: bool, partial: bool) -> Result<(), miette::Report> {
    let source = read_input(path)
        .map_err(|e| miette::Report::msg(format!("cannot read {}: {}", path.display(), e)))?;

    let value = JSON
        .parse_with(&source, !partial)
        .map_err(miette::Report::new)?;

    if as_json {
        let rendered = serde_json::to_string_pretty(&value.to_json())
            .map_err(|e| miette::Report::msg(format!("cannot render JSON: {}", e)))?;
        println!("{}", rendered);
    } else {
        output::print_value(&value);
    }
    Ok(())
}

fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}
