//! Defines the command-line arguments and subcommands for the Tantu CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "tantu",
    version,
    about = "A composable parser-combinator engine with transactional backtracking."
)]
pub struct TantuArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a JSON file with the bundled demo grammar and print the value.
    Json {
        /// The path to the JSON file to parse, or `-` for stdin.
        #[arg(required = true)]
        file: PathBuf,
        /// Print the result as canonical JSON instead of the value form.
        #[arg(long)]
        json: bool,
        /// Accept a leading match and ignore trailing unparsed input.
        #[arg(long)]
        partial: bool,
    },
}
