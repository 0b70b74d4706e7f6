//! Command-line interface.
//!
//! Argument definitions and command execution live here so they can be tested
//! without spawning the binary; `main.rs` only wires up config, logging, and
//! input.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::document::node::Value;
use crate::document::parser::Format;
use crate::document::tree::Dmap;
use crate::path::Path;

/// dmap - query JSON and YAML documents by path
#[derive(Debug, Parser)]
#[command(name = "dmap")]
#[command(version)]
#[command(about = "Query JSON and YAML documents by path", long_about = None)]
pub struct Cli {
    /// Input file (omit or use `-` to read from stdin)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Input format: json or yaml (default: from config, then file extension;
    /// stdin is read as JSON, or as a YAML mapping or sequence)
    #[arg(long)]
    pub format: Option<Format>,

    /// Config file to use instead of ~/.config/dmap/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Paths use the syntax `$.root.contents[1]` or `root.contents[1]`.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the value at PATH
    Get {
        #[arg(default_value = "$")]
        path: String,
    },
    /// Print whether PATH resolves
    Exists { path: String },
    /// Print the type of the value at PATH
    Type {
        #[arg(default_value = "$")]
        path: String,
    },
    /// Print the keys or indices of the container at PATH, one per line
    Keys {
        #[arg(default_value = "$")]
        path: String,
    },
}

/// How a successfully executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// `exists` found nothing at the path
    Missing,
}

/// Runs `command` against `dmap`, writing results to `out`.
pub fn execute<W: Write>(command: &Command, dmap: &Dmap, out: &mut W) -> Result<Outcome> {
    match command {
        Command::Get { path } => {
            let path: Path = path.parse()?;
            writeln!(out, "{}", dmap.get(&path)?.value())?;
        }
        Command::Exists { path } => {
            let path: Path = path.parse()?;
            let exists = dmap.exists(&path);
            writeln!(out, "{}", exists)?;
            if !exists {
                return Ok(Outcome::Missing);
            }
        }
        Command::Type { path } => {
            let path: Path = path.parse()?;
            writeln!(out, "{}", dmap.get(&path)?.value().kind())?;
        }
        Command::Keys { path } => {
            let path: Path = path.parse()?;
            match dmap.get(&path)?.value() {
                Value::Object(fields) => {
                    for key in fields.keys() {
                        writeln!(out, "{}", key)?;
                    }
                }
                Value::Map(entries) => {
                    for key in entries.keys() {
                        writeln!(out, "{}", key)?;
                    }
                }
                Value::Array(items) => {
                    for index in 0..items.len() {
                        writeln!(out, "{}", index)?;
                    }
                }
                other => bail!("data at {} is a {}, which has no keys", path, other.kind()),
            }
        }
    }

    Ok(Outcome::Success)
}
