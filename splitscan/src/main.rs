// splitscan - separator-driven text scanning.
// Copyright (C) 2025 The splitscan contributors.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

use std::{
    fs::{read_to_string, File},
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use splitscan::settings::Settings;

use crate::{split::Split, tokenize::Tokenize, tree::Tree};

mod split;
mod tokenize;
mod tree;

/// Splits, tokenizes, and parses text with a separator-driven scanner.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    Split(Split),
    Tokenize(Tokenize),
    Tree(Tree),
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Command::Split(split) => split.run(),
            Command::Tokenize(tokenize) => tokenize.run(),
            Command::Tree(tree) => tree.run(),
        }
    }
}

/// Reads all of `input`, or standard input if `input` is `None` or `-`.
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            read_to_string(path).with_context(|| format!("{}: read failed", path.display()))
        }
        _ => std::io::read_to_string(stdin()).context("reading standard input failed"),
    }
}

/// Loads settings from `path`, or returns the defaults if there is none.
fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let s = read_to_string(path).with_context(|| format!("{}: read failed", path.display()))?;
    Settings::from_toml(&s).with_context(|| format!("{}: invalid settings", path.display()))
}

/// Where a command writes its results.
fn open_output(output: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("{}: create failed", path.display()))?,
        ),
        None => Box::new(stdout().lock()),
    })
}

fn write_json<T>(writer: &mut dyn Write, value: &T, pretty: bool) -> Result<()>
where
    T: Serialize,
{
    match pretty {
        true => serde_json::to_writer_pretty(&mut *writer, value)?,
        false => serde_json::to_writer(&mut *writer, value)?,
    };
    writeln!(writer)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    Cli::parse().command.run()
}
