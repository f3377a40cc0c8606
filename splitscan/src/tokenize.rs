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

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::Args;
use splitscan::syntax::{Language, SyntaxTokenizer};

use crate::{load_settings, open_output, read_input, write_json};

/// Tokenize source code.
#[derive(Args, Clone, Debug)]
pub struct Tokenize {
    /// Input file name.  If omitted or `-`, standard input is read.
    input: Option<PathBuf>,

    /// Output file name.  If omitted, output is written to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Settings file in TOML format.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source language.  Overrides the language in the settings file.
    #[arg(short, long)]
    language: Option<Language>,

    /// Output tokens as JSON.
    #[arg(long)]
    json: bool,

    /// With `--json`, pretty-print the output.
    #[arg(long, requires = "json")]
    pretty: bool,
}

impl Tokenize {
    pub fn run(self) -> Result<()> {
        let mut settings = load_settings(self.config.as_deref())?;
        if let Some(language) = self.language {
            settings.syntax.language = language;
        }
        let text = read_input(self.input.as_deref())?;

        let mut tokenizer = SyntaxTokenizer::with_table(settings.syntax.table()?);
        tokenizer.tokenize(&text);
        let tokens = tokenizer.finish();

        let mut output = open_output(self.output.as_ref())?;
        if self.json {
            write_json(&mut output, &tokens, self.pretty)?;
        } else {
            for token in &tokens {
                writeln!(output, "{token}")?;
            }
        }
        Ok(())
    }
}
