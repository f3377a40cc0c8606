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
use splitscan::scan::{Classification, Scanner, SeparatorSet, from_fn};

use crate::{open_output, read_input, write_json};

/// Split text at separators.
#[derive(Args, Clone, Debug)]
pub struct Split {
    /// Input file name.  If omitted or `-`, standard input is read.
    input: Option<PathBuf>,

    /// Output file name.  If omitted, output is written to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Separator string, which may be more than one character.  May be given
    /// more than once.  Earlier separators take priority.
    #[arg(short, long = "separator")]
    separators: Vec<String>,

    /// Each character in this string is a separator.  Applies after any
    /// `--separator` options.
    #[arg(short = 'c', long = "chars", default_value = " \n\t\r")]
    chars: String,

    /// Also output the separators.
    #[arg(short, long)]
    include_separators: bool,

    /// Output tokens with their offsets as JSON.
    #[arg(long)]
    json: bool,

    /// With `--json`, pretty-print the output.
    #[arg(long, requires = "json")]
    pretty: bool,
}

impl Split {
    pub fn run(self) -> Result<()> {
        let text = read_input(self.input.as_deref())?;
        let separators = SeparatorSet::new(
            self.separators
                .into_iter()
                .chain(self.chars.chars().map(String::from)),
        )?;
        let scanner = Scanner::new(separators, self.include_separators);
        let tokens = scanner.scan(
            &text,
            &mut from_fn(|_, is_separator| Classification::keep(is_separator)),
        );

        let mut output = open_output(self.output.as_ref())?;
        if self.json {
            write_json(&mut output, &tokens, self.pretty)?;
        } else {
            for token in &tokens {
                writeln!(output, "{:?}", token.value)?;
            }
        }
        Ok(())
    }
}
