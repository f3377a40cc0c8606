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
use splitscan::xml::AttributeOrder;

use crate::{load_settings, open_output, read_input, write_json};

/// Build an element tree from XML.
#[derive(Args, Clone, Debug)]
pub struct Tree {
    /// Input file name.  If omitted or `-`, standard input is read.
    input: Option<PathBuf>,

    /// Output file name.  If omitted, output is written to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Settings file in TOML format.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep attributes in the order they are written, overriding the
    /// settings file.
    #[arg(long)]
    declared_order: bool,

    /// Output the tree as JSON instead of XML.
    #[arg(long)]
    json: bool,

    /// With `--json`, pretty-print the output.
    #[arg(long, requires = "json")]
    pretty: bool,
}

impl Tree {
    pub fn run(self) -> Result<()> {
        let mut settings = load_settings(self.config.as_deref())?;
        if self.declared_order {
            settings.xml.attribute_order = AttributeOrder::Declared;
        }
        let text = read_input(self.input.as_deref())?;

        let mut builder = settings.xml.builder();
        builder.build(&text);
        let root = builder.finish();

        let mut output = open_output(self.output.as_ref())?;
        if self.json {
            write_json(&mut output, &root, self.pretty)?;
        } else {
            for element in &root {
                writeln!(output, "{element}")?;
            }
        }
        Ok(())
    }
}
