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

//! Separator-driven text scanning.
//!
//! [scan] splits text at configurable separator strings and hands each piece
//! to a [scan::Classifier].  The classifier protocol is the extension point
//! for everything else in the crate: [syntax] tokenizes source code and [xml]
//! builds element trees, both as classifiers on top of the same scanner.

pub mod scan;
pub mod settings;
pub mod syntax;
pub mod xml;
